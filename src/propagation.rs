//! Fixed-point date propagation.
//!
//! Repeatedly pushes tasks forward until every resolved dependency is
//! satisfied or the pass budget runs out.
//!
//! # Algorithm
//!
//! 1. Each pass visits records in flattened project order.
//! 2. For a record with dependencies, compute how far each one requires
//!    it to move (end constraints are measured against the record's end)
//!    and take the largest.
//! 3. If that is positive, shift the record, keeping its duration.
//!    Records never move earlier.
//! 4. A pass that shifts nothing ends the run as `Stable`, or as
//!    `Blocked` if some shift would leave the calendar; reaching the
//!    budget while still shifting ends it as `Exhausted`.
//!
//! Predecessor dates are read as they stand at the moment of the visit,
//! so a chain authored in order settles in a single pass.
//!
//! # Complexity
//! O(k * (n + e)) where k=passes, n=records, e=resolved dependencies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::graph::TaskRecord;
use crate::models::DependencyKind;
use crate::validation::ResolvedDependency;

/// Pass budget used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Propagation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationState {
    /// The last pass moved at least one task and budget remains.
    Propagating,
    /// A pass moved nothing and every dependency holds.
    Stable,
    /// A pass moved nothing, but some dependency would need a date
    /// past the end of the representable calendar.
    Blocked,
    /// The budget ran out while tasks were still moving.
    Exhausted,
}

/// A dependency that cannot be satisfied without leaving the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedDependency {
    /// Record index of the successor.
    pub task: usize,
    /// Record index of the predecessor.
    pub predecessor: usize,
    /// Relation kind.
    pub kind: DependencyKind,
}

/// Result of a propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Terminal state (`Stable`, `Blocked`, or `Exhausted`).
    pub state: PropagationState,
    /// Passes executed.
    pub iterations: usize,
    /// Dependencies that could not be applied in the last pass.
    pub blocked: Vec<BlockedDependency>,
}

impl PropagationOutcome {
    /// Whether propagation reached a fixed point with every dependency applied.
    #[inline]
    pub fn converged(&self) -> bool {
        self.state == PropagationState::Stable
    }
}

/// Days the successor must move forward to satisfy one dependency.
///
/// Zero or negative means the dependency already holds. Computed from
/// date differences only, so it is defined for every pair of dates.
pub fn required_shift_days(
    kind: DependencyKind,
    pred_start: NaiveDate,
    pred_end: NaiveDate,
    succ_start: NaiveDate,
    succ_end: NaiveDate,
) -> i64 {
    let (anchor, lag) = match kind {
        DependencyKind::FinishToStart => (pred_end, 1),
        DependencyKind::StartToStart => (pred_start, 0),
        DependencyKind::FinishToFinish => (pred_end, 0),
        DependencyKind::StartToFinish => (pred_start, -1),
    };
    let bound = if kind.constrains_end() { succ_end } else { succ_start };
    (anchor - bound).num_days() + lag
}

/// Runs propagation passes over `records` until stable or out of budget.
///
/// `edges[i]` must hold the resolved dependencies of `records[i]`.
/// A budget of zero is treated as one pass.
pub fn propagate(
    records: &mut [TaskRecord],
    edges: &[Vec<ResolvedDependency>],
    max_iterations: usize,
) -> PropagationOutcome {
    let budget = max_iterations.max(1);
    let mut iterations = 0;
    let mut state = PropagationState::Propagating;
    let mut blocked = Vec::new();

    while state == PropagationState::Propagating {
        if iterations == budget {
            state = PropagationState::Exhausted;
            break;
        }
        iterations += 1;

        blocked.clear();
        let moved = run_pass(records, edges, &mut blocked);
        tracing::debug!(pass = iterations, moved, blocked = blocked.len(), "propagation pass");
        if moved == 0 {
            state = if blocked.is_empty() {
                PropagationState::Stable
            } else {
                PropagationState::Blocked
            };
        }
    }

    PropagationOutcome {
        state,
        iterations,
        blocked,
    }
}

/// One pass over all records. Returns the number of records moved and
/// collects dependencies that could not be applied into `blocked`.
fn run_pass(
    records: &mut [TaskRecord],
    edges: &[Vec<ResolvedDependency>],
    blocked: &mut Vec<BlockedDependency>,
) -> usize {
    let mut moved = 0;

    for (i, deps) in edges.iter().enumerate() {
        if deps.is_empty() {
            continue;
        }

        let shift_of = |records: &[TaskRecord], dep: &ResolvedDependency| {
            let pred = &records[dep.predecessor];
            let succ = &records[i];
            required_shift_days(dep.kind, pred.start, pred.end, succ.start, succ.end)
        };

        let shift = deps.iter().map(|dep| shift_of(&*records, dep)).max().unwrap_or(0);
        if shift <= 0 {
            continue;
        }

        let applied = records[i]
            .start
            .checked_add_signed(chrono::Duration::days(shift))
            .is_some_and(|start| records[i].shift_to(start));
        if applied {
            moved += 1;
        } else {
            for dep in deps {
                if shift_of(&*records, dep) > 0 {
                    blocked.push(BlockedDependency {
                        task: i,
                        predecessor: dep.predecessor,
                        kind: dep.kind,
                    });
                }
            }
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn record(id: &str, start: &str, end: &str) -> TaskRecord {
        let (start, end) = (d(start), d(end));
        TaskRecord {
            wp_index: 0,
            task_index: 0,
            id: id.to_string(),
            start,
            end,
            duration_days: (end - start).num_days(),
            dependencies: Vec::new(),
        }
    }

    fn dep(predecessor: usize, kind: DependencyKind) -> ResolvedDependency {
        ResolvedDependency { predecessor, kind }
    }

    #[test]
    fn test_required_shift_per_kind() {
        let (ps, pe) = (d("2025-01-01"), d("2025-01-10"));
        let (ss, se) = (d("2025-01-05"), d("2025-01-08"));
        use DependencyKind::*;
        assert_eq!(required_shift_days(FinishToStart, ps, pe, ss, se), 6);
        assert_eq!(required_shift_days(StartToStart, ps, pe, ss, se), -4);
        assert_eq!(required_shift_days(FinishToFinish, ps, pe, ss, se), 2);
        assert_eq!(required_shift_days(StartToFinish, ps, pe, ss, se), -8);
    }

    #[test]
    fn test_required_shift_at_calendar_end() {
        let last = NaiveDate::MAX;
        assert_eq!(
            required_shift_days(DependencyKind::FinishToStart, last, last, last, last),
            1
        );
    }

    #[test]
    fn test_fs_shift() {
        let mut records = vec![
            record("T1.1", "2025-01-01", "2025-01-10"),
            record("T1.2", "2025-01-05", "2025-01-08"),
        ];
        let edges = vec![vec![], vec![dep(0, DependencyKind::FinishToStart)]];

        let outcome = propagate(&mut records, &edges, DEFAULT_MAX_ITERATIONS);
        assert!(outcome.converged());
        assert_eq!(outcome.iterations, 2);
        assert!(outcome.blocked.is_empty());
        assert_eq!(records[1].start, d("2025-01-11"));
        assert_eq!(records[1].end, d("2025-01-14"));
    }

    #[test]
    fn test_ff_and_sf_move_end() {
        let mut records = vec![
            record("P", "2025-01-01", "2025-01-10"),
            record("FF", "2025-01-01", "2025-01-04"),
            record("SF", "2024-12-01", "2024-12-05"),
        ];
        let edges = vec![
            vec![],
            vec![dep(0, DependencyKind::FinishToFinish)],
            vec![dep(0, DependencyKind::StartToFinish)],
        ];

        assert!(propagate(&mut records, &edges, 50).converged());
        assert_eq!((records[1].start, records[1].end), (d("2025-01-07"), d("2025-01-10")));
        assert_eq!((records[2].start, records[2].end), (d("2024-12-27"), d("2024-12-31")));
    }

    #[test]
    fn test_never_moves_earlier() {
        let mut records = vec![
            record("P", "2025-01-01", "2025-01-02"),
            record("S", "2025-03-01", "2025-03-05"),
        ];
        let edges = vec![vec![], vec![dep(0, DependencyKind::FinishToStart)]];

        let outcome = propagate(&mut records, &edges, 50);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(records[1].start, d("2025-03-01"));
    }

    #[test]
    fn test_most_restrictive_dependency_wins() {
        // The later-listed SS edge is weaker than the FS edge and must not undo it.
        let mut records = vec![
            record("A", "2025-01-01", "2025-01-20"),
            record("B", "2025-01-01", "2025-01-02"),
            record("C", "2025-01-01", "2025-01-03"),
        ];
        let edges = vec![
            vec![],
            vec![],
            vec![
                dep(0, DependencyKind::FinishToStart),
                dep(1, DependencyKind::StartToStart),
            ],
        ];

        assert!(propagate(&mut records, &edges, 50).converged());
        assert_eq!(records[2].start, d("2025-01-21"));
        assert_eq!(records[2].end, d("2025-01-23"));
    }

    #[test]
    fn test_reverse_order_chain_needs_more_passes() {
        // C depends on B depends on A, but C is visited first.
        let mut records = vec![
            record("C", "2025-01-01", "2025-01-02"),
            record("B", "2025-01-01", "2025-01-02"),
            record("A", "2025-01-01", "2025-01-02"),
        ];
        let edges = vec![
            vec![dep(1, DependencyKind::FinishToStart)],
            vec![dep(2, DependencyKind::FinishToStart)],
            vec![],
        ];

        let outcome = propagate(&mut records, &edges, 50);
        assert!(outcome.converged());
        assert_eq!(outcome.iterations, 3);
        assert_eq!(records[1].start, d("2025-01-03"));
        assert_eq!(records[0].start, d("2025-01-05"));
    }

    #[test]
    fn test_mutual_fs_exhausts_budget() {
        let mut records = vec![
            record("A", "2025-01-01", "2025-01-02"),
            record("B", "2025-01-01", "2025-01-02"),
        ];
        let edges = vec![
            vec![dep(1, DependencyKind::FinishToStart)],
            vec![dep(0, DependencyKind::FinishToStart)],
        ];

        let outcome = propagate(&mut records, &edges, DEFAULT_MAX_ITERATIONS);
        assert_eq!(outcome.state, PropagationState::Exhausted);
        assert_eq!(outcome.iterations, 50);
        assert!(!outcome.converged());
        for r in &records {
            assert_eq!((r.end - r.start).num_days(), 1);
        }
    }

    #[test]
    fn test_mutual_ss_is_stable() {
        let mut records = vec![
            record("A", "2025-01-01", "2025-01-02"),
            record("B", "2025-01-03", "2025-01-04"),
        ];
        let edges = vec![
            vec![dep(1, DependencyKind::StartToStart)],
            vec![dep(0, DependencyKind::StartToStart)],
        ];

        let outcome = propagate(&mut records, &edges, 50);
        assert!(outcome.converged());
        assert_eq!(records[0].start, records[1].start);
    }

    #[test]
    fn test_fs_past_calendar_end_is_blocked() {
        let last = NaiveDate::MAX;
        let mut records = vec![
            record("A", "2025-01-01", "2025-01-02"),
            record("B", "2025-01-01", "2025-01-03"),
        ];
        records[0].start = last.pred_opt().unwrap();
        records[0].end = last;
        let edges = vec![vec![], vec![dep(0, DependencyKind::FinishToStart)]];

        let outcome = propagate(&mut records, &edges, 50);
        assert_eq!(outcome.state, PropagationState::Blocked);
        assert!(!outcome.converged());
        assert_eq!(outcome.iterations, 1);
        assert_eq!(
            outcome.blocked,
            vec![BlockedDependency {
                task: 1,
                predecessor: 0,
                kind: DependencyKind::FinishToStart
            }]
        );
        assert_eq!(records[1].start, d("2025-01-01"));
    }

    #[test]
    fn test_ss_end_past_calendar_end_is_blocked() {
        let last = NaiveDate::MAX;
        let mut records = vec![
            record("A", "2025-01-01", "2025-01-02"),
            record("B", "2025-01-01", "2025-01-06"),
        ];
        records[0].start = last.pred_opt().unwrap();
        records[0].end = last;
        let edges = vec![vec![], vec![dep(0, DependencyKind::StartToStart)]];

        let outcome = propagate(&mut records, &edges, 50);
        assert_eq!(outcome.state, PropagationState::Blocked);
        assert_eq!(outcome.blocked.len(), 1);
        assert_eq!((records[1].end - records[1].start).num_days(), 5);
    }

    #[test]
    fn test_zero_budget_runs_one_pass() {
        let mut records = vec![record("A", "2025-01-01", "2025-01-02")];
        let outcome = propagate(&mut records, &[vec![]], 0);
        assert_eq!(outcome.iterations, 1);
        assert!(outcome.converged());
    }
}
