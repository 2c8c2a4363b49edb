//! Scheduling result model.
//!
//! A run produces a new [`Project`] snapshot with propagated dates,
//! the convergence outcome, warnings for anything that was ignored or
//! could not be resolved, and the list of task shifts that were applied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::{DependencyKind, Project};

/// Output of a scheduling run.
///
/// Serializes as `{ project, converged, iterations, warnings, shifts }`
/// with `warnings` as a list of message strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Project with propagated dates. The input is never modified.
    pub project: Project,
    /// Whether propagation reached a fixed point with every dependency applied.
    pub converged: bool,
    /// Number of propagation passes executed.
    pub iterations: usize,
    /// Warnings, in the order they were raised.
    pub warnings: Vec<ScheduleWarning>,
    /// Tasks whose dates moved, in flattened task order.
    pub shifts: Vec<TaskShift>,
}

/// A non-fatal anomaly found while scheduling.
///
/// Serializes as its message string; `kind` and `task_ids` are for
/// in-process callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleWarning {
    /// Warning category.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
    /// Tasks involved (successor first for dependency warnings).
    pub task_ids: Vec<String>,
}

/// Categories of schedule warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A dependency references a task that is missing or undated.
    UnknownPredecessor,
    /// Two dated tasks share an identifier.
    DuplicateTaskId,
    /// Propagation hit the iteration budget while still changing dates.
    NotConverged,
    /// A specific dependency cycle found after non-convergence.
    CircularDependency,
    /// A dependency would push a task past the end of the calendar.
    DateOutOfRange,
}

/// A task that was moved by propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskShift {
    /// Shifted task ID.
    pub task_id: String,
    /// Start before scheduling.
    pub old_start: NaiveDate,
    /// End before scheduling.
    pub old_end: NaiveDate,
    /// Start after scheduling.
    pub new_start: NaiveDate,
    /// End after scheduling.
    pub new_end: NaiveDate,
}

impl ScheduleWarning {
    /// Warning for a dependency whose predecessor cannot be resolved.
    pub fn unknown_predecessor(task_id: &str, predecessor_id: &str) -> Self {
        Self {
            kind: WarningKind::UnknownPredecessor,
            message: format!(
                "Task \"{task_id}\" references unknown predecessor \"{predecessor_id}\" — dependency ignored."
            ),
            task_ids: vec![task_id.to_string(), predecessor_id.to_string()],
        }
    }

    /// Warning for a repeated task identifier.
    pub fn duplicate_task_id(task_id: &str) -> Self {
        Self {
            kind: WarningKind::DuplicateTaskId,
            message: format!(
                "Task id \"{task_id}\" is used more than once — dependencies resolve to the first occurrence."
            ),
            task_ids: vec![task_id.to_string()],
        }
    }

    /// Summary warning for an exhausted iteration budget.
    pub fn not_converged(iterations: usize) -> Self {
        Self {
            kind: WarningKind::NotConverged,
            message: format!(
                "Schedule did not converge after {iterations} iterations — likely circular dependencies."
            ),
            task_ids: Vec::new(),
        }
    }

    /// Warning for a dependency that cannot be applied within the calendar.
    pub fn date_out_of_range(task_id: &str, predecessor_id: &str, kind: DependencyKind) -> Self {
        Self {
            kind: WarningKind::DateOutOfRange,
            message: format!(
                "Task \"{task_id}\" cannot satisfy {kind} dependency on \"{predecessor_id}\" — date out of range."
            ),
            task_ids: vec![task_id.to_string(), predecessor_id.to_string()],
        }
    }

    /// Warning naming the members of one dependency cycle.
    ///
    /// `cycle` lists the tasks in dependency order; the first task is
    /// repeated at the end of the message to close the loop.
    pub fn circular_dependency(cycle: Vec<String>) -> Self {
        let mut path = cycle.join(" → ");
        if let Some(first) = cycle.first() {
            path.push_str(" → ");
            path.push_str(first);
        }
        Self {
            kind: WarningKind::CircularDependency,
            message: format!("Circular dependency: {path}"),
            task_ids: cycle,
        }
    }
}

impl Serialize for ScheduleWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl TaskShift {
    /// Days the task moved forward.
    #[inline]
    pub fn days(&self) -> i64 {
        (self.new_start - self.old_start).num_days()
    }
}

impl ScheduleResult {
    /// Warning messages, in order.
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    /// Warnings of the given kind.
    pub fn warnings_of(&self, kind: WarningKind) -> Vec<&ScheduleWarning> {
        self.warnings.iter().filter(|w| w.kind == kind).collect()
    }

    /// Number of tasks whose dates moved.
    pub fn changed_task_count(&self) -> usize {
        self.shifts.len()
    }

    /// Finds the shift for a task, if it moved.
    pub fn shift_for(&self, task_id: &str) -> Option<&TaskShift> {
        self.shifts.iter().find(|s| s.task_id == task_id)
    }

    /// Converged with no warnings.
    pub fn is_clean(&self) -> bool {
        self.converged && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        crate::models::parse_date(s).unwrap()
    }

    #[test]
    fn test_unknown_predecessor_message() {
        let w = ScheduleWarning::unknown_predecessor("T1.2", "T9");
        assert_eq!(
            w.message,
            "Task \"T1.2\" references unknown predecessor \"T9\" — dependency ignored."
        );
        assert_eq!(w.to_string(), w.message);
        assert_eq!(w.task_ids, vec!["T1.2", "T9"]);
    }

    #[test]
    fn test_not_converged_mentions_cycles() {
        let w = ScheduleWarning::not_converged(50);
        assert!(w.message.contains("50 iterations"));
        assert!(w.message.contains("circular dependencies"));
    }

    #[test]
    fn test_circular_dependency_path() {
        let w = ScheduleWarning::circular_dependency(vec!["A".into(), "B".into()]);
        assert_eq!(w.message, "Circular dependency: A → B → A");
        assert_eq!(w.kind, WarningKind::CircularDependency);
    }

    #[test]
    fn test_date_out_of_range_message() {
        let w = ScheduleWarning::date_out_of_range("B", "A", DependencyKind::FinishToStart);
        assert_eq!(
            w.message,
            "Task \"B\" cannot satisfy FS dependency on \"A\" — date out of range."
        );
        assert_eq!(w.kind, WarningKind::DateOutOfRange);
    }

    #[test]
    fn test_result_wire_format() {
        let result = ScheduleResult {
            project: Project::new(),
            converged: true,
            iterations: 2,
            warnings: vec![ScheduleWarning::unknown_predecessor("T1", "NOPE")],
            shifts: vec![TaskShift {
                task_id: "T1".into(),
                old_start: date("2025-01-01"),
                old_end: date("2025-01-03"),
                new_start: date("2025-01-06"),
                new_end: date("2025-01-08"),
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["warnings"][0].is_string());
        assert_eq!(
            json["warnings"][0],
            "Task \"T1\" references unknown predecessor \"NOPE\" — dependency ignored."
        );
        assert_eq!(json["converged"], true);
        assert_eq!(json["iterations"], 2);
        assert!(json["project"]["workPackages"].is_array());
        assert_eq!(json["shifts"][0]["taskId"], "T1");
        assert_eq!(json["shifts"][0]["oldStart"], "2025-01-01");
        assert_eq!(json["shifts"][0]["newEnd"], "2025-01-08");
    }

    #[test]
    fn test_result_helpers() {
        let result = ScheduleResult {
            project: Project::new(),
            converged: true,
            iterations: 2,
            warnings: vec![ScheduleWarning::unknown_predecessor("T1", "T0")],
            shifts: vec![TaskShift {
                task_id: "T1".into(),
                old_start: date("2025-01-01"),
                old_end: date("2025-01-03"),
                new_start: date("2025-01-06"),
                new_end: date("2025-01-08"),
            }],
        };

        assert!(!result.is_clean());
        assert_eq!(result.changed_task_count(), 1);
        assert_eq!(result.shift_for("T1").unwrap().days(), 5);
        assert!(result.shift_for("T2").is_none());
        assert_eq!(result.warnings_of(WarningKind::UnknownPredecessor).len(), 1);
        assert!(result.warnings_of(WarningKind::NotConverged).is_empty());
        assert_eq!(result.warning_messages().len(), 1);
    }
}
