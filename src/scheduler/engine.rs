//! Dependency-driven date scheduler.
//!
//! # Pipeline
//!
//! 1. Build the flat task graph (dated tasks only).
//! 2. Resolve dependencies; unresolved ones become warnings.
//! 3. Propagate dates to a fixed point within the pass budget.
//! 4. Report dependencies that would leave the calendar. On an exhausted
//!    budget, report non-convergence and, if enabled, name the cycles.
//! 5. Write moved dates into a clone of the project.
//!
//! # Complexity
//! O(k * (n + e)) where k=passes, n=dated tasks, e=resolved dependencies.

use serde::{Deserialize, Serialize};

use super::writer::write_back;
use crate::graph::TaskGraph;
use crate::models::{Project, ScheduleResult, ScheduleWarning};
use crate::propagation::{
    propagate, PropagationOutcome, PropagationState, DEFAULT_MAX_ITERATIONS,
};
use crate::validation::{find_cycles, resolve_dependencies, Resolution, ResolvedDependency};

/// Scheduler settings.
///
/// Deserializes with defaults for any missing field, so a partial
/// settings document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Maximum propagation passes before giving up.
    pub max_iterations: usize,
    /// Whether to name the tasks of each cycle when propagation fails to converge.
    pub report_cycles: bool,
}

impl SchedulerConfig {
    /// Default settings: 50 passes, cycle report on.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            report_cycles: true,
        }
    }

    /// Sets the pass budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enables or disables the per-cycle warnings.
    pub fn with_cycle_report(mut self, enabled: bool) -> Self {
        self.report_cycles = enabled;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Recomputes task dates so every resolved dependency holds.
///
/// A pure function of its input: the project is borrowed, cloned, and
/// the clone returned inside the [`ScheduleResult`].
///
/// # Example
///
/// ```
/// use u_wbs::models::{Dependency, Project, Task, WorkPackage};
/// use u_wbs::scheduler::DependencyScheduler;
///
/// let project = Project::new().with_work_package(
///     WorkPackage::new("WP1")
///         .with_task(Task::new("T1.1").with_dates("2025-01-01", "2025-01-10"))
///         .with_task(
///             Task::new("T1.2")
///                 .with_dates("2025-01-05", "2025-01-08")
///                 .with_dependency(Dependency::finish_to_start("T1.1")),
///         ),
/// );
///
/// let result = DependencyScheduler::new().schedule(&project);
/// assert!(result.converged);
/// let t12 = result.project.find_task("T1.2").unwrap();
/// assert_eq!(t12.start_date.as_deref(), Some("2025-01-11"));
/// assert_eq!(t12.end_date.as_deref(), Some("2025-01-14"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyScheduler {
    config: SchedulerConfig,
}

impl DependencyScheduler {
    /// Creates a scheduler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given settings.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Sets the pass budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a project.
    pub fn schedule(&self, project: &Project) -> ScheduleResult {
        let mut graph = TaskGraph::build(project);
        let Resolution {
            edges,
            mut warnings,
        } = resolve_dependencies(&graph);

        let before = graph.records.clone();
        let outcome = propagate(&mut graph.records, &edges, self.config.max_iterations);
        warnings.extend(outcome_warnings(
            &graph,
            &edges,
            &outcome,
            self.config.report_cycles,
        ));

        let (project, shifts) = write_back(project, &before, &graph.records);

        tracing::info!(
            tasks = graph.len(),
            dependencies = edges.iter().map(Vec::len).sum::<usize>(),
            iterations = outcome.iterations,
            converged = outcome.converged(),
            shifted = shifts.len(),
            warnings = warnings.len(),
            "schedule computed"
        );

        ScheduleResult {
            project,
            converged: outcome.converged(),
            iterations: outcome.iterations,
            warnings,
            shifts,
        }
    }
}

/// Warnings derived from how propagation ended.
fn outcome_warnings(
    graph: &TaskGraph,
    edges: &[Vec<ResolvedDependency>],
    outcome: &PropagationOutcome,
    report_cycles: bool,
) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();

    for blocked in &outcome.blocked {
        let task = &graph.records[blocked.task].id;
        let predecessor = &graph.records[blocked.predecessor].id;
        tracing::warn!(
            task = %task,
            predecessor = %predecessor,
            kind = %blocked.kind,
            "dependency would move task past the end of the calendar"
        );
        warnings.push(ScheduleWarning::date_out_of_range(
            task,
            predecessor,
            blocked.kind,
        ));
    }

    if outcome.state == PropagationState::Exhausted {
        tracing::warn!(
            iterations = outcome.iterations,
            "schedule did not converge, likely circular dependencies"
        );
        warnings.push(ScheduleWarning::not_converged(outcome.iterations));

        if report_cycles {
            for cycle in find_cycles(edges) {
                let ids = cycle
                    .iter()
                    .map(|&i| graph.records[i].id.clone())
                    .collect();
                warnings.push(ScheduleWarning::circular_dependency(ids));
            }
        }
    }

    warnings
}
