//! Schedule summary metrics.
//!
//! Computes the figures a planning view shows next to the chart after a
//! reschedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Project start | Earliest start among dated tasks |
//! | Project end | Latest end among dated tasks |
//! | Span | `end - start` in days |
//! | Shifted tasks | Tasks moved by propagation |
//! | Total / max shift | Sum and maximum of days moved |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ScheduleResult;

/// Summary of a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Earliest start among dated tasks.
    pub project_start: Option<NaiveDate>,
    /// Latest end among dated tasks.
    pub project_end: Option<NaiveDate>,
    /// `project_end - project_start` in days (0 if no dated task).
    pub span_days: i64,
    /// Tasks with two valid dates.
    pub scheduled_tasks: usize,
    /// Tasks moved by propagation.
    pub shifted_tasks: usize,
    /// Sum of days moved across all tasks.
    pub total_shift_days: i64,
    /// Largest single move (days).
    pub max_shift_days: i64,
}

impl ScheduleSummary {
    /// Computes the summary from a scheduling result.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let mut project_start: Option<NaiveDate> = None;
        let mut project_end: Option<NaiveDate> = None;
        let mut scheduled_tasks = 0;

        for task in result.project.tasks() {
            if let Ok(Some((start, end))) = task.parsed_dates() {
                if end < start {
                    continue;
                }
                scheduled_tasks += 1;
                project_start = Some(project_start.map_or(start, |s| s.min(start)));
                project_end = Some(project_end.map_or(end, |e| e.max(end)));
            }
        }

        let span_days = match (project_start, project_end) {
            (Some(s), Some(e)) => (e - s).num_days(),
            _ => 0,
        };

        let total_shift_days = result.shifts.iter().map(|s| s.days()).sum();
        let max_shift_days = result.shifts.iter().map(|s| s.days()).max().unwrap_or(0);

        Self {
            project_start,
            project_end,
            span_days,
            scheduled_tasks,
            shifted_tasks: result.shifts.len(),
            total_shift_days,
            max_shift_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, Dependency, Project, Task, WorkPackage};
    use crate::scheduler::DependencyScheduler;

    #[test]
    fn test_summary_after_shift() {
        let project = Project::new().with_work_package(
            WorkPackage::new("WP1")
                .with_task(Task::new("T1").with_dates("2025-01-01", "2025-01-10"))
                .with_task(
                    Task::new("T2")
                        .with_dates("2025-01-05", "2025-01-08")
                        .with_dependency(Dependency::finish_to_start("T1")),
                )
                .with_task(
                    Task::new("T3")
                        .with_dates("2025-01-02", "2025-01-03")
                        .with_dependency(Dependency::finish_to_start("T2")),
                )
                .with_task(Task::new("T4")),
        );
        let result = DependencyScheduler::new().schedule(&project);
        let summary = ScheduleSummary::calculate(&result);

        // T2 → 01-11..01-14 (+6), T3 → 01-15..01-16 (+13)
        assert_eq!(summary.project_start, Some(parse_date("2025-01-01").unwrap()));
        assert_eq!(summary.project_end, Some(parse_date("2025-01-16").unwrap()));
        assert_eq!(summary.span_days, 15);
        assert_eq!(summary.scheduled_tasks, 3);
        assert_eq!(summary.shifted_tasks, 2);
        assert_eq!(summary.total_shift_days, 19);
        assert_eq!(summary.max_shift_days, 13);
    }

    #[test]
    fn test_summary_empty() {
        let result = DependencyScheduler::new().schedule(&Project::new());
        let summary = ScheduleSummary::calculate(&result);
        assert_eq!(summary.project_start, None);
        assert_eq!(summary.span_days, 0);
        assert_eq!(summary.scheduled_tasks, 0);
        assert_eq!(summary.max_shift_days, 0);
    }
}
