//! Dependency scheduler, result writer, and summary metrics.
//!
//! # Algorithm
//!
//! `DependencyScheduler` runs a bounded fixed-point propagation of
//! FS/SS/FF/SF constraints over the flattened task graph. Hitting the
//! pass budget is reported as non-convergence; the best-effort dates are
//! still returned.
//!
//! # Summary
//!
//! `ScheduleSummary` computes the project span and how far tasks moved.
//!
//! # References
//!
//! - PMI (2017), "PMBOK Guide", 6.3 Sequence Activities
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

mod engine;
mod summary;
mod writer;

pub use engine::{DependencyScheduler, SchedulerConfig};
pub use summary::ScheduleSummary;
pub use writer::write_back;

use crate::models::{Project, ScheduleResult};

/// Schedules a project with default settings.
pub fn schedule_project(project: &Project) -> ScheduleResult {
    DependencyScheduler::new().schedule(project)
}
