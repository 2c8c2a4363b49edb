//! Project planning domain models.
//!
//! Provides the data types the scheduler reads and writes. The shapes
//! mirror what the editing surfaces persist, so every type round-trips
//! through JSON with camelCase field names.
//!
//! # Hierarchy
//!
//! | Type | Contains |
//! |------|----------|
//! | Project | WorkPackage* |
//! | WorkPackage | Task*, Milestone*, Deliverable* |
//! | Task | Dependency* |

mod dependency;
mod project;
mod schedule;
mod task;

pub use dependency::{Dependency, DependencyKind};
pub use project::{Deliverable, Milestone, Project, WorkPackage};
pub use schedule::{ScheduleResult, ScheduleWarning, TaskShift, WarningKind};
pub use task::{format_date, parse_date, Task, DATE_FORMAT};
