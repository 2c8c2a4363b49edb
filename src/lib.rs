//! Work-breakdown dependency scheduler for the U-Engine ecosystem.
//!
//! Recomputes task dates in a project plan so that every
//! Finish-to-Start, Start-to-Start, Finish-to-Finish, and Start-to-Finish
//! dependency holds, preserving each task's duration and never pulling a
//! task earlier than it was.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Project`, `WorkPackage`, `Task`,
//!   `Dependency`, `ScheduleResult`, `ScheduleWarning`
//! - **`graph`**: Flattens the hierarchy into an id-indexed task arena
//! - **`validation`**: Dependency resolution, cycle search, constraint checks
//! - **`propagation`**: Bounded fixed-point date propagation
//! - **`scheduler`**: The end-to-end scheduler, write-back, and summary
//!
//! # Failure model
//!
//! Scheduling never fails. Missing dates exclude a task, unresolved
//! predecessors, calendar overflow and non-convergence become warnings,
//! and a best-effort project is always returned. Only the parsing
//! helpers return [`WbsError`].
//!
//! # References
//!
//! - PMI (2017), "A Guide to the Project Management Body of Knowledge", Ch. 6
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

pub mod error;
pub mod graph;
pub mod models;
pub mod propagation;
pub mod scheduler;
pub mod validation;

pub use error::WbsError;
pub use scheduler::schedule_project;
