//! Errors for the fallible parsing helpers.
//!
//! Scheduling itself never fails: anomalies surface as
//! [`ScheduleWarning`](crate::models::ScheduleWarning)s on the result.
//! These errors only come from turning external text (JSON documents,
//! date strings, dependency codes) into model values.

use thiserror::Error;

/// Errors raised while parsing project input.
#[derive(Debug, Error)]
pub enum WbsError {
    #[error("invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown dependency type {0:?} (expected FS, SS, FF, or SF)")]
    UnknownDependencyKind(String),

    #[error("project JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
