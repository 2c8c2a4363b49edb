//! Task model and calendar-date helpers.
//!
//! A task is the smallest schedulable unit of a work package. Its dates
//! are stored the way the editing surfaces produce them (`YYYY-MM-DD`
//! strings, possibly absent) and parsed on demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Dependency;
use crate::error::WbsError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, WbsError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| WbsError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A schedulable task.
///
/// Dates are optional: a task without both a start and an end is not
/// scheduled and is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Start date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Predecessor dependencies, in authoring order.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Task {
    /// Creates an undated task with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_date: None,
            end_date: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets start and end dates (`YYYY-MM-DD`).
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Whether both dates are present and non-blank.
    pub fn is_dated(&self) -> bool {
        let present = |d: &Option<String>| d.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.start_date) && present(&self.end_date)
    }

    /// Parses the task's dates.
    ///
    /// Returns `Ok(None)` when either date is missing or blank, and an
    /// error when a present date is malformed.
    pub fn parsed_dates(&self) -> Result<Option<(NaiveDate, NaiveDate)>, WbsError> {
        if !self.is_dated() {
            return Ok(None);
        }
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => Ok(Some((parse_date(start)?, parse_date(end)?))),
            _ => Ok(None),
        }
    }

    /// Duration in days (`end - start`), if both dates parse.
    pub fn duration_days(&self) -> Option<i64> {
        match self.parsed_dates() {
            Ok(Some((start, end))) => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Whether this task has any dependencies.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}
