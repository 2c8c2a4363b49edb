//! Temporal dependency model.
//!
//! A dependency links a successor task to a predecessor task with one of
//! the four classic precedence relations used in project networks.
//!
//! | Kind | Constraint on successor |
//! |------|-------------------------|
//! | FS | start ≥ predecessor end + 1 day |
//! | SS | start ≥ predecessor start |
//! | FF | end ≥ predecessor end |
//! | SF | end ≥ predecessor start − 1 day |
//!
//! # Reference
//! PMI (2017), "PMBOK Guide", 6.3.2.1 Precedence Diagramming Method

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WbsError;

/// Precedence relation between a predecessor and its successor.
///
/// Serialized as the two-letter code (`"FS"`, `"SS"`, `"FF"`, `"SF"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Finish-to-Start.
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    /// Start-to-Start.
    #[serde(rename = "SS")]
    StartToStart,
    /// Finish-to-Finish.
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Start-to-Finish.
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyKind {
    /// All kinds, in code order.
    pub const ALL: [DependencyKind; 4] = [
        Self::FinishToStart,
        Self::StartToStart,
        Self::FinishToFinish,
        Self::StartToFinish,
    ];

    /// Two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }

    /// Whether the constraint binds the successor's end rather than its start.
    pub fn constrains_end(&self) -> bool {
        matches!(self, Self::FinishToFinish | Self::StartToFinish)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DependencyKind {
    type Err = WbsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FinishToStart),
            "SS" => Ok(Self::StartToStart),
            "FF" => Ok(Self::FinishToFinish),
            "SF" => Ok(Self::StartToFinish),
            _ => Err(WbsError::UnknownDependencyKind(s.to_string())),
        }
    }
}

/// A dependency on a predecessor task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Identifier of the predecessor task.
    pub predecessor_id: String,
    /// Relation kind.
    #[serde(rename = "type", default)]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates a dependency of the given kind.
    pub fn new(predecessor_id: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            predecessor_id: predecessor_id.into(),
            kind,
        }
    }

    /// Finish-to-Start dependency.
    pub fn finish_to_start(predecessor_id: impl Into<String>) -> Self {
        Self::new(predecessor_id, DependencyKind::FinishToStart)
    }

    /// Start-to-Start dependency.
    pub fn start_to_start(predecessor_id: impl Into<String>) -> Self {
        Self::new(predecessor_id, DependencyKind::StartToStart)
    }

    /// Finish-to-Finish dependency.
    pub fn finish_to_finish(predecessor_id: impl Into<String>) -> Self {
        Self::new(predecessor_id, DependencyKind::FinishToFinish)
    }

    /// Start-to-Finish dependency.
    pub fn start_to_finish(predecessor_id: impl Into<String>) -> Self {
        Self::new(predecessor_id, DependencyKind::StartToFinish)
    }
}
