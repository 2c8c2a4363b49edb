//! Project hierarchy: project → work packages → tasks.
//!
//! Milestones and deliverables ride along in each work package but are
//! not scheduled; the scheduler copies them through unchanged.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::error::WbsError;

/// Root container passed into and returned from the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Work packages, in authoring order.
    #[serde(default)]
    pub work_packages: Vec<WorkPackage>,
}

/// A named group of tasks, milestones, and deliverables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    /// Work package identifier (e.g. `"WP1"`).
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Tasks, in authoring order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Milestones (not scheduled).
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Deliverables (not scheduled).
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
}

/// A project milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A project deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a work package.
    pub fn with_work_package(mut self, work_package: WorkPackage) -> Self {
        self.work_packages.push(work_package);
        self
    }

    /// Parses a project from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, WbsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the project to JSON.
    pub fn to_json(&self) -> Result<String, WbsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Iterates over all tasks across work packages.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.work_packages.iter().flat_map(|wp| wp.tasks.iter())
    }

    /// Finds the first task with the given ID.
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks().find(|t| t.id == id)
    }

    /// Total number of tasks.
    pub fn task_count(&self) -> usize {
        self.work_packages.iter().map(|wp| wp.tasks.len()).sum()
    }
}

impl WorkPackage {
    /// Creates an empty work package.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            tasks: Vec::new(),
            milestones: Vec::new(),
            deliverables: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a milestone.
    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }

    /// Adds a deliverable.
    pub fn with_deliverable(mut self, deliverable: Deliverable) -> Self {
        self.deliverables.push(deliverable);
        self
    }
}

impl Milestone {
    /// Creates a milestone.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: None,
        }
    }

    /// Sets the milestone date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl Deliverable {
    /// Creates a deliverable.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
        }
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }
}
