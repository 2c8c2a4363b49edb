//! Task graph construction.
//!
//! Flattens the nested project hierarchy into an arena of
//! [`TaskRecord`]s plus an id → index table. Records remember their
//! `(work package, task)` slot so the writer can project dates back.
//!
//! Only tasks with two valid dates become records. Anything else is a
//! data gap: it is skipped here and any dependency pointing at it is
//! treated as unresolved downstream.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{Dependency, Project};

/// Working copy of one schedulable task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Index of the owning work package.
    pub wp_index: usize,
    /// Index of the task within its work package.
    pub task_index: usize,
    /// Task identifier.
    pub id: String,
    /// Current start date.
    pub start: NaiveDate,
    /// Current end date.
    pub end: NaiveDate,
    /// `end - start` in days, fixed for the whole run.
    pub duration_days: i64,
    /// Dependencies as authored (unresolved).
    pub dependencies: Vec<Dependency>,
}

impl TaskRecord {
    /// Moves the task so it starts on `start`, keeping its duration.
    ///
    /// Returns `false` and leaves the record untouched if the new end
    /// falls outside the representable calendar.
    pub fn shift_to(&mut self, start: NaiveDate) -> bool {
        match start.checked_add_signed(chrono::Duration::days(self.duration_days)) {
            Some(end) => {
                self.start = start;
                self.end = end;
                true
            }
            None => false,
        }
    }
}

/// Flat arena of schedulable tasks with an id lookup table.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    /// Records, in flattened project order.
    pub records: Vec<TaskRecord>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl TaskGraph {
    /// Builds the graph from a project.
    ///
    /// When two dated tasks share an id the first keeps the lookup slot;
    /// the repeated id is remembered for [`duplicate_ids`](Self::duplicate_ids).
    pub fn build(project: &Project) -> Self {
        let mut graph = Self::default();

        for (wp_index, wp) in project.work_packages.iter().enumerate() {
            for (task_index, task) in wp.tasks.iter().enumerate() {
                let (start, end) = match task.parsed_dates() {
                    Ok(Some(dates)) => dates,
                    Ok(None) => {
                        tracing::debug!(task_id = %task.id, "task has no dates, not scheduled");
                        continue;
                    }
                    Err(error) => {
                        tracing::debug!(task_id = %task.id, %error, "task has an invalid date, not scheduled");
                        continue;
                    }
                };
                if end < start {
                    tracing::debug!(task_id = %task.id, %start, %end, "task ends before it starts, not scheduled");
                    continue;
                }

                let slot = graph.records.len();
                if graph.index.contains_key(&task.id) {
                    graph.duplicates.push(task.id.clone());
                } else {
                    graph.index.insert(task.id.clone(), slot);
                }

                graph.records.push(TaskRecord {
                    wp_index,
                    task_index,
                    id: task.id.clone(),
                    start,
                    end,
                    duration_days: (end - start).num_days(),
                    dependencies: task.dependencies.clone(),
                });
            }
        }

        graph
    }

    /// Looks up a record index by task id.
    #[inline]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Looks up a record by task id.
    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.index_of(id).map(|i| &self.records[i])
    }

    /// Ids that appeared on more than one dated task, once per repeat.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of schedulable tasks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no task is schedulable.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
