//! Projects propagated task records back into the project hierarchy.
//!
//! The input project is cloned, never modified. Only records whose dates
//! moved are written, so untouched tasks keep their original strings.

use crate::graph::TaskRecord;
use crate::models::{format_date, Project, TaskShift};

/// Writes moved records into a clone of `project`.
///
/// `before` and `after` are the same arena before and after propagation
/// (same length, same order). Returns the new project and one
/// [`TaskShift`] per moved record, in arena order.
pub fn write_back(
    project: &Project,
    before: &[TaskRecord],
    after: &[TaskRecord],
) -> (Project, Vec<TaskShift>) {
    let mut out = project.clone();
    let mut shifts = Vec::new();

    for (old, new) in before.iter().zip(after) {
        if old.start == new.start && old.end == new.end {
            continue;
        }

        let Some(task) = out
            .work_packages
            .get_mut(new.wp_index)
            .and_then(|wp| wp.tasks.get_mut(new.task_index))
        else {
            continue;
        };
        task.start_date = Some(format_date(new.start));
        task.end_date = Some(format_date(new.end));

        shifts.push(TaskShift {
            task_id: new.id.clone(),
            old_start: old.start,
            old_end: old.end,
            new_start: new.start,
            new_end: new.end,
        });
    }

    (out, shifts)
}
