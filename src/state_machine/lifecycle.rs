//! Task lifecycle transitions.
//!
//! Every transition between the four statuses is legal, including backward
//! from `Done`. The job of this module is not to forbid movement but to keep
//! `status` and `progress` consistent with the intent of the operation and to
//! stamp `updated_at`. All operations are pure: they take a task by reference
//! and return the transitioned copy, which makes rollback in the
//! synchronization layer a matter of restoring the untouched snapshot.

use crate::models::{Comment, Task, TaskEdit, UserId, ValidationError};
use crate::state_machine::resolver::{
    clamp_progress, default_progress_for_status, status_for_progress,
};
use crate::state_machine::states::TaskStatus;
use chrono::Utc;

/// Apply a direct status change (column drop, status picker).
///
/// Progress becomes the representative default for the new status unless the
/// caller supplies an explicit value alongside (a slider-driven update), in
/// which case that value is kept verbatim. No other fields are touched.
/// Applying the same change twice yields the same result, timestamps aside.
pub fn apply_status_change(
    task: &Task,
    new_status: TaskStatus,
    explicit_progress: Option<u8>,
) -> Task {
    let mut next = task.clone();
    next.status = new_status;
    next.progress = match explicit_progress {
        Some(value) => value.min(100),
        None => default_progress_for_status(new_status),
    };
    next.updated_at = Utc::now();
    next
}

/// Apply a progress slider change.
///
/// The raw value is clamped into `[0, 100]` and the status is derived from
/// the clamped value through the resolver table.
pub fn apply_progress_change(task: &Task, new_progress: i64) -> Task {
    let progress = clamp_progress(new_progress);
    let mut next = task.clone();
    next.progress = progress;
    next.status = status_for_progress(progress);
    next.updated_at = Utc::now();
    next
}

/// Append a comment to a task.
///
/// Comments are append-only: there is no edit or removal of individual
/// comments, so the list length is monotonically non-decreasing.
pub fn append_comment(task: &Task, text: impl Into<String>, author: Option<UserId>) -> Task {
    let mut next = task.clone();
    next.comments.push(Comment::new(text, author));
    next.updated_at = Utc::now();
    next
}

/// Apply a field-wise edit to a task.
///
/// Validation runs before any mutation, so a [`ValidationError`] guarantees
/// the task was not touched and no rollback is ever needed for it.
pub fn apply_edit(task: &Task, edit: &TaskEdit) -> Result<Task, ValidationError> {
    edit.validate_against(task)?;

    let mut next = task.clone();
    if let Some(title) = &edit.title {
        next.title = title.clone();
    }
    if let Some(description) = &edit.description {
        next.description = description.clone();
    }
    if let Some(priority) = edit.priority {
        next.priority = priority;
    }
    if let Some(start_date) = edit.start_date {
        next.start_date = start_date;
    }
    if let Some(due_date) = edit.due_date {
        next.due_date = due_date;
    }
    if let Some(assignee) = edit.assignee {
        next.assignee = assignee;
    }
    next.updated_at = Utc::now();
    Ok(next)
}
