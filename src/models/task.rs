//! # Task Model
//!
//! The central entity of the board. A task carries its status/progress pair
//! (denormalized against each other and reconciled by the resolver), an
//! independent priority axis, schedule dates, weak user references, and an
//! append-only comment thread.
//!
//! Weak references (`assignee`, `assigned_by`, `project_id`) are held by id
//! only: a task outlives a deleted user, and the presentation layer renders a
//! dangling assignee as "Unassigned". `assigned_by` is set at creation and
//! never mutated afterwards.

use crate::models::user::UserId;
use crate::state_machine::resolver::default_progress_for_status;
use crate::state_machine::states::{Priority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque task identifier, assigned at creation and immutable.
pub type TaskId = Uuid;
/// Weak reference grouping tasks into a board scope.
pub type ProjectId = Uuid;
/// Identifier of a single comment within a task's thread.
pub type CommentId = Uuid;

/// A task as the client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// 0-100, denormalized against `status`; independently settable through
    /// the progress slider.
    pub progress: u8,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    /// Weak reference; `None` renders as "Unassigned".
    pub assignee: Option<UserId>,
    /// Weak reference to the delegating user; never mutated after creation.
    pub assigned_by: Option<UserId>,
    /// Append-only; length is monotonically non-decreasing within a session.
    pub comments: Vec<Comment>,
    pub project_id: Option<ProjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialize a draft into a full task with a fresh id and timestamps.
    ///
    /// Used by gateway adapters and tests; the synchronization controller
    /// itself never inserts a task that did not come back from the gateway.
    pub fn from_draft(draft: NewTask) -> Self {
        let now = Utc::now();
        let status = draft.status.unwrap_or_default();
        let progress = draft
            .progress
            .map(|value| value.min(100))
            .unwrap_or_else(|| default_progress_for_status(status));
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            status,
            priority: draft.priority,
            progress,
            start_date: draft.start_date,
            due_date: draft.due_date,
            assignee: draft.assignee,
            assigned_by: draft.assigned_by,
            comments: Vec::new(),
            project_id: draft.project_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Draft for task creation (without generated fields).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Defaults to `Todo` when absent.
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    /// Defaults to the representative progress of the initial status.
    pub progress: Option<u8>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<UserId>,
    pub assigned_by: Option<UserId>,
    pub project_id: Option<ProjectId>,
}

impl NewTask {
    /// Minimal draft with a title and defaults everywhere else.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate the draft before it is handed to the gateway.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        validate_schedule(self.start_date, self.due_date)
    }
}

/// A single entry in a task's append-only comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    /// Weak reference to the author.
    pub author: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: impl Into<String>, author: Option<UserId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author,
            created_at: Utc::now(),
        }
    }
}

/// Field-wise task edit.
///
/// Outer `Option` marks whether the field is being changed; the inner
/// `Option` on dates and assignee distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub assignee: Option<Option<UserId>>,
}

impl TaskEdit {
    /// Check the edit against the task it would apply to.
    ///
    /// The schedule invariant `start_date <= due_date` is enforced at edit
    /// time over the effective (edited or existing) values, not
    /// retroactively.
    pub fn validate_against(&self, task: &Task) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        let start = self.start_date.unwrap_or(task.start_date);
        let due = self.due_date.unwrap_or(task.due_date);
        validate_schedule(start, due)
    }
}

/// Errors caught before any optimistic mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start date {start} is after due date {due}")]
    StartAfterDue {
        start: DateTime<Utc>,
        due: DateTime<Utc>,
    },
    #[error("title must not be empty")]
    EmptyTitle,
}

fn validate_schedule(
    start: Option<DateTime<Utc>>,
    due: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(due)) = (start, due) {
        if start > due {
            return Err(ValidationError::StartAfterDue { start, due });
        }
    }
    Ok(())
}
