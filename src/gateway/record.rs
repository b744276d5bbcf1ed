//! Wire record shapes at the persistence boundary.
//!
//! Records carry the server's status vocabulary as strings. [`TaskRecord::encode`]
//! and [`NewTaskRecord::encode`] are the only places a client status crosses
//! into wire form, and [`TaskRecord::decode`] the only place wire form crosses
//! back, so the round-trip law of the vocabulary mapper holds at this
//! boundary by construction.

use crate::models::{Comment, NewTask, ProjectId, Task, TaskEdit, TaskId, UserId};
use crate::state_machine::resolver::default_progress_for_status;
use crate::state_machine::states::{Priority, TaskStatus};
use crate::state_machine::vocabulary::{client_status_from_wire, to_server_status, MappingError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted task as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Server status vocabulary (wire string).
    pub status: String,
    pub priority: Priority,
    pub progress: u8,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<UserId>,
    pub assigned_by: Option<UserId>,
    pub comments: Vec<Comment>,
    pub project_id: Option<ProjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Encode a client task for a write through the gateway.
    ///
    /// Fails with [`MappingError`] when the status has no server
    /// equivalent; the failure happens before any call is issued.
    pub fn encode(task: &Task) -> Result<Self, MappingError> {
        Ok(Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: to_server_status(task.status)?.wire_name().to_string(),
            priority: task.priority,
            progress: task.progress,
            start_date: task.start_date,
            due_date: task.due_date,
            assignee: task.assignee,
            assigned_by: task.assigned_by,
            comments: task.comments.clone(),
            project_id: task.project_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }

    /// Decode a persisted record into the client shape.
    ///
    /// Total: unknown status strings fall back to `Todo` instead of failing
    /// the read.
    pub fn decode(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            status: client_status_from_wire(&self.status),
            priority: self.priority,
            progress: self.progress.min(100),
            start_date: self.start_date,
            due_date: self.due_date,
            assignee: self.assignee,
            assigned_by: self.assigned_by,
            comments: self.comments,
            project_id: self.project_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Draft record for a create call (no generated fields yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaskRecord {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: Priority,
    pub progress: u8,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<UserId>,
    pub assigned_by: Option<UserId>,
    pub project_id: Option<ProjectId>,
}

impl NewTaskRecord {
    /// Encode a client draft for the gateway's create call.
    pub fn encode(draft: &NewTask) -> Result<Self, MappingError> {
        let status = draft.status.unwrap_or_default();
        let progress = draft
            .progress
            .map(|value| value.min(100))
            .unwrap_or_else(|| default_progress_for_status(status));
        Ok(Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: to_server_status(status)?.wire_name().to_string(),
            priority: draft.priority,
            progress,
            start_date: draft.start_date,
            due_date: draft.due_date,
            assignee: draft.assignee,
            assigned_by: draft.assigned_by,
            project_id: draft.project_id,
        })
    }

    /// Materialize the draft into a stored record, assigning identity and
    /// timestamps. Used by server-side adapters.
    pub fn into_record(self, id: TaskId, now: DateTime<Utc>) -> TaskRecord {
        TaskRecord {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            progress: self.progress,
            start_date: self.start_date,
            due_date: self.due_date,
            assignee: self.assignee,
            assigned_by: self.assigned_by,
            comments: Vec::new(),
            project_id: self.project_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update sent through the gateway's update call.
///
/// Outer `Option` marks presence; the nested `Option` on dates and assignee
/// distinguishes "set" from "clear", matching [`TaskEdit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecordPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<Priority>,
    pub progress: Option<u8>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub assignee: Option<Option<UserId>>,
    pub comments: Option<Vec<Comment>>,
}

impl TaskRecordPatch {
    /// Patch carrying a status change and the progress that accompanies it.
    pub fn status_change(status: TaskStatus, progress: u8) -> Result<Self, MappingError> {
        Ok(Self {
            status: Some(to_server_status(status)?.wire_name().to_string()),
            progress: Some(progress),
            ..Self::default()
        })
    }

    /// Patch replacing the comment thread with the given snapshot.
    pub fn comments_snapshot(comments: &[Comment]) -> Self {
        Self {
            comments: Some(comments.to_vec()),
            ..Self::default()
        }
    }

    /// Patch mirroring a field-wise edit. Status and progress are never part
    /// of an edit; they travel through [`Self::status_change`].
    pub fn from_edit(edit: &TaskEdit) -> Self {
        Self {
            title: edit.title.clone(),
            description: edit.description.clone(),
            priority: edit.priority,
            start_date: edit.start_date,
            due_date: edit.due_date,
            assignee: edit.assignee,
            ..Self::default()
        }
    }

    /// Apply this patch to a stored record. Server-side adapters stamp
    /// `updated_at` themselves after applying.
    pub fn apply_to(&self, record: &mut TaskRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(progress) = self.progress {
            record.progress = progress;
        }
        if let Some(start_date) = self.start_date {
            record.start_date = start_date;
        }
        if let Some(due_date) = self.due_date {
            record.due_date = due_date;
        }
        if let Some(assignee) = self.assignee {
            record.assignee = assignee;
        }
        if let Some(comments) = &self.comments {
            record.comments = comments.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;
    use uuid::Uuid;

    #[test]
    fn test_encode_uses_server_vocabulary() {
        let mut task = Task::from_draft(NewTask::titled("encode"));
        task.status = TaskStatus::Review;
        let record = TaskRecord::encode(&task).unwrap();
        assert_eq!(record.status, "in_review");
    }

    #[test]
    fn test_decode_maps_known_statuses() {
        let task = Task::from_draft(NewTask::titled("decode"));
        let mut record = TaskRecord::encode(&task).unwrap();
        record.status = "complete".to_string();
        assert_eq!(record.decode().status, TaskStatus::Done);
    }

    #[test]
    fn test_decode_falls_back_for_unknown_status() {
        let task = Task::from_draft(NewTask::titled("legacy"));
        let mut record = TaskRecord::encode(&task).unwrap();
        record.status = "archived".to_string();
        assert_eq!(record.clone().decode().status, TaskStatus::Todo);

        record.status = "???".to_string();
        assert_eq!(record.decode().status, TaskStatus::Todo);
    }

    #[test]
    fn test_decode_caps_progress() {
        let task = Task::from_draft(NewTask::titled("overflow"));
        let mut record = TaskRecord::encode(&task).unwrap();
        record.progress = 240;
        assert_eq!(record.decode().progress, 100);
    }

    #[test]
    fn test_status_change_patch() {
        let patch = TaskRecordPatch::status_change(TaskStatus::Done, 100).unwrap();
        assert_eq!(patch.status.as_deref(), Some("complete"));
        assert_eq!(patch.progress, Some(100));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_patch_application() {
        let draft = NewTaskRecord::encode(&NewTask::titled("patch me")).unwrap();
        let mut record = draft.into_record(Uuid::new_v4(), Utc::now());
        let patch = TaskRecordPatch {
            title: Some("patched".to_string()),
            progress: Some(42),
            ..TaskRecordPatch::default()
        };
        patch.apply_to(&mut record);
        assert_eq!(record.title, "patched");
        assert_eq!(record.progress, 42);
        assert_eq!(record.status, "pending");
    }
}
