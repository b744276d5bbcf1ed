//! Operation types queued on a task's lane.

use super::errors::SyncResult;
use crate::models::{TaskEdit, UserId};
use crate::state_machine::states::TaskStatus;
use std::collections::VecDeque;
use tokio::sync::oneshot;

/// A mutation targeting a single task, serialized through its lane.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOperation {
    /// Column move or direct status change.
    Move { status: TaskStatus },
    /// Progress slider change; the raw value is clamped on application.
    SetProgress { value: i64 },
    /// Field-wise edit.
    Edit { edit: TaskEdit },
    /// Comment append (best-effort persistence).
    AppendComment {
        text: String,
        author: Option<UserId>,
    },
    /// Task removal.
    Delete,
}

impl TaskOperation {
    /// Short operation name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::SetProgress { .. } => "set_progress",
            Self::Edit { .. } => "edit",
            Self::AppendComment { .. } => "append_comment",
            Self::Delete => "delete",
        }
    }
}

/// An operation waiting on a lane, with the channel that reports its outcome
/// back to the submitter.
pub(crate) struct QueuedOperation {
    pub op: TaskOperation,
    pub done: oneshot::Sender<SyncResult<()>>,
}

/// Per-task serialization lane.
///
/// `draining` marks that some submitter's future is currently working the
/// queue; later submitters only enqueue and await their outcome.
#[derive(Default)]
pub(crate) struct OperationLane {
    pub draining: bool,
    pub queue: VecDeque<QueuedOperation>,
}
