//! Broadcast publisher for board change notifications.
//!
//! Readers of the board (column renderers, detail dialogs) hold task ids and
//! re-fetch current values from the controller; the publisher tells them
//! *when* to re-fetch. Events are a closed enum so that an unhandled kind is
//! a compile-time error in subscribers that match exhaustively.

use crate::gateway::Scope;
use crate::models::{CommentId, TaskId};
use crate::state_machine::states::TaskStatus;
use tokio::sync::broadcast;

/// High-throughput publisher for board lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub event: BoardEvent,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Board change notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// The authoritative list was replaced from the gateway.
    BoardRefreshed { scope: Scope, task_count: usize },
    /// A task moved columns (optimistically or reconciled).
    TaskMoved {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// A slider-driven progress update was applied.
    ProgressChanged {
        task_id: TaskId,
        progress: u8,
        status: TaskStatus,
    },
    /// A create call succeeded and the task entered the list.
    TaskAdded { task_id: TaskId },
    /// A task was (optimistically) removed.
    TaskDeleted { task_id: TaskId },
    /// A rolled-back operation restored the task.
    TaskRestored { task_id: TaskId, status: TaskStatus },
    /// A field-wise edit was applied.
    TaskEdited { task_id: TaskId },
    /// A comment was appended.
    CommentAppended {
        task_id: TaskId,
        comment_id: CommentId,
    },
    /// An operation failed; the notice is user-visible.
    OperationFailed {
        task_id: Option<TaskId>,
        notice: String,
    },
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: BoardEvent) {
        let published = PublishedEvent {
            event,
            published_at: chrono::Utc::now(),
        };
        // A send error only means there are no subscribers right now, which
        // is acceptable: the board publishes regardless of listeners.
        let _ = self.sender.send(published);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}
