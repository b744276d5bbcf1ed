//! # Board Synchronization Controller
//!
//! Owns the authoritative in-memory task list for one scope and keeps the
//! derived status buckets in sync while coordinating with the persistence
//! gateway under an optimistic-update discipline:
//!
//! - column moves, progress changes, edits, comments, and deletes apply
//!   locally first (zero-latency UI feedback) and roll back if the gateway
//!   rejects them; comments are the exception and are kept best-effort;
//! - creates are deliberately **not** optimistic: a ghost task from a
//!   double-submission is worse than brief latency, so a task enters the
//!   list only once the gateway returned it with an id;
//! - failed refreshes keep the previous list instead of flashing an empty
//!   board.
//!
//! Operations targeting the same task are serialized through a per-task
//! lane: a second operation submitted while one is in flight queues behind
//! it and is applied only after the first's outcome (success or rollback)
//! has been committed. Operations on different tasks proceed independently.
//! There is no explicit cancellation of an in-flight gateway call; the
//! configured deadline bounds how long a lane can stay blocked.

use super::board::BoardView;
use super::errors::{SyncError, SyncResult};
use super::types::{OperationLane, QueuedOperation, TaskOperation};
use crate::config::SyncConfig;
use crate::events::{BoardEvent, EventPublisher, PublishedEvent};
use crate::gateway::{
    GatewayError, GatewayResult, NewTaskRecord, PersistenceGateway, Scope, TaskRecord,
    TaskRecordPatch,
};
use crate::models::{NewTask, Task, TaskEdit, TaskId, UserId};
use crate::state_machine::lifecycle;
use crate::state_machine::states::TaskStatus;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

/// Authoritative board state behind the controller's lock.
#[derive(Debug, Default)]
struct BoardState {
    scope: Scope,
    tasks: Vec<Task>,
    board: BoardView,
    load_error: Option<String>,
}

fn rebuild_board(state: &mut BoardState) {
    let board = BoardView::partition(&state.tasks);
    state.board = board;
}

/// Synchronization controller for one board.
///
/// All other components hold read-only snapshots or task ids and re-fetch
/// current values from here; nothing else mutates the authoritative list.
pub struct BoardSyncController<G: PersistenceGateway> {
    gateway: Arc<G>,
    config: SyncConfig,
    publisher: EventPublisher,
    state: RwLock<BoardState>,
    lanes: Mutex<HashMap<TaskId, OperationLane>>,
}

impl<G: PersistenceGateway> BoardSyncController<G> {
    pub fn new(gateway: Arc<G>, config: SyncConfig) -> Self {
        let publisher = EventPublisher::new(config.event_channel_capacity);
        Self {
            gateway,
            config,
            publisher,
            state: RwLock::new(BoardState::default()),
            lanes: Mutex::new(HashMap::new()),
        }
    }

    // ---- read surface -----------------------------------------------------

    /// Snapshot of the authoritative task list.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.read().tasks.clone()
    }

    /// Current value of a single task.
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state
            .read()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
    }

    /// Snapshot of the per-status buckets.
    pub fn board(&self) -> BoardView {
        self.state.read().board.clone()
    }

    /// Scope of the last successful load.
    pub fn scope(&self) -> Scope {
        self.state.read().scope
    }

    /// Error flag left by a failed refresh, cleared by the next successful
    /// one.
    pub fn last_load_error(&self) -> Option<String> {
        self.state.read().load_error.clone()
    }

    /// Subscribe to board change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.publisher.subscribe()
    }

    // ---- load -------------------------------------------------------------

    /// Replace the authoritative list from the gateway.
    ///
    /// On failure the previous list is kept (no empty board on a transient
    /// network error); the error is recorded in [`Self::last_load_error`]
    /// and returned.
    pub async fn load(&self, scope: Scope) -> SyncResult<usize> {
        match self.with_deadline(self.gateway.fetch_all(scope)).await {
            Ok(records) => {
                let tasks: Vec<Task> = records.into_iter().map(TaskRecord::decode).collect();
                let count = tasks.len();
                {
                    let mut state = self.state.write();
                    state.scope = scope;
                    state.tasks = tasks;
                    state.load_error = None;
                    rebuild_board(&mut state);
                }
                self.publisher.publish(BoardEvent::BoardRefreshed {
                    scope,
                    task_count: count,
                });
                info!(%scope, task_count = count, "board refreshed");
                Ok(count)
            }
            Err(err) => {
                warn!(%scope, error = %err, "board refresh failed, keeping previous task list");
                self.state.write().load_error = Some(err.to_string());
                self.publisher.publish(BoardEvent::OperationFailed {
                    task_id: None,
                    notice: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    // ---- per-task operations ----------------------------------------------

    /// Move a task to a new status column (drag-and-drop).
    pub async fn move_task(&self, id: TaskId, new_status: TaskStatus) -> SyncResult<()> {
        self.submit(id, TaskOperation::Move { status: new_status })
            .await
    }

    /// Apply a progress slider change; status is derived from the value.
    pub async fn set_progress(&self, id: TaskId, value: i64) -> SyncResult<()> {
        self.submit(id, TaskOperation::SetProgress { value }).await
    }

    /// Apply a field-wise edit.
    pub async fn edit_task(&self, id: TaskId, edit: TaskEdit) -> SyncResult<()> {
        self.submit(id, TaskOperation::Edit { edit }).await
    }

    /// Append a comment. Persistence is best-effort: on gateway failure the
    /// local comment is kept and the error surfaced.
    pub async fn add_comment(
        &self,
        id: TaskId,
        text: impl Into<String>,
        author: Option<UserId>,
    ) -> SyncResult<()> {
        self.submit(
            id,
            TaskOperation::AppendComment {
                text: text.into(),
                author,
            },
        )
        .await
    }

    /// Delete a task, evicting it from every bucket atomically.
    pub async fn delete_task(&self, id: TaskId) -> SyncResult<()> {
        self.submit(id, TaskOperation::Delete).await
    }

    /// Create a task. Not optimistic: the list gains an entry only after the
    /// gateway returned the record with its assigned id.
    pub async fn add_task(&self, draft: NewTask) -> SyncResult<Task> {
        draft.validate()?;
        let record_draft = NewTaskRecord::encode(&draft)?;
        match self.with_deadline(self.gateway.create(record_draft)).await {
            Ok(record) => {
                let task = record.decode();
                {
                    let mut state = self.state.write();
                    state.tasks.push(task.clone());
                    rebuild_board(&mut state);
                }
                self.publisher
                    .publish(BoardEvent::TaskAdded { task_id: task.id });
                info!(task_id = %task.id, title = %task.title, "task created");
                Ok(task)
            }
            Err(err) => {
                self.fail(None, &err, "create failed, no task inserted");
                Err(err.into())
            }
        }
    }

    // ---- lane plumbing ----------------------------------------------------

    /// Enqueue an operation on the task's lane and await its outcome.
    ///
    /// Whichever submitter finds the lane idle becomes the drainer and works
    /// the queue (its own operation included) to completion; everyone else
    /// just waits on their ticket.
    async fn submit(&self, id: TaskId, op: TaskOperation) -> SyncResult<()> {
        let kind = op.kind();
        let (done, outcome) = oneshot::channel();
        let should_drain = {
            let mut lanes = self.lanes.lock();
            let lane = lanes.entry(id).or_default();
            lane.queue.push_back(QueuedOperation { op, done });
            if lane.draining {
                debug!(task_id = %id, op = kind, "operation queued behind in-flight lane");
                false
            } else {
                lane.draining = true;
                true
            }
        };
        if should_drain {
            self.drain(id).await;
        }
        match outcome.await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Aborted),
        }
    }

    async fn drain(&self, id: TaskId) {
        loop {
            let next = {
                let mut lanes = self.lanes.lock();
                match lanes.get_mut(&id) {
                    Some(lane) => match lane.queue.pop_front() {
                        Some(queued) => Some(queued),
                        None => {
                            lanes.remove(&id);
                            None
                        }
                    },
                    None => None,
                }
            };
            let Some(queued) = next else { break };
            let result = self.execute(id, queued.op).await;
            if queued.done.send(result).is_err() {
                debug!(task_id = %id, "operation submitter dropped before receiving outcome");
            }
        }
    }

    async fn execute(&self, id: TaskId, op: TaskOperation) -> SyncResult<()> {
        match op {
            TaskOperation::Move { status } => self.execute_move(id, status).await,
            TaskOperation::SetProgress { value } => self.execute_set_progress(id, value).await,
            TaskOperation::Edit { edit } => self.execute_edit(id, edit).await,
            TaskOperation::AppendComment { text, author } => {
                self.execute_append_comment(id, text, author).await
            }
            TaskOperation::Delete => self.execute_delete(id).await,
        }
    }

    // ---- operation bodies -------------------------------------------------

    async fn execute_move(&self, id: TaskId, new_status: TaskStatus) -> SyncResult<()> {
        let snapshot = self.task(id).ok_or(SyncError::UnknownTask(id))?;
        let moved = lifecycle::apply_status_change(&snapshot, new_status, None);
        // Encode before touching state so a mapping failure needs no rollback.
        let patch = TaskRecordPatch::status_change(moved.status, moved.progress)?;

        self.commit_task(moved);
        self.publisher.publish(BoardEvent::TaskMoved {
            task_id: id,
            from: snapshot.status,
            to: new_status,
        });
        debug!(task_id = %id, from = %snapshot.status, to = %new_status, "optimistic move applied");

        match self.with_deadline(self.gateway.update(id, patch)).await {
            Ok(record) => {
                self.adopt_server_stamp(id, record.updated_at);
                Ok(())
            }
            Err(err) => {
                self.restore_task(&snapshot);
                self.fail(Some(id), &err, "move rejected, task snapped back");
                Err(err.into())
            }
        }
    }

    async fn execute_set_progress(&self, id: TaskId, value: i64) -> SyncResult<()> {
        let snapshot = self.task(id).ok_or(SyncError::UnknownTask(id))?;
        let updated = lifecycle::apply_progress_change(&snapshot, value);
        let patch = TaskRecordPatch::status_change(updated.status, updated.progress)?;
        let (progress, status) = (updated.progress, updated.status);

        self.commit_task(updated);
        self.publisher.publish(BoardEvent::ProgressChanged {
            task_id: id,
            progress,
            status,
        });

        match self.with_deadline(self.gateway.update(id, patch)).await {
            Ok(record) => {
                self.adopt_server_stamp(id, record.updated_at);
                Ok(())
            }
            Err(err) => {
                self.restore_task(&snapshot);
                self.fail(Some(id), &err, "progress change rejected, value restored");
                Err(err.into())
            }
        }
    }

    async fn execute_edit(&self, id: TaskId, edit: TaskEdit) -> SyncResult<()> {
        let snapshot = self.task(id).ok_or(SyncError::UnknownTask(id))?;
        // Validation happens before any mutation; a rejection here means no
        // state was touched and no gateway call is issued.
        let edited = lifecycle::apply_edit(&snapshot, &edit)?;
        let patch = TaskRecordPatch::from_edit(&edit);

        self.commit_task(edited);
        self.publisher
            .publish(BoardEvent::TaskEdited { task_id: id });

        match self.with_deadline(self.gateway.update(id, patch)).await {
            Ok(record) => {
                self.adopt_server_stamp(id, record.updated_at);
                Ok(())
            }
            Err(err) => {
                self.restore_task(&snapshot);
                self.fail(Some(id), &err, "edit rejected, fields restored");
                Err(err.into())
            }
        }
    }

    async fn execute_append_comment(
        &self,
        id: TaskId,
        text: String,
        author: Option<UserId>,
    ) -> SyncResult<()> {
        let snapshot = self.task(id).ok_or(SyncError::UnknownTask(id))?;
        let commented = lifecycle::append_comment(&snapshot, text, author);
        let patch = TaskRecordPatch::comments_snapshot(&commented.comments);
        let comment_id = commented.comments.last().map(|comment| comment.id);

        self.commit_task(commented);
        if let Some(comment_id) = comment_id {
            self.publisher.publish(BoardEvent::CommentAppended {
                task_id: id,
                comment_id,
            });
        }

        match self.with_deadline(self.gateway.update(id, patch)).await {
            Ok(record) => {
                self.adopt_server_stamp(id, record.updated_at);
                Ok(())
            }
            Err(err) => {
                // Best-effort: the local comment stays, but the failure is
                // never silent.
                warn!(task_id = %id, error = %err, "comment persist failed, keeping local copy");
                self.publisher.publish(BoardEvent::OperationFailed {
                    task_id: Some(id),
                    notice: format!("comment not persisted: {err}"),
                });
                Err(err.into())
            }
        }
    }

    async fn execute_delete(&self, id: TaskId) -> SyncResult<()> {
        let (snapshot, bucket_pos) = {
            let state = self.state.read();
            let Some(task) = state.tasks.iter().find(|task| task.id == id) else {
                return Err(SyncError::UnknownTask(id));
            };
            let pos = state
                .board
                .position_of(id)
                .map(|(_, index)| index)
                .unwrap_or(0);
            (task.clone(), pos)
        };

        {
            let mut state = self.state.write();
            state.tasks.retain(|task| task.id != id);
            rebuild_board(&mut state);
        }
        self.publisher.publish(BoardEvent::TaskDeleted { task_id: id });
        debug!(task_id = %id, "optimistic delete applied");

        match self.with_deadline(self.gateway.delete(id)).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.restore_at_bucket_position(snapshot.clone(), bucket_pos);
                self.publisher.publish(BoardEvent::TaskRestored {
                    task_id: id,
                    status: snapshot.status,
                });
                self.fail(Some(id), &err, "delete rejected, task restored");
                Err(err.into())
            }
        }
    }

    // ---- state helpers ----------------------------------------------------

    /// Replace a task in the authoritative list and rebuild the buckets.
    fn commit_task(&self, task: Task) {
        let mut state = self.state.write();
        if let Some(slot) = state.tasks.iter_mut().find(|slot| slot.id == task.id) {
            *slot = task;
        }
        rebuild_board(&mut state);
    }

    /// Restore a pre-operation snapshot verbatim (including `updated_at`).
    fn restore_task(&self, snapshot: &Task) {
        self.commit_task(snapshot.clone());
        self.publisher.publish(BoardEvent::TaskRestored {
            task_id: snapshot.id,
            status: snapshot.status,
        });
    }

    /// Re-insert a deleted task so it reappears at its prior position within
    /// its status bucket. Concurrent moves may have changed list ordering,
    /// so the prior list index is not meaningful; the bucket position is.
    fn restore_at_bucket_position(&self, task: Task, bucket_pos: usize) {
        let mut state = self.state.write();
        let mut seen = 0usize;
        let mut insert_at = state.tasks.len();
        for (index, existing) in state.tasks.iter().enumerate() {
            if existing.status == task.status {
                if seen == bucket_pos {
                    insert_at = index;
                    break;
                }
                seen += 1;
            }
        }
        state.tasks.insert(insert_at, task);
        rebuild_board(&mut state);
    }

    /// Adopt the server's authoritative timestamp after a successful write.
    fn adopt_server_stamp(&self, id: TaskId, stamp: DateTime<Utc>) {
        let mut state = self.state.write();
        if let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) {
            task.updated_at = stamp;
        }
    }

    fn fail(&self, task_id: Option<TaskId>, err: &GatewayError, context: &str) {
        warn!(error = %err, context, "gateway operation failed");
        self.publisher.publish(BoardEvent::OperationFailed {
            task_id,
            notice: format!("{context}: {err}"),
        });
    }

    /// Bound a gateway call by the configured deadline so a hung call cannot
    /// block a task's lane indefinitely.
    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = GatewayResult<T>>,
    ) -> GatewayResult<T> {
        match tokio::time::timeout(self.config.gateway_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::TimedOut(self.config.gateway_timeout_ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;

    async fn seeded_controller(
        titles: &[&str],
    ) -> (Arc<BoardSyncController<MemoryGateway>>, Vec<TaskId>) {
        let gateway = Arc::new(MemoryGateway::new());
        let controller = Arc::new(BoardSyncController::new(
            gateway,
            SyncConfig::default(),
        ));
        let mut ids = Vec::new();
        for title in titles {
            let task = controller.add_task(NewTask::titled(*title)).await.unwrap();
            ids.push(task.id);
        }
        (controller, ids)
    }

    #[tokio::test]
    async fn test_move_updates_board_and_store() {
        let (controller, ids) = seeded_controller(&["move me"]).await;
        controller
            .move_task(ids[0], TaskStatus::InProgress)
            .await
            .unwrap();

        let task = controller.task(ids[0]).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.progress, 50);
        assert_eq!(controller.board().column(TaskStatus::InProgress), &[ids[0]]);
        assert!(controller.board().column(TaskStatus::Todo).is_empty());
    }

    #[tokio::test]
    async fn test_load_round_trips_through_gateway() {
        let (controller, ids) = seeded_controller(&["a", "b"]).await;
        controller.move_task(ids[1], TaskStatus::Done).await.unwrap();

        let count = controller.load(Scope::All).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(controller.task(ids[1]).unwrap().status, TaskStatus::Done);
        assert!(controller.last_load_error().is_none());
    }

    #[tokio::test]
    async fn test_delete_evicts_from_buckets() {
        let (controller, ids) = seeded_controller(&["keep", "drop"]).await;
        controller.delete_task(ids[1]).await.unwrap();

        assert!(controller.task(ids[1]).is_none());
        assert!(!controller.board().contains(ids[1]));
        assert_eq!(controller.board().task_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_task_is_reported() {
        let (controller, _) = seeded_controller(&[]).await;
        let missing = uuid::Uuid::new_v4();
        assert_eq!(
            controller.move_task(missing, TaskStatus::Done).await,
            Err(SyncError::UnknownTask(missing))
        );
    }
}
