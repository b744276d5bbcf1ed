//! Mock gateway for testing the synchronization controller.
//!
//! Records every call, serves records from shared in-memory state, and
//! supports scripted failures and configurable latency so tests can exercise
//! the optimistic-update and rollback paths without a real backend.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskboard_core::gateway::{
    GatewayError, GatewayResult, NewTaskRecord, PersistenceGateway, Scope, TaskRecord,
    TaskRecordPatch,
};
use taskboard_core::models::TaskId;
use uuid::Uuid;

/// One observed gateway call, reduced to the fields tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    FetchAll(Scope),
    Create { title: String },
    Update {
        id: TaskId,
        status: Option<String>,
        progress: Option<u8>,
    },
    Delete(TaskId),
}

/// Mock gateway state for tracking calls and simulating behavior
#[derive(Debug, Default)]
pub struct MockGatewayState {
    pub records: HashMap<TaskId, TaskRecord>,
    pub calls: Vec<GatewayCall>,
    pub scripted_failures: VecDeque<GatewayError>,
    /// Simulated latency applied to every call.
    pub call_delay: Option<Duration>,
}

/// Mock gateway implementation for testing
pub struct MockGateway {
    state: Arc<Mutex<MockGatewayState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockGatewayState::default())),
        }
    }

    /// Set latency for simulating slow calls.
    pub fn with_call_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().call_delay = Some(delay);
        self
    }

    /// Change the simulated latency mid-test.
    pub fn set_call_delay(&self, delay: Option<Duration>) {
        self.state.lock().unwrap().call_delay = delay;
    }

    /// Preload a record without recording a call.
    pub fn seed_record(&self, record: TaskRecord) {
        let mut state = self.state.lock().unwrap();
        state.records.insert(record.id, record);
    }

    /// Script the next call to fail with the given error.
    pub fn fail_next(&self, err: GatewayError) {
        let mut state = self.state.lock().unwrap();
        state.scripted_failures.push_back(err);
    }

    /// All calls observed so far.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the update calls, in order.
    pub fn update_calls(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, GatewayCall::Update { .. }))
            .collect()
    }

    /// Current server-side copy of a record.
    pub fn record(&self, id: TaskId) -> Option<TaskRecord> {
        self.state.lock().unwrap().records.get(&id).cloned()
    }

    async fn simulate_latency(&self) {
        let delay = self.state.lock().unwrap().call_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn take_scripted_failure(&self) -> Option<GatewayError> {
        self.state.lock().unwrap().scripted_failures.pop_front()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceGateway for MockGateway {
    async fn fetch_all(&self, scope: Scope) -> GatewayResult<Vec<TaskRecord>> {
        self.simulate_latency().await;
        self.state
            .lock()
            .unwrap()
            .calls
            .push(GatewayCall::FetchAll(scope));
        if let Some(err) = self.take_scripted_failure() {
            return Err(err);
        }
        let mut records: Vec<TaskRecord> = {
            let state = self.state.lock().unwrap();
            state
                .records
                .values()
                .filter(|record| scope.matches(record.project_id))
                .cloned()
                .collect()
        };
        records.sort_by_key(|record| (record.created_at, record.id));
        Ok(records)
    }

    async fn create(&self, draft: NewTaskRecord) -> GatewayResult<TaskRecord> {
        self.simulate_latency().await;
        self.state.lock().unwrap().calls.push(GatewayCall::Create {
            title: draft.title.clone(),
        });
        if let Some(err) = self.take_scripted_failure() {
            return Err(err);
        }
        let record = draft.into_record(Uuid::new_v4(), Utc::now());
        self.state
            .lock()
            .unwrap()
            .records
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: TaskId, patch: TaskRecordPatch) -> GatewayResult<TaskRecord> {
        self.simulate_latency().await;
        self.state.lock().unwrap().calls.push(GatewayCall::Update {
            id,
            status: patch.status.clone(),
            progress: patch.progress,
        });
        if let Some(err) = self.take_scripted_failure() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        match state.records.get_mut(&id) {
            Some(record) => {
                patch.apply_to(record);
                record.updated_at = Utc::now();
                Ok(record.clone())
            }
            None => Err(GatewayError::NotFound(id)),
        }
    }

    async fn delete(&self, id: TaskId) -> GatewayResult<()> {
        self.simulate_latency().await;
        self.state.lock().unwrap().calls.push(GatewayCall::Delete(id));
        if let Some(err) = self.take_scripted_failure() {
            return Err(err);
        }
        match self.state.lock().unwrap().records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::NotFound(id)),
        }
    }
}
