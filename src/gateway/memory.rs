//! In-memory gateway adapter.
//!
//! Reference implementation of the persistence boundary backed by a
//! concurrent map. Serves examples and happy-path tests; failure injection
//! lives in the test mock, not here.

use super::record::{NewTaskRecord, TaskRecord, TaskRecordPatch};
use super::{GatewayError, GatewayResult, PersistenceGateway, Scope};
use crate::models::TaskId;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

/// Gateway adapter storing records in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    records: DashMap<TaskId, TaskRecord>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload records, e.g. for tests or demos.
    pub fn seeded(records: impl IntoIterator<Item = TaskRecord>) -> Self {
        let gateway = Self::new();
        for record in records {
            gateway.records.insert(record.id, record);
        }
        gateway
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn fetch_all(&self, scope: Scope) -> GatewayResult<Vec<TaskRecord>> {
        let mut records: Vec<TaskRecord> = self
            .records
            .iter()
            .filter(|entry| scope.matches(entry.value().project_id))
            .map(|entry| entry.value().clone())
            .collect();
        // Deterministic ordering for bucket rebuilds across refreshes.
        records.sort_by_key(|record| (record.created_at, record.id));
        Ok(records)
    }

    async fn create(&self, draft: NewTaskRecord) -> GatewayResult<TaskRecord> {
        let record = draft.into_record(Uuid::new_v4(), Utc::now());
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: TaskId, patch: TaskRecordPatch) -> GatewayResult<TaskRecord> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                patch.apply_to(entry.value_mut());
                entry.value_mut().updated_at = Utc::now();
                Ok(entry.value().clone())
            }
            None => Err(GatewayError::NotFound(id)),
        }
    }

    async fn delete(&self, id: TaskId) -> GatewayResult<()> {
        match self.records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;

    fn draft(title: &str) -> NewTaskRecord {
        NewTaskRecord::encode(&NewTask::titled(title)).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let gateway = MemoryGateway::new();
        let created = gateway.create(draft("persist me")).await.unwrap();
        let fetched = gateway.fetch_all(Scope::All).await.unwrap();
        assert_eq!(fetched, vec![created]);
    }

    #[tokio::test]
    async fn test_scope_filters_fetch() {
        let gateway = MemoryGateway::new();
        let project = Uuid::new_v4();
        let mut scoped = draft("scoped");
        scoped.project_id = Some(project);
        gateway.create(scoped).await.unwrap();
        gateway.create(draft("unscoped")).await.unwrap();

        assert_eq!(gateway.fetch_all(Scope::All).await.unwrap().len(), 2);
        let filtered = gateway.fetch_all(Scope::Project(project)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].project_id, Some(project));
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_stamps() {
        let gateway = MemoryGateway::new();
        let created = gateway.create(draft("stampable")).await.unwrap();
        let patch = TaskRecordPatch {
            progress: Some(60),
            status: Some("in_review".to_string()),
            ..TaskRecordPatch::default()
        };
        let updated = gateway.update(created.id, patch).await.unwrap();
        assert_eq!(updated.progress, 60);
        assert_eq!(updated.status, "in_review");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_record_reports_not_found() {
        let gateway = MemoryGateway::new();
        let id = Uuid::new_v4();
        assert_eq!(
            gateway.delete(id).await,
            Err(GatewayError::NotFound(id))
        );
        assert_eq!(
            gateway.update(id, TaskRecordPatch::default()).await,
            Err(GatewayError::NotFound(id))
        );
    }
}
