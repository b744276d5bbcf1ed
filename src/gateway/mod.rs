//! # Persistence Gateway
//!
//! Abstract boundary to whatever stores task records. The synchronization
//! controller only ever talks to the [`PersistenceGateway`] trait; concrete
//! adapters (HTTP client, in-memory store, test mock) live behind it.
//!
//! All calls are asynchronous and report failure as a value
//! ([`GatewayError`]), never as a panic that would unwind board state, so
//! the controller is always in a position to decide to roll back. Record
//! shapes at this boundary speak the **server** status vocabulary; encoding
//! and decoding pass through the vocabulary mapper.

pub mod memory;
pub mod record;

use crate::models::{ProjectId, TaskId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use memory::MemoryGateway;
pub use record::{NewTaskRecord, TaskRecord, TaskRecordPatch};

/// Which tasks a board shows: everything, or a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    All,
    Project(ProjectId),
}

impl Scope {
    /// Whether a record with the given project reference belongs to this
    /// scope. Unscoped (independent) tasks appear only under `All`.
    pub fn matches(&self, project_id: Option<ProjectId>) -> bool {
        match self {
            Self::All => true,
            Self::Project(scoped) => project_id == Some(*scoped),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Project(id) => write!(f, "project:{id}"),
        }
    }
}

/// Failure reported by a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("server rejected the request: {0}")]
    Rejected(String),
    #[error("no persisted record for task {0}")]
    NotFound(TaskId),
    #[error("gateway call exceeded the {0}ms deadline")]
    TimedOut(u64),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Asynchronous persistence boundary for task records.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Fetch every record in the scope.
    async fn fetch_all(&self, scope: Scope) -> GatewayResult<Vec<TaskRecord>>;

    /// Persist a new record and return it with its assigned id.
    async fn create(&self, draft: NewTaskRecord) -> GatewayResult<TaskRecord>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, id: TaskId, patch: TaskRecordPatch) -> GatewayResult<TaskRecord>;

    /// Remove a record.
    async fn delete(&self, id: TaskId) -> GatewayResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_scope_matching() {
        let project = Uuid::new_v4();
        assert!(Scope::All.matches(Some(project)));
        assert!(Scope::All.matches(None));
        assert!(Scope::Project(project).matches(Some(project)));
        assert!(!Scope::Project(project).matches(None));
        assert!(!Scope::Project(project).matches(Some(Uuid::new_v4())));
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::TimedOut(30_000);
        assert_eq!(err.to_string(), "gateway call exceeded the 30000ms deadline");
    }
}
