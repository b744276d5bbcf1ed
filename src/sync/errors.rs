//! Error types for board synchronization.

use crate::gateway::GatewayError;
use crate::models::{TaskId, ValidationError};
use crate::state_machine::vocabulary::MappingError;
use thiserror::Error;

/// Failure of a controller operation.
///
/// `Mapping` and `Gateway` reach the caller after any optimistic mutation
/// has been handled (rolled back or, for comments, kept best-effort);
/// `Validation` is always raised before state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("no task with id {0} in the loaded board")]
    UnknownTask(TaskId),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("operation dropped before its outcome was known")]
    Aborted,
}

/// Result type for controller operations.
pub type SyncResult<T> = Result<T, SyncError>;
