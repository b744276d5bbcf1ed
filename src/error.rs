//! Crate-level error aggregation.
//!
//! Component modules own their error types; this enum is the single surface
//! callers can hold when they do not care which layer failed. Every variant
//! converts from its component type, so `?` composes across the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error(transparent)]
    Mapping(#[from] crate::state_machine::MappingError),
    #[error(transparent)]
    Gateway(#[from] crate::gateway::GatewayError),
    #[error(transparent)]
    Validation(#[from] crate::models::ValidationError),
    #[error(transparent)]
    Sync(#[from] crate::sync::SyncError),
    #[error(transparent)]
    Configuration(#[from] crate::config::ConfigurationError),
}

pub type Result<T> = std::result::Result<T, TaskboardError>;
