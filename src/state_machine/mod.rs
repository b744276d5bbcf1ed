// State machine module for the task lifecycle engine
//
// Defines the closed status vocabularies on both sides of the persistence
// boundary, the progress-to-status resolver, and the pure transition
// operations applied to a single task record.

pub mod lifecycle;
pub mod resolver;
pub mod states;
pub mod vocabulary;

// Re-export main types for convenient access
pub use lifecycle::{apply_edit, apply_progress_change, apply_status_change, append_comment};
pub use resolver::{clamp_progress, default_progress_for_status, status_for_progress};
pub use states::{Priority, TaskStatus};
pub use vocabulary::{
    client_status_from_wire, to_client_status, to_server_status, MappingError, ServerStatus,
};
