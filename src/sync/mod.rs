// Board synchronization module
//
// The controller owns the authoritative task list and the derived status
// buckets, and coordinates optimistic mutations with the persistence
// gateway. Everything else in this module supports it: the bucket partition,
// the per-task operation lane types, and the error taxonomy.

pub mod board;
pub mod controller;
pub mod errors;
pub mod types;

pub use board::{BoardColumn, BoardView};
pub use controller::BoardSyncController;
pub use errors::{SyncError, SyncResult};
pub use types::TaskOperation;
