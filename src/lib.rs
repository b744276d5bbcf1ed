#![allow(clippy::doc_markdown)] // Allow technical terms like TaskRecord in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Taskboard Core
//!
//! Task lifecycle and board synchronization engine for a project/task
//! tracking dashboard.
//!
//! ## Overview
//!
//! The crate defines the finite set of task states and legal transitions,
//! infers a state from a continuous progress value, propagates state changes
//! across independent views with optimistic updates and rollback on failure,
//! and translates between the client-side status vocabulary and the narrower
//! persisted vocabulary at the gateway boundary.
//!
//! ## Architecture
//!
//! Presentation concerns (rendering, routing, forms) live outside this
//! crate. What lives here is the part with invariants: the status
//! vocabularies and their mapping laws, the progress resolver's boundary
//! table, the pure lifecycle transitions, and the synchronization controller
//! that keeps an authoritative task list, its per-status buckets, and the
//! persistence gateway consistent under racing updates.
//!
//! ## Module Organization
//!
//! - [`models`] - Task entity, drafts, edits, comments, users
//! - [`state_machine`] - Status vocabularies, progress resolver, lifecycle transitions
//! - [`gateway`] - Persistence boundary trait, wire records, in-memory adapter
//! - [`sync`] - Board synchronization controller and bucket partition
//! - [`events`] - Typed board change notifications
//! - [`config`] - Validated runtime configuration
//! - [`logging`] - Structured tracing setup
//! - [`error`] - Crate-level error aggregation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_core::config::SyncConfig;
//! use taskboard_core::gateway::{MemoryGateway, Scope};
//! use taskboard_core::models::NewTask;
//! use taskboard_core::state_machine::TaskStatus;
//! use taskboard_core::sync::BoardSyncController;
//!
//! # async fn example() -> taskboard_core::Result<()> {
//! let gateway = Arc::new(MemoryGateway::new());
//! let board = BoardSyncController::new(gateway, SyncConfig::default());
//!
//! board.load(Scope::All).await?;
//! let task = board.add_task(NewTask::titled("ship the feature")).await?;
//! board.move_task(task.id, TaskStatus::InProgress).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod state_machine;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Result, TaskboardError};
pub use events::{BoardEvent, EventPublisher};
pub use gateway::{GatewayError, MemoryGateway, PersistenceGateway, Scope};
pub use models::{Comment, NewTask, Task, TaskEdit, TaskId, User, UserId, ValidationError};
pub use state_machine::{MappingError, Priority, TaskStatus};
pub use sync::{BoardSyncController, BoardView, SyncError, SyncResult};
