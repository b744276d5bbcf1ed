//! Event system: typed board change notifications over a broadcast channel.

pub mod publisher;

pub use publisher::{BoardEvent, EventPublisher, PublishedEvent};
