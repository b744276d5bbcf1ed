//! User model and weak-reference helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque user identifier.
pub type UserId = Uuid;

/// A user as known to the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }
}

/// Label for an assignee looked up through a weak reference.
///
/// A task outlives a deleted user, so a dangling reference resolves to
/// "Unassigned" rather than an error.
pub fn assignee_label(assignee: Option<&User>) -> &str {
    assignee.map_or("Unassigned", |user| user.name.as_str())
}
