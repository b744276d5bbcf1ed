//! Client/server status vocabulary translation.
//!
//! The persisted record shape speaks the server's status vocabulary, which is
//! a different string set from the client enum and additionally carries
//! server-only legacy states. Every write through the persistence gateway
//! passes through [`to_server_status`] and every read through
//! [`client_status_from_wire`].
//!
//! The mapping is total and bijective on the overlap: each client status maps
//! to exactly one server status and round-trips back to itself. Server states
//! the client does not recognize decode to the `Todo` fallback rather than
//! failing; unknown persisted data must never take down a board load. The
//! reverse direction fails loudly instead: a client status without a server
//! equivalent would corrupt persisted data if silently substituted, so
//! [`to_server_status`] reports [`MappingError`] at the call site.

use super::states::TaskStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Server-side status vocabulary.
///
/// `Archived` and `Cancelled` exist only server-side; the client renders
/// records carrying them in the `Todo` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Pending,
    InProgress,
    InReview,
    Complete,
    Archived,
    Cancelled,
}

impl ServerStatus {
    /// The string persisted at the gateway boundary.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Complete => "complete",
            Self::Archived => "archived",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a wire string into a known server status.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "in_review" => Some(Self::InReview),
            "complete" => Some(Self::Complete),
            "archived" => Some(Self::Archived),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Error raised when a client status cannot be expressed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("client status '{0}' has no server equivalent")]
    NoServerEquivalent(TaskStatus),
}

/// Translate a client status into the server vocabulary.
///
/// Total over the current client enum; the fallible signature is the
/// contract for the client vocabulary growing ahead of the server's. A
/// missing equivalent must surface as [`MappingError`], never as a silent
/// substitution.
pub fn to_server_status(status: TaskStatus) -> Result<ServerStatus, MappingError> {
    match status {
        TaskStatus::Todo => Ok(ServerStatus::Pending),
        TaskStatus::InProgress => Ok(ServerStatus::InProgress),
        TaskStatus::Review => Ok(ServerStatus::InReview),
        TaskStatus::Done => Ok(ServerStatus::Complete),
    }
}

/// Translate a known server status into the client vocabulary.
///
/// Server-only states fall back to `Todo`.
pub fn to_client_status(status: ServerStatus) -> TaskStatus {
    match status {
        ServerStatus::Pending => TaskStatus::Todo,
        ServerStatus::InProgress => TaskStatus::InProgress,
        ServerStatus::InReview => TaskStatus::Review,
        ServerStatus::Complete => TaskStatus::Done,
        ServerStatus::Archived | ServerStatus::Cancelled => {
            debug!(status = %status, "server-only status rendered as todo");
            TaskStatus::Todo
        }
    }
}

/// Decode a wire status string, falling back to `Todo` for anything the
/// client does not recognize.
pub fn client_status_from_wire(value: &str) -> TaskStatus {
    match ServerStatus::from_wire(value) {
        Some(status) => to_client_status(status),
        None => {
            warn!(status = value, "unrecognized server status, falling back to todo");
            TaskStatus::Todo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_law() {
        for status in TaskStatus::COLUMN_ORDER {
            let server = to_server_status(status).unwrap();
            assert_eq!(client_status_from_wire(server.wire_name()), status);
        }
    }

    #[test]
    fn test_server_only_states_fall_back_to_todo() {
        assert_eq!(client_status_from_wire("archived"), TaskStatus::Todo);
        assert_eq!(client_status_from_wire("cancelled"), TaskStatus::Todo);
    }

    #[test]
    fn test_unrecognized_wire_strings_fall_back_to_todo() {
        assert_eq!(client_status_from_wire("blocked"), TaskStatus::Todo);
        assert_eq!(client_status_from_wire(""), TaskStatus::Todo);
        assert_eq!(client_status_from_wire("DONE"), TaskStatus::Todo);
    }

    #[test]
    fn test_wire_names_parse_back() {
        for server in [
            ServerStatus::Pending,
            ServerStatus::InProgress,
            ServerStatus::InReview,
            ServerStatus::Complete,
            ServerStatus::Archived,
            ServerStatus::Cancelled,
        ] {
            assert_eq!(ServerStatus::from_wire(server.wire_name()), Some(server));
        }
    }

    #[test]
    fn test_mapping_error_display() {
        let err = MappingError::NoServerEquivalent(TaskStatus::Review);
        assert_eq!(
            err.to_string(),
            "client status 'review' has no server equivalent"
        );
    }
}
