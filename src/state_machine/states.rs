use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-side task status vocabulary.
///
/// The four statuses correspond one-to-one with board columns. The declaration
/// order is the column order used for rendering; business logic never relies
/// on a numeric ordering beyond the progress resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Actively being worked on
    InProgress,
    /// Awaiting review
    Review,
    /// Finished
    Done,
}

impl TaskStatus {
    /// Board column order, left to right.
    pub const COLUMN_ORDER: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    /// Index of this status's column on the board.
    pub fn column_index(&self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Review => 2,
            Self::Done => 3,
        }
    }

    /// Check if this status represents completed work
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this status represents work still open
    pub fn is_open(&self) -> bool {
        !self.is_done()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Review => write!(f, "review"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

/// Default status for new tasks
impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

/// Task priority, an axis independent of status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_matches_indices() {
        for (idx, status) in TaskStatus::COLUMN_ORDER.iter().enumerate() {
            assert_eq!(status.column_index(), idx);
        }
    }

    #[test]
    fn test_status_predicates() {
        assert!(TaskStatus::Done.is_done());
        assert!(!TaskStatus::Review.is_done());
        assert!(TaskStatus::Todo.is_open());
        assert!(TaskStatus::InProgress.is_open());
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!("review".parse::<TaskStatus>().unwrap(), TaskStatus::Review);
        assert!("archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let status = TaskStatus::InProgress;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let parsed: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn test_priority_string_conversion() {
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
