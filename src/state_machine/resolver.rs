//! Progress-to-status resolution.
//!
//! A task's `progress` scalar is denormalized against its `status`: a slider
//! drag infers status from the continuous value, while a manual status change
//! (drag-and-drop to a column) assigns a representative default progress for
//! that column. The two directions are deliberately not inverses:
//! `status_for_progress(50)` is `Review` while `default_progress_for_status`
//! for `Review` is 80. Callers must not assume round-trip consistency.

use super::states::TaskStatus;

/// Clamp a raw progress value into the valid `[0, 100]` range.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Resolve the canonical status for a progress value.
///
/// Boundaries are exact: 0 is `Todo`, 1-49 is `InProgress`, 50-99 is
/// `Review`, 100 is `Done`. Values above 100 saturate to `Done`.
pub fn status_for_progress(progress: u8) -> TaskStatus {
    match progress {
        0 => TaskStatus::Todo,
        1..=49 => TaskStatus::InProgress,
        50..=99 => TaskStatus::Review,
        _ => TaskStatus::Done,
    }
}

/// Representative progress assigned when a status is set directly rather
/// than through the slider.
pub fn default_progress_for_status(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::InProgress => 50,
        TaskStatus::Review => 80,
        TaskStatus::Done => 100,
    }
}
