//! Shared factories for integration tests.

use chrono::{DateTime, Duration, Utc};
use taskboard_core::gateway::{NewTaskRecord, TaskRecord};
use taskboard_core::models::NewTask;
use uuid::Uuid;

/// Build a persisted record with defaults and the given title.
pub fn record_titled(title: &str) -> TaskRecord {
    NewTaskRecord::encode(&NewTask::titled(title))
        .unwrap()
        .into_record(Uuid::new_v4(), Utc::now())
}

/// Build a persisted record carrying an explicit wire status and progress.
pub fn record_with_status(title: &str, wire_status: &str, progress: u8) -> TaskRecord {
    let mut record = record_titled(title);
    record.status = wire_status.to_string();
    record.progress = progress;
    record
}

/// Build records whose `created_at` stamps are strictly increasing in the
/// given order, so a load returns them deterministically ordered.
pub fn ordered_records(titles: &[&str]) -> Vec<TaskRecord> {
    let base: DateTime<Utc> = Utc::now();
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let mut record = record_titled(title);
            record.created_at = base + Duration::milliseconds(index as i64);
            record.updated_at = record.created_at;
            record
        })
        .collect()
}
