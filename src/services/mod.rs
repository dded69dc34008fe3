// Service module exports

use chrono::{DateTime, Utc};

pub mod application;
pub mod calendar;
pub mod calendar_view;
pub mod database;
pub mod eligibility;
pub mod period;
pub mod settings;
pub mod state;
pub mod storage;
pub mod winning;

/// Time-based record id: epoch milliseconds, bumped past the largest
/// existing id so ids stay unique within a ledger.
pub(crate) fn next_record_id(now: DateTime<Utc>, existing: impl Iterator<Item = i64>) -> i64 {
    let candidate = now.timestamp_millis();
    match existing.max() {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    }
}
