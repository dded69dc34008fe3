//! User-correctable errors raised by the reservation engine.
//!
//! Every variant is recoverable: the presentation layer shows the message
//! inline and the user retries with different input.

use thiserror::Error;

use crate::models::slot::SlotId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    #[error("Invalid rental period: {0}")]
    InvalidRange(String),

    #[error("{english_id} already applied for {car_id} in {week_id} ({slot})")]
    DuplicateApplication {
        english_id: String,
        car_id: String,
        week_id: String,
        slot: SlotId,
    },

    #[error("{english_id} has already won {car_id} {count} time(s) this year (limit {limit})")]
    WinningLimitReached {
        english_id: String,
        car_id: String,
        count: usize,
        limit: usize,
    },

    #[error("Required field is empty: {0}")]
    MissingRequiredField(&'static str),

    #[error("Unknown car: {0}")]
    UnknownCar(String),

    #[error("Stored value for '{key}' could not be read: {reason}")]
    InvalidPersistedState { key: String, reason: String },
}
