// Application model
// A submitted reservation request for one car, week and slot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::error::RentalError;
use crate::models::slot::SlotId;

/// A stored reservation request. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Epoch milliseconds at submission, unique within the ledger
    pub id: i64,
    pub korean_name: String,
    pub english_id: String,
    pub car_id: String,
    /// Car name at submission time
    pub car_name: String,
    pub week_id: String,
    pub slot_id: SlotId,
    /// Slot name at submission time
    pub slot_name: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Whether this application targets the given slot occurrence.
    pub fn targets(&self, week_id: &str, slot: SlotId, car_id: &str) -> bool {
        self.week_id == week_id && self.slot_id == slot && self.car_id == car_id
    }

    /// Whether this application was made by `english_id` for the given slot occurrence.
    pub fn is_duplicate_of(&self, request: &ApplicationRequest) -> bool {
        self.english_id == request.english_id
            && self.targets(&request.week_id, request.slot, &request.car_id)
    }
}

/// Form input collected by the submission modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub korean_name: String,
    pub english_id: String,
    pub car_id: String,
    pub week_id: String,
    pub slot: SlotId,
}

impl ApplicationRequest {
    pub fn new(
        korean_name: impl Into<String>,
        english_id: impl Into<String>,
        car_id: impl Into<String>,
        week_id: impl Into<String>,
        slot: SlotId,
    ) -> Self {
        Self {
            korean_name: korean_name.into().trim().to_string(),
            english_id: english_id.into().trim().to_string(),
            car_id: car_id.into(),
            week_id: week_id.into(),
            slot,
        }
    }

    /// Check that every form field was filled in.
    pub fn validate(&self) -> Result<(), RentalError> {
        if self.korean_name.trim().is_empty() {
            return Err(RentalError::MissingRequiredField("koreanName"));
        }
        if self.english_id.trim().is_empty() {
            return Err(RentalError::MissingRequiredField("englishId"));
        }
        if self.week_id.trim().is_empty() {
            return Err(RentalError::MissingRequiredField("weekId"));
        }
        Ok(())
    }
}
