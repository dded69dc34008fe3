//! Winning history.
//!
//! Winners are drawn outside the system and entered by an admin afterwards.
//! Each employee may win the same car a limited number of times inside the
//! annual counting window.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::error::RentalError;

/// Wins allowed per employee and car inside the window.
pub const DEFAULT_WINNING_LIMIT: usize = 2;

/// A historical award for one employee and car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningRecord {
    pub id: i64,
    pub english_id: String,
    pub korean_name: String,
    pub car_id: String,
    /// Car name at entry time
    pub car_name: String,
    pub winning_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Admin form input for a manual winning entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinRequest {
    pub english_id: String,
    pub korean_name: String,
    pub car_id: String,
    pub winning_date: NaiveDate,
}

impl WinRequest {
    pub fn new(
        english_id: impl Into<String>,
        korean_name: impl Into<String>,
        car_id: impl Into<String>,
        winning_date: NaiveDate,
    ) -> Self {
        Self {
            english_id: english_id.into().trim().to_string(),
            korean_name: korean_name.into().trim().to_string(),
            car_id: car_id.into(),
            winning_date,
        }
    }

    pub fn validate(&self) -> Result<(), RentalError> {
        if self.english_id.is_empty() {
            return Err(RentalError::MissingRequiredField("englishId"));
        }
        if self.korean_name.is_empty() {
            return Err(RentalError::MissingRequiredField("koreanName"));
        }
        Ok(())
    }
}

/// Counting window and cap for wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningPolicy {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub limit: usize,
}

impl WinningPolicy {
    /// Whether a winning date counts toward the limit. Both ends inclusive.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.window_start && date <= self.window_end
    }
}

impl Default for WinningPolicy {
    fn default() -> Self {
        Self {
            window_start: default_window_start(),
            window_end: default_window_end(),
            limit: DEFAULT_WINNING_LIMIT,
        }
    }
}

pub fn default_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).expect("2025-01-06 is a valid date")
}

pub fn default_window_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).expect("2026-01-05 is a valid date")
}

/// Wins counted for one employee and car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningCount {
    pub count: usize,
    pub limit_reached: bool,
    pub records: Vec<WinningRecord>,
}
