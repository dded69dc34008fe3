// Test fixtures - reusable test data
// Provides consistent dates, periods and requests across test files

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use car_rental_calendar::models::application::ApplicationRequest;
use car_rental_calendar::models::slot::SlotId;
use car_rental_calendar::models::winning::WinRequest;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday 2025-11-03, first day of the sample period
    pub fn november_start() -> NaiveDate {
        ymd(2025, 11, 3)
    }

    /// Sunday 2025-11-30, last day of the sample period
    pub fn november_end() -> NaiveDate {
        ymd(2025, 11, 30)
    }

    /// Deterministic submission clock, one second per step
    pub fn clock(step: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap() + chrono::Duration::seconds(step as i64)
    }
}

/// Sample requests
pub mod requests {
    use super::*;

    pub fn application(name: &str, id: &str, car: &str, week: &str, slot: SlotId) -> ApplicationRequest {
        ApplicationRequest::new(name, id, car, week, slot)
    }

    pub fn hong_porsche_w45() -> ApplicationRequest {
        application("홍길동", "hong", "porsche", "2025-W45", SlotId::Slot1)
    }

    pub fn win(id: &str, name: &str, car: &str, date: NaiveDate) -> WinRequest {
        WinRequest::new(id, name, car, date)
    }
}
