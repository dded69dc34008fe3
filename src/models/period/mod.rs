//! Admin-configured rental window.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::error::RentalError;
use crate::utils::date::{format_korean, korean_day_name};

/// The single active rental period. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl RentalPeriod {
    /// Create a period, rejecting an inverted range.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RentalError> {
        let period = Self {
            start_date,
            end_date,
            created_at,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), RentalError> {
        if self.start_date > self.end_date {
            return Err(RentalError::InvalidRange(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Whether the date lies inside the period, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Summary such as `2025. 11. 3. (월) ~ 2025. 11. 30. (일)`.
    pub fn display(&self) -> String {
        format!(
            "{} ({}) ~ {} ({})",
            format_korean(self.start_date),
            korean_day_name(self.start_date.weekday()),
            format_korean(self.end_date),
            korean_day_name(self.end_date.weekday()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_valid_period() {
        let period = RentalPeriod::new(ymd(2025, 11, 3), ymd(2025, 11, 30), created()).unwrap();
        assert_eq!(period.len_days(), 28);
    }

    #[test]
    fn test_single_day_period_is_valid() {
        assert!(RentalPeriod::new(ymd(2025, 11, 3), ymd(2025, 11, 3), created()).is_ok());
    }

    #[test]
    fn test_inverted_period_rejected() {
        let result = RentalPeriod::new(ymd(2025, 11, 30), ymd(2025, 11, 3), created());
        assert!(matches!(result, Err(RentalError::InvalidRange(_))));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = RentalPeriod::new(ymd(2025, 11, 3), ymd(2025, 11, 30), created()).unwrap();
        assert!(period.contains(ymd(2025, 11, 3)));
        assert!(period.contains(ymd(2025, 11, 30)));
        assert!(!period.contains(ymd(2025, 11, 2)));
        assert!(!period.contains(ymd(2025, 12, 1)));
    }

    #[test]
    fn test_wire_format() {
        let period = RentalPeriod::new(ymd(2025, 11, 3), ymd(2025, 11, 30), created()).unwrap();
        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["startDate"], "2025-11-03");
        assert_eq!(json["endDate"], "2025-11-30");
        assert_eq!(json["createdAt"], "2025-10-20T09:00:00Z");

        let parsed: RentalPeriod = serde_json::from_str(
            r#"{"startDate":"2025-11-03","endDate":"2025-11-30","createdAt":"2025-10-20T09:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_display() {
        let period = RentalPeriod::new(ymd(2025, 11, 3), ymd(2025, 11, 30), created()).unwrap();
        assert_eq!(period.display(), "2025. 11. 3. (월) ~ 2025. 11. 30. (일)");
    }
}
