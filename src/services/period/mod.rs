//! Rental period setup and slot-aligned date recommendations.
//!
//! Every slot is a 4-day block, so a period is only fully usable when it
//! starts on a slot anchor (Monday or Friday) and ends on a slot terminus
//! (Thursday or Monday). The admin form offers the nearest aligned dates.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::models::error::RentalError;
use crate::models::period::RentalPeriod;
use crate::utils::date::{add_days, days_since, days_until, format_ymd, korean_day_name, parse_ymd};

/// Build a period from the admin form's `YYYY-MM-DD` inputs.
pub fn parse_period(start: &str, end: &str, now: DateTime<Utc>) -> Result<RentalPeriod, RentalError> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(RentalError::InvalidRange(
            "both start and end dates are required".to_string(),
        ));
    }

    let start_date = parse_ymd(start)
        .ok_or_else(|| RentalError::InvalidRange(format!("'{}' is not a valid date", start.trim())))?;
    let end_date = parse_ymd(end)
        .ok_or_else(|| RentalError::InvalidRange(format!("'{}' is not a valid date", end.trim())))?;

    RentalPeriod::new(start_date, end_date, now)
}

/// Nearest slot-aligned boundaries for a raw admin range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedPeriod {
    pub aligned_start: NaiveDate,
    pub aligned_end: NaiveDate,
}

impl RecommendedPeriod {
    pub fn start_day_label(&self) -> &'static str {
        korean_day_name(self.aligned_start.weekday())
    }

    pub fn end_day_label(&self) -> &'static str {
        korean_day_name(self.aligned_end.weekday())
    }

    /// Whether applying the recommendation would change the raw input.
    pub fn differs_from(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.aligned_start != start || self.aligned_end != end
    }

    /// Form values for the "apply recommendation" action.
    pub fn form_values(&self) -> (String, String) {
        (format_ymd(self.aligned_start), format_ymd(self.aligned_end))
    }
}

/// Recommend aligned boundaries; `None` when either date is missing.
pub fn recommend_aligned_period(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<RecommendedPeriod> {
    let (start, end) = (start?, end?);
    Some(RecommendedPeriod {
        aligned_start: align_start(start),
        aligned_end: align_end(end),
    })
}

/// Same as [`recommend_aligned_period`] for raw form strings.
pub fn recommend_from_form(start: &str, end: &str) -> Option<RecommendedPeriod> {
    recommend_aligned_period(parse_ymd(start), parse_ymd(end))
}

/// Previous Monday or Friday, whichever is nearer. Monday wins ties.
pub fn align_start(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday();
    if matches!(weekday, Weekday::Mon | Weekday::Fri) {
        return date;
    }

    let to_monday = days_since(weekday, Weekday::Mon);
    let to_friday = days_since(weekday, Weekday::Fri);

    if to_friday < to_monday {
        add_days(date, -to_friday)
    } else {
        add_days(date, -to_monday)
    }
}

/// Next Monday or Thursday, whichever is nearer. Monday wins ties.
pub fn align_end(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday();
    if matches!(weekday, Weekday::Mon | Weekday::Thu) {
        return date;
    }

    let to_monday = days_until(weekday, Weekday::Mon);
    let to_thursday = days_until(weekday, Weekday::Thu);

    if to_thursday < to_monday {
        add_days(date, to_thursday)
    } else {
        add_days(date, to_monday)
    }
}

/// Whether the period already starts on an anchor and ends on a terminus.
pub fn is_aligned(period: &RentalPeriod) -> bool {
    align_start(period.start_date) == period.start_date && align_end(period.end_date) == period.end_date
}
