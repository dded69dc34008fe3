// Week model
// Monday-to-Sunday calendar week derived from the rental period

use chrono::{Datelike, Duration, NaiveDate};

/// One Monday-to-Sunday week touched by the rental period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    /// `"<iso year>-W<iso week>"`, e.g. `"2025-W45"`
    pub id: String,
    pub week_number: u32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Week {
    /// Build the week starting on the given Monday.
    pub fn starting(monday: NaiveDate) -> Self {
        let iso = monday.iso_week();
        Self {
            id: week_id(monday),
            week_number: iso.week(),
            year: iso.year(),
            start_date: monday,
            end_date: monday + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Label such as `11/3 ~ 11/9`.
    pub fn display(&self) -> String {
        format!(
            "{}/{} ~ {}/{}",
            self.start_date.month(),
            self.start_date.day(),
            self.end_date.month(),
            self.end_date.day()
        )
    }
}

/// Week id for the ISO week containing the date.
pub fn week_id(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{}", iso.year(), iso.week())
}
