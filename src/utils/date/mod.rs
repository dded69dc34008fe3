// Date utility functions
// Day arithmetic and Korean labels shared by the calendar engine

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Short Korean day names, indexed from Sunday.
pub const KOREAN_DAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Short Korean label for a weekday ("월" for Monday).
pub fn korean_day_name(weekday: Weekday) -> &'static str {
    KOREAN_DAY_NAMES[weekday.num_days_from_sunday() as usize]
}

/// Formats a date the way the admin form reads and writes it: `YYYY-MM-DD`.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date in the `ko-KR` locale style, e.g. `2025. 11. 3.`
pub fn format_korean(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Parses a `YYYY-MM-DD` form value. Empty or malformed input yields `None`.
pub fn parse_ymd(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Number of days to step forward from `from` to reach `target` (0..=6).
pub fn days_until(from: Weekday, target: Weekday) -> i64 {
    ((target.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7) as i64
}

/// Number of days to step back from `from` to reach `target` (0..=6).
pub fn days_since(from: Weekday, target: Weekday) -> i64 {
    days_until(target, from)
}

/// Monday on or before the given date.
pub fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last calendar day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = next_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    first_of_month(year, month)
        .map(|first| last_of_month(first).day())
        .unwrap_or(0)
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
