//! Calendar partitioning.
//!
//! Splits a rental period into Monday-based weeks and displayable months,
//! and lays out the 42-cell grid for a month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::calendar::{DayCell, MonthKey, MonthPolicy, GRID_CELLS};
use crate::models::period::RentalPeriod;
use crate::models::slot::SlotId;
use crate::models::week::Week;
use crate::services::eligibility::SlotEligibility;
use crate::utils::date::{
    add_days, days_in_month, first_of_month, last_of_month, monday_on_or_before, next_month,
};

/// Weeks touched by the period, starting with the week holding its first day.
pub fn weeks_in_period(period: &RentalPeriod) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut week_start = monday_on_or_before(period.start_date);

    while week_start <= period.end_date {
        weeks.push(Week::starting(week_start));
        week_start = week_start + Duration::days(7);
    }

    weeks
}

/// Id of the period week containing `date`, if any.
pub fn week_id_for_date(weeks: &[Week], date: NaiveDate) -> Option<String> {
    weeks
        .iter()
        .find(|week| week.contains(date))
        .map(|week| week.id.clone())
}

/// Months that get a calendar, in order.
pub fn months_in_period(period: &RentalPeriod, policy: MonthPolicy) -> Vec<MonthKey> {
    match policy {
        MonthPolicy::GridCollapse => grid_collapsed_months(period),
        MonthPolicy::CompleteSlotsOnly => touched_months(period)
            .into_iter()
            .filter(|month| month_has_complete_slot(period, *month))
            .collect(),
    }
}

/// Every calendar month between the period's start and end.
pub fn touched_months(period: &RentalPeriod) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let last = MonthKey::of(period.end_date);
    let mut current = MonthKey::of(period.start_date);

    while current <= last {
        months.push(current);
        let (year, month) = next_month(current.year, current.month);
        current = MonthKey::new(year, month);
    }

    months
}

/// Collapses to the start month when the end date falls in the start month's
/// last grid row, i.e. on or before the Saturday after its last day. Rows
/// padding the 42-cell grid beyond that week do not count, so a period ending
/// in the first days of March 2026 still gets a March calendar even though the
/// February grid runs to 3/14.
fn grid_collapsed_months(period: &RentalPeriod) -> Vec<MonthKey> {
    let start_month = MonthKey::of(period.start_date);
    if start_month == MonthKey::of(period.end_date) {
        return vec![start_month];
    }

    // The start month's grid runs on to the Saturday after its last day
    let month_end = last_of_month(period.start_date);
    let trailing = 6 - month_end.weekday().num_days_from_sunday() as i64;
    let last_visible = add_days(month_end, trailing);
    if period.end_date <= last_visible {
        return vec![start_month];
    }

    touched_months(period)
}

/// Whether any slot anchor dated in `month` has its whole span in the period.
pub fn month_has_complete_slot(period: &RentalPeriod, month: MonthKey) -> bool {
    let Some(first) = first_of_month(month.year, month.month) else {
        return false;
    };
    let engine = SlotEligibility::new(period);

    first
        .iter_days()
        .take_while(|date| date.month() == month.month)
        .any(|date| {
            SlotId::ALL
                .iter()
                .any(|&slot| engine.is_start(date, slot) && engine.is_complete_slot(date, slot))
        })
}

/// The 42 cells of a Sunday-first month grid. Empty for an invalid month.
pub fn calendar_days(year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as i64;
    let grid_start = add_days(first, -leading);
    let month_len = days_in_month(year, month) as i64;

    (0..GRID_CELLS as i64)
        .map(|offset| DayCell {
            date: add_days(grid_start, offset),
            is_current_month: offset >= leading && offset < leading + month_len,
        })
        .collect()
}
