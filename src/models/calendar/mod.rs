//! Calendar grid models.
//!
//! `DayCell` is one of the 42 cells of a month grid, `CellState` is the
//! classification the eligibility engine assigns to it, and `MonthView`
//! bundles a classified grid with its applicant summaries for rendering.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::application::Application;
use crate::models::slot::SlotId;

/// Number of cells in a six-row month grid.
pub const GRID_CELLS: usize = 42;

/// Which months of the period get a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthPolicy {
    /// Every touched month, collapsed to the start month when the end date is
    /// already visible in its grid
    GridCollapse,
    /// Every touched month holding at least one complete slot
    #[default]
    CompleteSlotsOnly,
}

/// A year/month pair (month is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Key used by the presentation layer, e.g. `2025-11`.
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    /// Header such as `2025년 11월`.
    pub fn title(&self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing cells borrowed from adjacent months
    pub is_current_month: bool,
}

impl DayCell {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Primary display state of a cell for the selected slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Padding cell from an adjacent month
    OtherMonth,
    /// Outside the rental period
    OutOfPeriod,
    /// Anchor of a complete slot; the only clickable state
    StartComplete,
    /// Anchor whose 4-day span leaves the period; shown greyed out
    StartIncomplete,
    /// Last day of a complete slot
    EndComplete,
    /// Inside a slot span, between start and end
    MidRange,
    /// Anchor of the slot that is not being viewed
    OtherSlotSuppressed,
    /// In period but not part of the viewed slot
    Plain,
}

/// Full classification of one cell, mirroring the flags the widget styles on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub cell: DayCell,
    pub slot: SlotId,
    pub week_id: Option<String>,
    pub in_period: bool,
    pub is_weekend: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_complete: bool,
    pub is_complete_end: bool,
    pub is_mid_range: bool,
    pub is_other_slot: bool,
    pub is_clickable: bool,
    pub is_inactive: bool,
}

impl CellView {
    pub fn state(&self) -> CellState {
        if !self.cell.is_current_month {
            CellState::OtherMonth
        } else if !self.in_period {
            CellState::OutOfPeriod
        } else if self.is_start && self.is_complete {
            CellState::StartComplete
        } else if self.is_start {
            CellState::StartIncomplete
        } else if self.is_complete_end {
            CellState::EndComplete
        } else if self.is_other_slot {
            CellState::OtherSlotSuppressed
        } else if self.is_mid_range {
            CellState::MidRange
        } else {
            CellState::Plain
        }
    }
}

/// Applicants attached to a clickable start cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSummary {
    pub week_id: String,
    pub competition_rate: usize,
    /// Up to three applicants in submission order
    pub preview: Vec<Application>,
    /// Applicants not included in the preview
    pub overflow: usize,
}

impl SlotSummary {
    /// Competition badge text, e.g. `3:1`.
    pub fn rate_label(&self) -> String {
        format!("{}:1", self.competition_rate)
    }
}

/// A classified cell plus its applicant summary, if it is a complete start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub view: CellView,
    pub summary: Option<SlotSummary>,
}

/// A fully classified month grid for one car and slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: MonthKey,
    pub car_id: String,
    pub slot: SlotId,
    pub cells: Vec<MonthCell>,
}
