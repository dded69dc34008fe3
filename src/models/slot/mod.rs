//! Weekly rental slots.
//!
//! Each week offers two fixed 4-day blocks. A slot occurrence is anchored on
//! its first day and always spans the anchor plus the following three days.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Days covered by one slot occurrence, anchor included.
pub const SLOT_SPAN_DAYS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotId {
    /// Monday 18:00 to Thursday 18:00.
    #[serde(rename = "slot1")]
    Slot1,
    /// Friday 10:00 to Monday 10:00.
    #[serde(rename = "slot2")]
    Slot2,
}

impl SlotId {
    pub const ALL: [SlotId; 2] = [SlotId::Slot1, SlotId::Slot2];

    /// Day of week that begins an occurrence of this slot.
    pub fn anchor_weekday(self) -> Weekday {
        match self {
            SlotId::Slot1 => Weekday::Mon,
            SlotId::Slot2 => Weekday::Fri,
        }
    }

    /// Day of week on which an occurrence of this slot ends.
    pub fn end_weekday(self) -> Weekday {
        match self {
            SlotId::Slot1 => Weekday::Thu,
            SlotId::Slot2 => Weekday::Mon,
        }
    }

    /// The slot that is not this one.
    pub fn other(self) -> SlotId {
        match self {
            SlotId::Slot1 => SlotId::Slot2,
            SlotId::Slot2 => SlotId::Slot1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::Slot1 => "slot1",
            SlotId::Slot2 => "slot2",
        }
    }

    /// Name snapshotted onto applications ("1회차").
    pub fn display_name(self) -> &'static str {
        match self {
            SlotId::Slot1 => "1회차",
            SlotId::Slot2 => "2회차",
        }
    }

    /// Short day range shown on filter buttons.
    pub fn day_range_label(self) -> &'static str {
        match self {
            SlotId::Slot1 => "월~목",
            SlotId::Slot2 => "금~월",
        }
    }

    /// Pick-up and return times.
    pub fn time_window_label(self) -> &'static str {
        match self {
            SlotId::Slot1 => "월 18:00 ~ 목 18:00",
            SlotId::Slot2 => "금 10:00 ~ 월 10:00",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "slot1" => Ok(SlotId::Slot1),
            "slot2" => Ok(SlotId::Slot2),
            other => Err(format!("Unknown slot: {}", other)),
        }
    }
}
