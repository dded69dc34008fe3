//! Slot eligibility rules for calendar cells.
//!
//! Every predicate is a pure function of the rental period, a date and the
//! slot being viewed. A slot occurrence is usable only when all four of its
//! days lie inside the period; anchors whose span leaves the period are shown
//! but cannot be clicked.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::calendar::{CellView, DayCell};
use crate::models::period::RentalPeriod;
use crate::models::slot::{SlotId, SLOT_SPAN_DAYS};
use crate::utils::date::{add_days, is_weekend};

/// Eligibility checks bound to one rental period.
#[derive(Debug, Clone, Copy)]
pub struct SlotEligibility<'a> {
    period: &'a RentalPeriod,
}

impl<'a> SlotEligibility<'a> {
    pub fn new(period: &'a RentalPeriod) -> Self {
        Self { period }
    }

    pub fn period(&self) -> &'a RentalPeriod {
        self.period
    }

    /// Date lies inside the period, both ends included.
    pub fn in_period(&self, date: NaiveDate) -> bool {
        self.period.contains(date)
    }

    pub fn is_slot1_start(&self, date: NaiveDate) -> bool {
        date.weekday() == SlotId::Slot1.anchor_weekday()
    }

    pub fn is_slot1_end(&self, date: NaiveDate) -> bool {
        date.weekday() == SlotId::Slot1.end_weekday()
    }

    pub fn is_slot2_start(&self, date: NaiveDate) -> bool {
        date.weekday() == SlotId::Slot2.anchor_weekday()
    }

    /// A Monday ends slot 2 only when the Friday three days earlier is in
    /// the period. Other Mondays belong to slot 1.
    pub fn is_slot2_end(&self, date: NaiveDate) -> bool {
        if date.weekday() != SlotId::Slot2.end_weekday() {
            return false;
        }
        let friday = add_days(date, -(SLOT_SPAN_DAYS - 1));
        self.is_slot2_start(friday) && self.in_period(friday)
    }

    pub fn is_start(&self, date: NaiveDate, slot: SlotId) -> bool {
        match slot {
            SlotId::Slot1 => self.is_slot1_start(date),
            SlotId::Slot2 => self.is_slot2_start(date),
        }
    }

    pub fn is_end(&self, date: NaiveDate, slot: SlotId) -> bool {
        match slot {
            SlotId::Slot1 => self.is_slot1_end(date),
            SlotId::Slot2 => self.is_slot2_end(date),
        }
    }

    /// The 4-day span beginning at `date` lies entirely inside the period.
    pub fn is_complete_slot(&self, date: NaiveDate, _slot: SlotId) -> bool {
        (0..SLOT_SPAN_DAYS).all(|offset| self.in_period(add_days(date, offset)))
    }

    /// `date` is the last day of a complete occurrence of `slot`.
    pub fn is_complete_end(&self, date: NaiveDate, slot: SlotId) -> bool {
        if !self.is_end(date, slot) {
            return false;
        }
        let anchor = add_days(date, -(SLOT_SPAN_DAYS - 1));
        self.is_start(anchor, slot) && self.is_complete_slot(anchor, slot)
    }

    /// Day-of-week membership in the slot's span. Slot 2 claims a Monday only
    /// when that Monday actually ends a slot 2 occurrence.
    pub fn is_in_slot_range(&self, date: NaiveDate, slot: SlotId) -> bool {
        match slot {
            SlotId::Slot1 => matches!(
                date.weekday(),
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
            ),
            SlotId::Slot2 => match date.weekday() {
                Weekday::Fri | Weekday::Sat | Weekday::Sun => true,
                Weekday::Mon => self.is_slot2_end(date),
                _ => false,
            },
        }
    }

    /// Anchor of the slot not being viewed, which the calendar suppresses.
    /// A Monday that ends a slot 2 occurrence is not suppressed in the slot 2 view.
    pub fn is_other_slot_start(&self, date: NaiveDate, slot: SlotId) -> bool {
        let other_anchor = date.weekday() == slot.other().anchor_weekday();
        match slot {
            SlotId::Slot1 => other_anchor,
            SlotId::Slot2 => other_anchor && !self.is_slot2_end(date),
        }
    }

    /// Only the anchor of a complete slot, in the displayed month and inside
    /// a period week, accepts a click.
    pub fn is_clickable(&self, cell: &DayCell, slot: SlotId, week_id: Option<&str>) -> bool {
        self.is_start(cell.date, slot)
            && week_id.is_some()
            && cell.is_current_month
            && self.in_period(cell.date)
            && self.is_complete_slot(cell.date, slot)
    }

    /// Classify one grid cell for the viewed slot.
    pub fn classify(&self, cell: DayCell, slot: SlotId, week_id: Option<String>) -> CellView {
        let date = cell.date;
        let in_period = self.in_period(date);
        let is_start = self.is_start(date, slot);
        let is_end = self.is_end(date, slot);
        let is_complete = is_start && self.is_complete_slot(date, slot);
        let is_complete_end = in_period && self.is_complete_end(date, slot);
        let is_mid_range = self.is_in_slot_range(date, slot) && !is_start && !is_end;
        let is_other_slot = in_period && self.is_other_slot_start(date, slot);
        let is_clickable = self.is_clickable(&cell, slot, week_id.as_deref());
        let is_inactive = in_period && cell.is_current_month && !is_start && !is_end && !is_mid_range;

        CellView {
            cell,
            slot,
            week_id,
            in_period,
            is_weekend: is_weekend(date),
            is_start,
            is_end,
            is_complete,
            is_complete_end,
            is_mid_range,
            is_other_slot,
            is_clickable,
            is_inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::CellState;
    use chrono::{TimeZone, Utc};
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2025-11-03 (Mon) to 2025-11-30 (Sun)
    fn november() -> RentalPeriod {
        RentalPeriod::new(
            ymd(2025, 11, 3),
            ymd(2025, 11, 30),
            Utc.with_ymd_and_hms(2025, 10, 20, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn cell(date: NaiveDate) -> DayCell {
        DayCell {
            date,
            is_current_month: true,
        }
    }

    #[test]
    fn test_in_period_bounds() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.in_period(ymd(2025, 11, 3)));
        assert!(engine.in_period(ymd(2025, 11, 30)));
        assert!(!engine.in_period(ymd(2025, 11, 2)));
        assert!(!engine.in_period(ymd(2025, 12, 1)));
    }

    #[test]
    fn test_first_monday_slot1_is_complete() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.is_complete_slot(ymd(2025, 11, 3), SlotId::Slot1));
    }

    #[test]
    fn test_span_reaching_december_is_incomplete() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        // 11/28 + 3 days = 12/1, outside the period
        assert!(!engine.is_complete_slot(ymd(2025, 11, 28), SlotId::Slot1));
        assert!(!engine.is_complete_slot(ymd(2025, 11, 28), SlotId::Slot2));
    }

    #[test_case(ymd(2025, 11, 10), true; "second monday")]
    #[test_case(ymd(2025, 11, 24), true; "last full slot1")]
    #[test_case(ymd(2025, 11, 27), false; "thursday is not a slot1 start")]
    fn test_slot1_clickable(date: NaiveDate, expected: bool) {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert_eq!(engine.is_clickable(&cell(date), SlotId::Slot1, Some("w")), expected);
    }

    #[test]
    fn test_slot2_end_requires_friday_in_period() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        // Fri 11/7 is in period, so Mon 11/10 ends slot 2
        assert!(engine.is_slot2_end(ymd(2025, 11, 10)));
        // Fri 10/31 is outside, so Mon 11/3 is only a slot 1 start
        assert!(!engine.is_slot2_end(ymd(2025, 11, 3)));
        // Not a Monday at all
        assert!(!engine.is_slot2_end(ymd(2025, 11, 11)));
    }

    #[test]
    fn test_slot1_end_is_unconditional() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.is_slot1_end(ymd(2025, 10, 30)));
        assert!(engine.is_slot1_end(ymd(2025, 11, 6)));
    }

    #[test]
    fn test_complete_end() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.is_complete_end(ymd(2025, 11, 6), SlotId::Slot1));
        assert!(engine.is_complete_end(ymd(2025, 11, 10), SlotId::Slot2));
        // Fri 11/28 - Mon 12/1 leaves the period
        assert!(!engine.is_complete_end(ymd(2025, 12, 1), SlotId::Slot2));
        // A Wednesday is never an end
        assert!(!engine.is_complete_end(ymd(2025, 11, 5), SlotId::Slot1));
    }

    #[test]
    fn test_slot_range_membership() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.is_in_slot_range(ymd(2025, 11, 4), SlotId::Slot1));
        assert!(!engine.is_in_slot_range(ymd(2025, 11, 7), SlotId::Slot1));
        assert!(engine.is_in_slot_range(ymd(2025, 11, 8), SlotId::Slot2));
        assert!(engine.is_in_slot_range(ymd(2025, 11, 10), SlotId::Slot2));
        // Mon 11/3 has no slot 2 occurrence behind it
        assert!(!engine.is_in_slot_range(ymd(2025, 11, 3), SlotId::Slot2));
    }

    #[test]
    fn test_other_slot_suppression() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        assert!(engine.is_other_slot_start(ymd(2025, 11, 7), SlotId::Slot1));
        assert!(!engine.is_other_slot_start(ymd(2025, 11, 3), SlotId::Slot1));
        // Mon 11/3 is only a slot 1 anchor when viewing slot 2
        assert!(engine.is_other_slot_start(ymd(2025, 11, 3), SlotId::Slot2));
        // Mon 11/10 ends slot 2 and must not be suppressed
        assert!(!engine.is_other_slot_start(ymd(2025, 11, 10), SlotId::Slot2));
    }

    #[test]
    fn test_clickable_requires_current_month_and_week() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        let padding = DayCell {
            date: ymd(2025, 11, 10),
            is_current_month: false,
        };
        assert!(!engine.is_clickable(&padding, SlotId::Slot1, Some("2025-W46")));
        assert!(!engine.is_clickable(&cell(ymd(2025, 11, 10)), SlotId::Slot1, None));
    }

    #[test]
    fn test_classify_states_slot1() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        let week = || Some("2025-W45".to_string());

        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 3)), SlotId::Slot1, week()).state(),
            CellState::StartComplete
        );
        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 4)), SlotId::Slot1, week()).state(),
            CellState::MidRange
        );
        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 6)), SlotId::Slot1, week()).state(),
            CellState::EndComplete
        );
        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 7)), SlotId::Slot1, week()).state(),
            CellState::OtherSlotSuppressed
        );
        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 8)), SlotId::Slot1, week()).state(),
            CellState::Plain
        );
        assert_eq!(
            engine.classify(cell(ymd(2025, 11, 2)), SlotId::Slot1, None).state(),
            CellState::OutOfPeriod
        );
    }

    #[test]
    fn test_classify_incomplete_anchor_slot2() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        let view = engine.classify(cell(ymd(2025, 11, 28)), SlotId::Slot2, Some("2025-W48".to_string()));
        assert_eq!(view.state(), CellState::StartIncomplete);
        assert!(!view.is_clickable);
        assert!(!view.is_weekend);
    }

    #[test]
    fn test_inactive_flag() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        let saturday = engine.classify(cell(ymd(2025, 11, 8)), SlotId::Slot1, None);
        assert!(saturday.is_inactive);
        assert!(saturday.is_weekend);
        let tuesday = engine.classify(cell(ymd(2025, 11, 4)), SlotId::Slot1, None);
        assert!(!tuesday.is_inactive);
    }

    #[test]
    fn test_anchors_and_ends_follow_slot_weekdays() {
        let period = november();
        let engine = SlotEligibility::new(&period);
        for slot in SlotId::ALL {
            for date in ymd(2025, 11, 3).iter_days().take(28) {
                assert_eq!(engine.is_start(date, slot), date.weekday() == slot.anchor_weekday());
                if engine.is_end(date, slot) {
                    assert_eq!(date.weekday(), slot.end_weekday());
                }
                if engine.is_other_slot_start(date, slot) {
                    assert_eq!(date.weekday(), slot.other().anchor_weekday());
                }
            }
        }
    }
}
