//! Month views for the reservation calendar.
//!
//! Combines the grid layout, the eligibility classification and the
//! application ledger into the structure a renderer draws from.

use crate::models::calendar::{MonthCell, MonthKey, MonthPolicy, MonthView, SlotSummary};
use crate::models::period::RentalPeriod;
use crate::models::slot::SlotId;
use crate::models::week::Week;
use crate::services::application::ApplicationLedger;
use crate::services::calendar::{calendar_days, week_id_for_date, weeks_in_period};
use crate::services::eligibility::SlotEligibility;
use crate::services::state::AppState;

/// Applicants listed inline on a start cell before collapsing to "+N".
pub const PREVIEW_LIMIT: usize = 3;

/// Classify every cell of one month for `car_id` and `slot`.
pub fn month_view(
    period: &RentalPeriod,
    applications: &ApplicationLedger,
    month: MonthKey,
    car_id: &str,
    slot: SlotId,
) -> MonthView {
    let weeks = weeks_in_period(period);
    build_month(period, &weeks, applications, month, car_id, slot)
}

/// All month views for the active period. Empty when no period is set.
pub fn calendar_view(state: &AppState, car_id: &str, slot: SlotId, policy: MonthPolicy) -> Vec<MonthView> {
    let Some(period) = state.period() else {
        return Vec::new();
    };
    let weeks = weeks_in_period(period);

    state
        .months(policy)
        .into_iter()
        .map(|month| build_month(period, &weeks, state.applications(), month, car_id, slot))
        .collect()
}

fn build_month(
    period: &RentalPeriod,
    weeks: &[Week],
    applications: &ApplicationLedger,
    month: MonthKey,
    car_id: &str,
    slot: SlotId,
) -> MonthView {
    let engine = SlotEligibility::new(period);

    let cells = calendar_days(month.year, month.month)
        .into_iter()
        .map(|cell| {
            let view = engine.classify(cell, slot, week_id_for_date(weeks, cell.date));
            let summary = if view.is_clickable {
                view.week_id
                    .as_deref()
                    .map(|week_id| summarize(applications, week_id, slot, car_id))
            } else {
                None
            };
            MonthCell { view, summary }
        })
        .collect();

    MonthView {
        month,
        car_id: car_id.to_string(),
        slot,
        cells,
    }
}

fn summarize(applications: &ApplicationLedger, week_id: &str, slot: SlotId, car_id: &str) -> SlotSummary {
    let mut applicants = applications.applicants_for(week_id, slot, car_id);
    let competition_rate = applicants.len();
    let overflow = competition_rate.saturating_sub(PREVIEW_LIMIT);
    applicants.truncate(PREVIEW_LIMIT);

    SlotSummary {
        week_id: week_id.to_string(),
        competition_rate,
        preview: applicants,
        overflow,
    }
}
