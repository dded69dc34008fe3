//! Session state aggregate.
//!
//! `AppState` owns everything the reservation calendar knows: the active
//! period and both ledgers. The presentation layer holds one instance and
//! changes it only through the methods below. Every successful change is
//! written to the store right away, one key per collection, before the
//! in-memory state is updated.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::models::application::{Application, ApplicationRequest};
use crate::models::calendar::{DayCell, MonthKey, MonthPolicy};
use crate::models::car::{default_cars, Car};
use crate::models::error::RentalError;
use crate::models::period::RentalPeriod;
use crate::models::slot::SlotId;
use crate::models::week::Week;
use crate::models::winning::{WinRequest, WinningCount, WinningPolicy, WinningRecord};
use crate::services::application::ApplicationLedger;
use crate::services::calendar::{months_in_period, week_id_for_date, weeks_in_period};
use crate::services::eligibility::SlotEligibility;
use crate::services::period::parse_period;
use crate::services::storage::{
    load_lenient, save, KeyValueStore, APPLICATIONS_KEY, RENTAL_PERIOD_KEY, WINNING_HISTORY_KEY,
};
use crate::services::winning::WinningLedger;

/// Failure of a state-changing operation.
#[derive(Debug, Error)]
pub enum StateError {
    /// The input was rejected; nothing changed
    #[error(transparent)]
    Rental(#[from] RentalError),
    /// The change could not be written; nothing changed
    #[error("Failed to persist state: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl StateError {
    pub fn rental(&self) -> Option<&RentalError> {
        match self {
            StateError::Rental(err) => Some(err),
            StateError::Storage(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    period: Option<RentalPeriod>,
    applications: ApplicationLedger,
    winning: WinningLedger,
    cars: Vec<Car>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(WinningPolicy::default())
    }
}

impl AppState {
    /// Empty state with the default car catalog.
    pub fn new(policy: WinningPolicy) -> Self {
        Self {
            period: None,
            applications: ApplicationLedger::default(),
            winning: WinningLedger::new(Vec::new(), policy),
            cars: default_cars(),
        }
    }

    /// Read all three keys once at session start.
    ///
    /// Absent keys mean "nothing configured yet". Values that cannot be
    /// decoded are logged and treated as absent.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, policy: WinningPolicy) -> anyhow::Result<Self> {
        let period = load_lenient::<_, RentalPeriod>(store, RENTAL_PERIOD_KEY)?.and_then(|period| {
            match period.validate() {
                Ok(()) => Some(period),
                Err(err) => {
                    log::warn!("Discarding stored rental period: {}", err);
                    None
                }
            }
        });
        let applications: Vec<Application> =
            load_lenient(store, APPLICATIONS_KEY)?.unwrap_or_default();
        let winning: Vec<WinningRecord> =
            load_lenient(store, WINNING_HISTORY_KEY)?.unwrap_or_default();

        log::info!(
            "Loaded state: period={}, applications={}, wins={}",
            period.as_ref().map(|p| p.display()).unwrap_or_else(|| "none".to_string()),
            applications.len(),
            winning.len()
        );

        Ok(Self {
            period,
            applications: ApplicationLedger::new(applications),
            winning: WinningLedger::new(winning, policy),
            cars: default_cars(),
        })
    }

    pub fn period(&self) -> Option<&RentalPeriod> {
        self.period.as_ref()
    }

    pub fn applications(&self) -> &ApplicationLedger {
        &self.applications
    }

    pub fn winning(&self) -> &WinningLedger {
        &self.winning
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Eligibility rules for the active period.
    pub fn eligibility(&self) -> Option<SlotEligibility<'_>> {
        self.period.as_ref().map(SlotEligibility::new)
    }

    pub fn weeks(&self) -> Vec<Week> {
        self.period.as_ref().map(weeks_in_period).unwrap_or_default()
    }

    pub fn months(&self, policy: MonthPolicy) -> Vec<MonthKey> {
        self.period
            .as_ref()
            .map(|period| months_in_period(period, policy))
            .unwrap_or_default()
    }

    pub fn week_id_for(&self, date: NaiveDate) -> Option<String> {
        week_id_for_date(&self.weeks(), date)
    }

    /// Week id of the clickable start cell at `date`, or `None` when that
    /// date cannot be booked for `slot`.
    pub fn bookable_week(&self, date: NaiveDate, slot: SlotId) -> Option<String> {
        let engine = self.eligibility()?;
        let week_id = self.week_id_for(date)?;
        let cell = DayCell {
            date,
            is_current_month: true,
        };
        engine
            .is_clickable(&cell, slot, Some(&week_id))
            .then_some(week_id)
    }

    pub fn competition_rate(&self, week_id: &str, slot: SlotId, car_id: &str) -> usize {
        self.applications.competition_rate(week_id, slot, car_id)
    }

    pub fn applicants_for(&self, week_id: &str, slot: SlotId, car_id: &str) -> Vec<Application> {
        self.applications.applicants_for(week_id, slot, car_id)
    }

    pub fn winning_count(&self, english_id: &str, car_id: &str) -> WinningCount {
        self.winning.winning_count(english_id, car_id)
    }

    /// Replace the active period from the admin form's date inputs.
    pub fn set_period<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        start: &str,
        end: &str,
        now: DateTime<Utc>,
    ) -> Result<RentalPeriod, StateError> {
        let period = parse_period(start, end, now)?;
        save(store, RENTAL_PERIOD_KEY, &period)?;

        log::info!("Rental period set to {} ~ {}", period.start_date, period.end_date);
        self.period = Some(period.clone());
        Ok(period)
    }

    /// Submit a reservation request for a clicked start cell.
    pub fn submit_application<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        request: ApplicationRequest,
        now: DateTime<Utc>,
    ) -> Result<Application, StateError> {
        let mut ledger = self.applications.clone();
        let application = ledger.submit(request, &self.cars, &self.winning, now)?;
        save(store, APPLICATIONS_KEY, ledger.applications())?;

        self.applications = ledger;
        Ok(application)
    }

    /// Enter a drawing result.
    pub fn record_win<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        request: WinRequest,
        now: DateTime<Utc>,
    ) -> Result<WinningRecord, StateError> {
        let mut ledger = self.winning.clone();
        let record = ledger.record_win(request, &self.cars, now)?;
        save(store, WINNING_HISTORY_KEY, ledger.records())?;

        self.winning = ledger;
        Ok(record)
    }

    /// Delete one winning record. Unknown ids change nothing and are not saved.
    pub fn delete_win<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        id: i64,
    ) -> Result<Option<WinningRecord>, StateError> {
        let mut ledger = self.winning.clone();
        let Some(removed) = ledger.delete_win(id) else {
            return Ok(None);
        };
        save(store, WINNING_HISTORY_KEY, ledger.records())?;

        self.winning = ledger;
        Ok(Some(removed))
    }
}
