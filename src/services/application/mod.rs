//! Application ledger.
//!
//! Append-only list of reservation requests. Submission enforces the
//! winning cap and rejects a second request for the same slot occurrence.

use chrono::{DateTime, Utc};

use crate::models::application::{Application, ApplicationRequest};
use crate::models::car::{find_car, Car};
use crate::models::error::RentalError;
use crate::models::slot::SlotId;
use crate::services::next_record_id;
use crate::services::winning::WinningLedger;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationLedger {
    applications: Vec<Application>,
}

impl ApplicationLedger {
    pub fn new(applications: Vec<Application>) -> Self {
        Self { applications }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Validate and append a request.
    ///
    /// Checks run in order: required fields, known car, winning cap,
    /// duplicate. A rejected request leaves the ledger untouched.
    pub fn submit(
        &mut self,
        request: ApplicationRequest,
        cars: &[Car],
        winning: &WinningLedger,
        now: DateTime<Utc>,
    ) -> Result<Application, RentalError> {
        request.validate()?;
        let car = find_car(cars, &request.car_id)
            .ok_or_else(|| RentalError::UnknownCar(request.car_id.clone()))?;

        if let Err(err) = winning.check_limit(&request.english_id, &request.car_id) {
            log::info!("Rejected application from {}: {}", request.english_id, err);
            return Err(err);
        }

        if self.applications.iter().any(|app| app.is_duplicate_of(&request)) {
            log::info!(
                "Rejected duplicate application from {} for {} {} {}",
                request.english_id,
                request.car_id,
                request.week_id,
                request.slot
            );
            return Err(RentalError::DuplicateApplication {
                english_id: request.english_id,
                car_id: request.car_id,
                week_id: request.week_id,
                slot: request.slot,
            });
        }

        let application = Application {
            id: next_record_id(now, self.applications.iter().map(|a| a.id)),
            korean_name: request.korean_name,
            english_id: request.english_id,
            car_id: car.id.clone(),
            car_name: car.display_name.clone(),
            week_id: request.week_id,
            slot_id: request.slot,
            slot_name: request.slot.display_name().to_string(),
            created_at: now,
        };

        log::info!(
            "Accepted application {} from {} for {} {} {}",
            application.id,
            application.english_id,
            application.car_id,
            application.week_id,
            application.slot_id
        );
        self.applications.push(application.clone());
        Ok(application)
    }

    /// Number of applications contending for one slot occurrence.
    pub fn competition_rate(&self, week_id: &str, slot: SlotId, car_id: &str) -> usize {
        self.applications
            .iter()
            .filter(|app| app.targets(week_id, slot, car_id))
            .count()
    }

    /// Applicants for one slot occurrence, earliest submission first.
    pub fn applicants_for(&self, week_id: &str, slot: SlotId, car_id: &str) -> Vec<Application> {
        let mut applicants: Vec<Application> = self
            .applications
            .iter()
            .filter(|app| app.targets(week_id, slot, car_id))
            .cloned()
            .collect();
        applicants.sort_by_key(|app| (app.created_at, app.id));
        applicants
    }
}
