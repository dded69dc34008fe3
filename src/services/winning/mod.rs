//! Winning history ledger.
//!
//! Holds manually entered drawing results and answers how many times an
//! employee has won a given car inside the counting window.

use chrono::{DateTime, Utc};

use crate::models::car::{find_car, Car};
use crate::models::error::RentalError;
use crate::models::winning::{WinRequest, WinningCount, WinningPolicy, WinningRecord};
use crate::services::next_record_id;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinningLedger {
    records: Vec<WinningRecord>,
    policy: WinningPolicy,
}

impl WinningLedger {
    pub fn new(records: Vec<WinningRecord>, policy: WinningPolicy) -> Self {
        Self { records, policy }
    }

    pub fn records(&self) -> &[WinningRecord] {
        &self.records
    }

    pub fn policy(&self) -> WinningPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// In-window wins of one employee for one car.
    pub fn winning_count(&self, english_id: &str, car_id: &str) -> WinningCount {
        let records: Vec<WinningRecord> = self
            .records
            .iter()
            .filter(|r| r.english_id == english_id && r.car_id == car_id)
            .filter(|r| self.policy.in_window(r.winning_date))
            .cloned()
            .collect();

        WinningCount {
            count: records.len(),
            limit_reached: records.len() >= self.policy.limit,
            records,
        }
    }

    /// Fails with `WinningLimitReached` once the employee hit the cap for the car.
    pub fn check_limit(&self, english_id: &str, car_id: &str) -> Result<(), RentalError> {
        let summary = self.winning_count(english_id, car_id);
        if summary.limit_reached {
            return Err(RentalError::WinningLimitReached {
                english_id: english_id.to_string(),
                car_id: car_id.to_string(),
                count: summary.count,
                limit: self.policy.limit,
            });
        }
        Ok(())
    }

    /// Append a win entered by an admin after a drawing.
    pub fn record_win(
        &mut self,
        request: WinRequest,
        cars: &[Car],
        now: DateTime<Utc>,
    ) -> Result<WinningRecord, RentalError> {
        request.validate()?;
        let car = find_car(cars, &request.car_id)
            .ok_or_else(|| RentalError::UnknownCar(request.car_id.clone()))?;

        // Wins dated outside the window never count, so they are always accepted
        if self.policy.in_window(request.winning_date) {
            self.check_limit(&request.english_id, &request.car_id)?;
        }

        let record = WinningRecord {
            id: next_record_id(now, self.records.iter().map(|r| r.id)),
            english_id: request.english_id,
            korean_name: request.korean_name,
            car_id: car.id.clone(),
            car_name: car.display_name.clone(),
            winning_date: request.winning_date,
            created_at: now,
        };

        log::info!(
            "Recorded win for {} on {} ({})",
            record.english_id,
            record.car_id,
            record.winning_date
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Remove one record. Returns the removed record, or `None` if unknown.
    pub fn delete_win(&mut self, id: i64) -> Option<WinningRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(index);
        log::info!("Deleted win {} for {}", removed.id, removed.english_id);
        Some(removed)
    }
}
