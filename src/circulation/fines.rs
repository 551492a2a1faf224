use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{Fine, FineId, UserId};
use crate::error::EngineError;
use crate::fines::{FineCase, FineDispatcher};
use crate::store::{FineStore, NotificationSink};

/// Issues fines through the dispatcher and owns their payment lifecycle.
pub struct FineService {
    dispatcher: Arc<FineDispatcher>,
    fines: Arc<dyn FineStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl FineService {
    pub fn new(
        dispatcher: Arc<FineDispatcher>,
        fines: Arc<dyn FineStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            dispatcher,
            fines,
            notifier,
        }
    }

    /// Compute and persist the fine for a case; `Ok(None)` when the selected
    /// calculator decides no fine is warranted.
    pub fn issue(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        let fine = match self.dispatcher.calculate(case)? {
            Some(fine) => fine,
            None => return Ok(None),
        };

        self.fines.insert_fine(fine.clone())?;
        self.notifier.notify(
            &fine.user_id,
            &format!("A fine of ${:.2} was issued: {}", fine.amount(), fine.reason),
        );
        tracing::info!(fine = %fine.id, user = %fine.user_id, amount = fine.amount(), "fine issued");

        Ok(Some(fine))
    }

    /// Pending → Paid. Repeat attempts are rejected, never double-counted.
    pub fn record_payment(
        &self,
        fine_id: &FineId,
        as_of: NaiveDateTime,
    ) -> Result<Fine, EngineError> {
        let mut fine = self
            .fines
            .fine(fine_id)?
            .ok_or_else(|| EngineError::not_found("fine", fine_id.as_str()))?;

        fine.mark_paid(as_of)?;
        self.fines.update_fine(fine.clone())?;
        tracing::info!(fine = %fine.id, user = %fine.user_id, "fine paid");

        Ok(fine)
    }

    /// Pending → Waived, with the same single-transition guard as payment.
    pub fn waive(&self, fine_id: &FineId) -> Result<Fine, EngineError> {
        let mut fine = self
            .fines
            .fine(fine_id)?
            .ok_or_else(|| EngineError::not_found("fine", fine_id.as_str()))?;

        fine.mark_waived()?;
        self.fines.update_fine(fine.clone())?;
        tracing::info!(fine = %fine.id, user = %fine.user_id, "fine waived");

        Ok(fine)
    }

    pub fn pending_for(&self, user_id: &UserId) -> Result<Vec<Fine>, EngineError> {
        self.fines.pending_fines_for_user(user_id)
    }

    pub fn pending_total(&self, user_id: &UserId) -> Result<f64, EngineError> {
        Ok(self
            .pending_for(user_id)?
            .iter()
            .map(Fine::amount)
            .sum())
    }
}
