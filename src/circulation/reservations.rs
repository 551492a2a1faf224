use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{
    MaterialId, ReservationId, ReservationRecord, TransactionStatus, UserId, ValidationOutcome,
};
use crate::error::EngineError;
use crate::rules::RuleOrchestrator;
use crate::store::{NotificationSink, ReservationStore};

static RESERVATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_reservation_id() -> ReservationId {
    let id = RESERVATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReservationId(format!("res-{id:06}"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReservationOutcome {
    Reserved(ReservationRecord),
    Refused(ValidationOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancellationOutcome {
    Cancelled(ReservationRecord),
    Refused(ValidationOutcome),
}

/// Queues holds on unavailable materials.
pub struct ReservationService {
    orchestrator: Arc<RuleOrchestrator>,
    reservations: Arc<dyn ReservationStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl ReservationService {
    pub fn new(
        orchestrator: Arc<RuleOrchestrator>,
        reservations: Arc<dyn ReservationStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orchestrator,
            reservations,
            notifier,
        }
    }

    pub fn reserve(
        &self,
        user_id: &UserId,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<ReservationOutcome, EngineError> {
        let validation = self
            .orchestrator
            .validate_reservation(user_id, material_id, as_of)?;
        if !validation.is_valid() {
            tracing::debug!(user = %user_id, material = %material_id, reasons = %validation.summary(), "reservation refused");
            return Ok(ReservationOutcome::Refused(validation));
        }

        let existing = self.reservations.reservations_for_material(material_id)?;

        if existing
            .iter()
            .any(|reservation| reservation.is_active() && &reservation.user_id == user_id)
        {
            return Ok(ReservationOutcome::Refused(ValidationOutcome::invalid(
                "An active reservation for this material already exists for the user",
            )));
        }

        let queue_position = existing
            .iter()
            .filter(|reservation| reservation.is_active())
            .count() as u32
            + 1;

        let record = ReservationRecord::new(
            next_reservation_id(),
            user_id.clone(),
            material_id.clone(),
            as_of,
            queue_position,
        );
        self.reservations.insert_reservation(record.clone())?;

        self.notifier.notify(
            user_id,
            &format!("Reservation created. Queue position: {queue_position}"),
        );
        tracing::info!(reservation = %record.id, user = %user_id, material = %material_id, queue_position, "reservation created");

        Ok(ReservationOutcome::Reserved(record))
    }

    /// Cancel and re-number the remaining queue for the material.
    pub fn cancel(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<CancellationOutcome, EngineError> {
        let mut reservation = self
            .reservations
            .reservation(reservation_id)?
            .ok_or_else(|| EngineError::not_found("reservation", reservation_id.as_str()))?;

        if !reservation.is_active() {
            return Ok(CancellationOutcome::Refused(ValidationOutcome::invalid(
                format!(
                    "Reservation is not active. Current status: {}",
                    reservation.status.label()
                ),
            )));
        }

        reservation.status = TransactionStatus::Cancelled;
        self.reservations.update_reservation(reservation.clone())?;

        let mut remaining: Vec<ReservationRecord> = self
            .reservations
            .reservations_for_material(&reservation.material_id)?
            .into_iter()
            .filter(ReservationRecord::is_active)
            .collect();
        remaining.sort_by_key(|record| record.queue_position);
        for (index, mut record) in remaining.into_iter().enumerate() {
            record.queue_position = index as u32 + 1;
            self.reservations.update_reservation(record)?;
        }

        self.notifier
            .notify(&reservation.user_id, "Your reservation has been cancelled");
        tracing::info!(reservation = %reservation.id, "reservation cancelled");

        Ok(CancellationOutcome::Cancelled(reservation))
    }

    /// Active reservations for the material, in queue order.
    pub fn queue_for(
        &self,
        material_id: &MaterialId,
    ) -> Result<Vec<ReservationRecord>, EngineError> {
        let mut queue: Vec<ReservationRecord> = self
            .reservations
            .reservations_for_material(material_id)?
            .into_iter()
            .filter(ReservationRecord::is_active)
            .collect();
        queue.sort_by_key(|record| record.queue_position);
        Ok(queue)
    }
}
