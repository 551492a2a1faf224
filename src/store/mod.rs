//! Narrow read/write interfaces the engine consumes from its host.
//!
//! The engine's contract with every store is read-then-write without any
//! atomicity guarantee for the pair; callers are responsible for keeping at
//! most one in-flight mutating operation per entity id. A versioned store
//! implementation can slot in behind these traits without engine changes.

mod memory;

pub use memory::MemoryStore;

use crate::domain::{
    Fine, FineId, LoanId, LoanRecord, MaterialId, MaterialRecord, ReservationId,
    ReservationRecord, UserId, UserRecord,
};
use crate::error::EngineError;

pub trait UserStore: Send + Sync {
    fn user(&self, id: &UserId) -> Result<Option<UserRecord>, EngineError>;
    fn update_user(&self, record: UserRecord) -> Result<(), EngineError>;
}

pub trait MaterialStore: Send + Sync {
    fn material(&self, id: &MaterialId) -> Result<Option<MaterialRecord>, EngineError>;
    fn update_material(&self, record: MaterialRecord) -> Result<(), EngineError>;
}

pub trait LoanStore: Send + Sync {
    fn loan(&self, id: &LoanId) -> Result<Option<LoanRecord>, EngineError>;
    fn loans_for_user(&self, id: &UserId) -> Result<Vec<LoanRecord>, EngineError>;
    fn loans_for_material(&self, id: &MaterialId) -> Result<Vec<LoanRecord>, EngineError>;
    fn insert_loan(&self, record: LoanRecord) -> Result<(), EngineError>;
    fn update_loan(&self, record: LoanRecord) -> Result<(), EngineError>;
}

pub trait FineStore: Send + Sync {
    fn fine(&self, id: &FineId) -> Result<Option<Fine>, EngineError>;
    fn fines_for_user(&self, id: &UserId) -> Result<Vec<Fine>, EngineError>;
    fn insert_fine(&self, fine: Fine) -> Result<(), EngineError>;
    fn update_fine(&self, fine: Fine) -> Result<(), EngineError>;

    fn pending_fines_for_user(&self, id: &UserId) -> Result<Vec<Fine>, EngineError> {
        Ok(self
            .fines_for_user(id)?
            .into_iter()
            .filter(Fine::is_pending)
            .collect())
    }
}

pub trait ReservationStore: Send + Sync {
    fn reservation(&self, id: &ReservationId) -> Result<Option<ReservationRecord>, EngineError>;
    fn reservations_for_material(
        &self,
        id: &MaterialId,
    ) -> Result<Vec<ReservationRecord>, EngineError>;
    fn insert_reservation(&self, record: ReservationRecord) -> Result<(), EngineError>;
    fn update_reservation(&self, record: ReservationRecord) -> Result<(), EngineError>;
}

/// Outbound notification hook. Delivery is owned by the host system.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, user_id: &UserId, message: &str);
}

/// Default sink for hosts that do not wire notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify(&self, user_id: &UserId, message: &str) {
        tracing::debug!(user = %user_id, message, "notification suppressed");
    }
}
