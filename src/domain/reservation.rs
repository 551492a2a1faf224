use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::{MaterialId, ReservationId, UserId};
use super::loan::TransactionStatus;

/// A queued hold on a material that is currently not available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub user_id: UserId,
    pub material_id: MaterialId,
    pub reserved_at: NaiveDateTime,
    pub queue_position: u32,
    pub status: TransactionStatus,
}

impl ReservationRecord {
    pub fn new(
        id: ReservationId,
        user_id: UserId,
        material_id: MaterialId,
        reserved_at: NaiveDateTime,
        queue_position: u32,
    ) -> Self {
        Self {
            id,
            user_id,
            material_id,
            reserved_at,
            queue_position,
            status: TransactionStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }
}
