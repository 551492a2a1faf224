use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::{LoanId, MaterialId, UserId};

/// Shared lifecycle for loans and reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TransactionStatus::Active => "active",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: LoanId,
    pub user_id: UserId,
    pub material_id: MaterialId,
    pub started_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
    pub renewals_used: u32,
    pub status: TransactionStatus,
}

impl LoanRecord {
    pub fn new(
        id: LoanId,
        user_id: UserId,
        material_id: MaterialId,
        started_at: NaiveDateTime,
        due_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            material_id,
            started_at,
            due_at,
            returned_at: None,
            renewals_used: 0,
            status: TransactionStatus::Active,
        }
    }

    /// Active and physically still out.
    pub fn is_outstanding(&self) -> bool {
        self.status == TransactionStatus::Active && self.returned_at.is_none()
    }

    /// Days past due at `as_of`; zero when returned or not yet due.
    pub fn days_overdue(&self, as_of: NaiveDateTime) -> i64 {
        if self.returned_at.is_some() || as_of < self.due_at {
            return 0;
        }
        as_of.signed_duration_since(self.due_at).num_days()
    }
}
