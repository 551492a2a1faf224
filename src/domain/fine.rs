use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::damage::DamageRecord;
use super::ids::{FineId, LoanId, UserId};
use crate::error::EngineError;

/// Discriminant selecting a fine calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FineKind {
    LateReturn,
    Damage,
    Loss,
    Administrative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
}

impl FineStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FineStatus::Pending => "pending",
            FineStatus::Paid => "paid",
            FineStatus::Waived => "waived",
        }
    }
}

/// Variant-specific pricing inputs; `Fine::amount` derives the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FineDetail {
    LateReturn {
        days_late: i64,
        daily_tariff: f64,
    },
    Damage {
        records: Vec<DamageRecord>,
        repair_cost: f64,
    },
    Loss {
        replacement_value: f64,
        surcharge: f64,
    },
    Administrative {
        fee: f64,
    },
}

impl FineDetail {
    pub const fn kind(&self) -> FineKind {
        match self {
            FineDetail::LateReturn { .. } => FineKind::LateReturn,
            FineDetail::Damage { .. } => FineKind::Damage,
            FineDetail::Loss { .. } => FineKind::Loss,
            FineDetail::Administrative { .. } => FineKind::Administrative,
        }
    }
}

/// A monetary penalty attached to a loan.
///
/// Pending is the only state that accepts a transition; Paid and Waived are
/// terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    pub id: FineId,
    pub loan_id: LoanId,
    pub user_id: UserId,
    pub issued_at: NaiveDateTime,
    pub paid_at: Option<NaiveDateTime>,
    pub status: FineStatus,
    pub reason: String,
    pub detail: FineDetail,
}

impl Fine {
    pub fn new(
        id: FineId,
        loan_id: LoanId,
        user_id: UserId,
        issued_at: NaiveDateTime,
        reason: impl Into<String>,
        detail: FineDetail,
    ) -> Self {
        Self {
            id,
            loan_id,
            user_id,
            issued_at,
            paid_at: None,
            status: FineStatus::Pending,
            reason: reason.into(),
            detail,
        }
    }

    pub fn kind(&self) -> FineKind {
        self.detail.kind()
    }

    pub fn is_pending(&self) -> bool {
        self.status == FineStatus::Pending
    }

    pub fn amount(&self) -> f64 {
        match &self.detail {
            FineDetail::LateReturn {
                days_late,
                daily_tariff,
            } => *days_late as f64 * daily_tariff,
            FineDetail::Damage { repair_cost, .. } => *repair_cost,
            FineDetail::Loss {
                replacement_value,
                surcharge,
            } => replacement_value * (1.0 + surcharge),
            FineDetail::Administrative { fee } => *fee,
        }
    }

    /// Pending → Paid, stamping the payment time. Repeat attempts are
    /// rejected so a payment is never double-counted.
    pub fn mark_paid(&mut self, at: NaiveDateTime) -> Result<(), EngineError> {
        if self.status != FineStatus::Pending {
            return Err(EngineError::invalid_argument(format!(
                "fine '{}' is not pending (status: {})",
                self.id,
                self.status.label()
            )));
        }
        self.status = FineStatus::Paid;
        self.paid_at = Some(at);
        Ok(())
    }

    /// Pending → Waived; same guard as payment.
    pub fn mark_waived(&mut self) -> Result<(), EngineError> {
        if self.status != FineStatus::Pending {
            return Err(EngineError::invalid_argument(format!(
                "fine '{}' is not pending (status: {})",
                self.id,
                self.status.label()
            )));
        }
        self.status = FineStatus::Waived;
        Ok(())
    }
}
