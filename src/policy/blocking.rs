use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{FineKind, UserId, UserStatus, ValidationOutcome};
use crate::error::EngineError;
use crate::store::{FineStore, LoanStore, UserStore};

/// Criteria thresholds for blocking an account. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockThresholds {
    pub max_pending_amount: f64,
    pub max_pending_count: u32,
    pub max_overdue_days: i64,
}

impl Default for BlockThresholds {
    fn default() -> Self {
        Self {
            max_pending_amount: 50_000.0,
            max_pending_count: 3,
            max_overdue_days: 30,
        }
    }
}

/// Result of a block or unblock request.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockTransition {
    Applied { status: UserStatus },
    Unchanged { status: UserStatus },
    Refused { reasons: Vec<String> },
}

/// Account snapshot for dashboards and host reporting.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatusView {
    pub user_id: UserId,
    pub status: &'static str,
    pub pending_fine_count: usize,
    pub pending_fine_total: f64,
    pub overdue_loan_count: usize,
}

/// Evaluates the blocking criteria and drives user status transitions.
pub struct BlockDecisionService {
    users: Arc<dyn UserStore>,
    fines: Arc<dyn FineStore>,
    loans: Arc<dyn LoanStore>,
    thresholds: BlockThresholds,
}

impl BlockDecisionService {
    pub fn new(
        users: Arc<dyn UserStore>,
        fines: Arc<dyn FineStore>,
        loans: Arc<dyn LoanStore>,
        thresholds: BlockThresholds,
    ) -> Self {
        Self {
            users,
            fines,
            loans,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> BlockThresholds {
        self.thresholds
    }

    /// Invalid means "this account should be blocked". Every criterion is
    /// evaluated; nothing short-circuits, so the outcome carries one error
    /// per triggered criterion.
    pub fn should_block(
        &self,
        user_id: &UserId,
        as_of: NaiveDateTime,
    ) -> Result<ValidationOutcome, EngineError> {
        if self.users.user(user_id)?.is_none() {
            return Err(EngineError::not_found("user", user_id.as_str()));
        }

        let pending = self.fines.pending_fines_for_user(user_id)?;
        let mut reasons = Vec::new();

        let total: f64 = pending.iter().map(|fine| fine.amount()).sum();
        if total > self.thresholds.max_pending_amount {
            reasons.push(format!(
                "Pending fines (${total:.2}) exceed the allowed threshold (${:.2})",
                self.thresholds.max_pending_amount
            ));
        }

        if pending.len() as u32 >= self.thresholds.max_pending_count {
            reasons.push(format!(
                "{} pending fine(s) on record (limit: {})",
                pending.len(),
                self.thresholds.max_pending_count
            ));
        }

        if pending.iter().any(|fine| fine.kind() == FineKind::Loss) {
            reasons.push("Materials reported as lost remain unresolved".to_string());
        }

        let overdue = self.overdue_loan_count(user_id, as_of)?;
        if overdue > 0 {
            reasons.push(format!(
                "{overdue} loan(s) overdue by more than {} days",
                self.thresholds.max_overdue_days
            ));
        }

        if reasons.is_empty() {
            Ok(ValidationOutcome::valid())
        } else {
            Ok(ValidationOutcome::invalid_many(reasons))
        }
    }

    /// Transition the account into the blocked sub-type derived from its
    /// pending fines: loss takes precedence over fines, which takes
    /// precedence over a generic suspension.
    pub fn block(
        &self,
        user_id: &UserId,
        reason: &str,
        _as_of: NaiveDateTime,
    ) -> Result<BlockTransition, EngineError> {
        let mut user = self
            .users
            .user(user_id)?
            .ok_or_else(|| EngineError::not_found("user", user_id.as_str()))?;

        let target = self.classify_block(user_id)?;
        if user.status == target {
            return Ok(BlockTransition::Unchanged {
                status: user.status,
            });
        }

        user.status = target;
        self.users.update_user(user)?;
        tracing::info!(user = %user_id, status = target.label(), reason, "user blocked");

        Ok(BlockTransition::Applied { status: target })
    }

    /// Return to Active, refused while any blocking criterion persists.
    pub fn unblock(
        &self,
        user_id: &UserId,
        as_of: NaiveDateTime,
    ) -> Result<BlockTransition, EngineError> {
        let mut user = self
            .users
            .user(user_id)?
            .ok_or_else(|| EngineError::not_found("user", user_id.as_str()))?;

        if user.status == UserStatus::Active {
            return Ok(BlockTransition::Unchanged {
                status: UserStatus::Active,
            });
        }

        let verdict = self.should_block(user_id, as_of)?;
        if !verdict.is_valid() {
            return Ok(BlockTransition::Refused {
                reasons: verdict.errors().to_vec(),
            });
        }

        user.status = UserStatus::Active;
        self.users.update_user(user)?;
        tracing::info!(user = %user_id, "user unblocked");

        Ok(BlockTransition::Applied {
            status: UserStatus::Active,
        })
    }

    /// Apply a block when the criteria currently hold; no-op otherwise.
    pub fn enforce(
        &self,
        user_id: &UserId,
        as_of: NaiveDateTime,
    ) -> Result<Option<BlockTransition>, EngineError> {
        let verdict = self.should_block(user_id, as_of)?;
        if verdict.is_valid() {
            return Ok(None);
        }
        let transition = self.block(user_id, &verdict.summary(), as_of)?;
        Ok(Some(transition))
    }

    pub fn account_status(
        &self,
        user_id: &UserId,
        as_of: NaiveDateTime,
    ) -> Result<AccountStatusView, EngineError> {
        let user = self
            .users
            .user(user_id)?
            .ok_or_else(|| EngineError::not_found("user", user_id.as_str()))?;

        let pending = self.fines.pending_fines_for_user(user_id)?;
        let total: f64 = pending.iter().map(|fine| fine.amount()).sum();

        Ok(AccountStatusView {
            user_id: user.id,
            status: user.status.label(),
            pending_fine_count: pending.len(),
            pending_fine_total: total,
            overdue_loan_count: self.overdue_loan_count(user_id, as_of)?,
        })
    }

    fn overdue_loan_count(
        &self,
        user_id: &UserId,
        as_of: NaiveDateTime,
    ) -> Result<usize, EngineError> {
        let cutoff = as_of - Duration::days(self.thresholds.max_overdue_days);
        Ok(self
            .loans
            .loans_for_user(user_id)?
            .iter()
            .filter(|loan| loan.is_outstanding() && loan.due_at < cutoff)
            .count())
    }

    fn classify_block(&self, user_id: &UserId) -> Result<UserStatus, EngineError> {
        let pending = self.fines.pending_fines_for_user(user_id)?;

        if pending.iter().any(|fine| fine.kind() == FineKind::Loss) {
            return Ok(UserStatus::BlockedForLoss);
        }
        if pending.iter().map(|fine| fine.amount()).sum::<f64>() > 0.0 {
            return Ok(UserStatus::BlockedForFines);
        }
        Ok(UserStatus::Suspended)
    }
}
