use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{LoanId, LoanRecord, ValidationOutcome};
use crate::error::EngineError;
use crate::policy::LoanDurationPolicy;
use crate::rules::RuleOrchestrator;
use crate::store::{LoanStore, MaterialStore, NotificationSink, UserStore};

#[derive(Debug, Clone, PartialEq)]
pub struct RenewalReceipt {
    pub loan: LoanRecord,
    pub renewals_remaining: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenewalOutcome {
    Renewed(RenewalReceipt),
    Refused(ValidationOutcome),
}

/// Extends due dates for loans the orchestrator clears for renewal.
pub struct RenewalService {
    orchestrator: Arc<RuleOrchestrator>,
    durations: Arc<LoanDurationPolicy>,
    users: Arc<dyn UserStore>,
    materials: Arc<dyn MaterialStore>,
    loans: Arc<dyn LoanStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl RenewalService {
    pub fn new(
        orchestrator: Arc<RuleOrchestrator>,
        durations: Arc<LoanDurationPolicy>,
        users: Arc<dyn UserStore>,
        materials: Arc<dyn MaterialStore>,
        loans: Arc<dyn LoanStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orchestrator,
            durations,
            users,
            materials,
            loans,
            notifier,
        }
    }

    /// Re-dates the loan from `as_of`, not from the old due date.
    pub fn renew(
        &self,
        loan_id: &LoanId,
        as_of: NaiveDateTime,
    ) -> Result<RenewalOutcome, EngineError> {
        let validation = self.orchestrator.validate_renewal(loan_id, as_of)?;
        if !validation.is_valid() {
            tracing::debug!(loan = %loan_id, reasons = %validation.summary(), "renewal refused");
            return Ok(RenewalOutcome::Refused(validation));
        }

        let mut loan = self
            .loans
            .loan(loan_id)?
            .ok_or_else(|| EngineError::not_found("loan", loan_id.as_str()))?;
        let material = self
            .materials
            .material(&loan.material_id)?
            .ok_or_else(|| EngineError::not_found("material", loan.material_id.as_str()))?;
        let user = self
            .users
            .user(&loan.user_id)?
            .ok_or_else(|| EngineError::not_found("user", loan.user_id.as_str()))?;

        loan.due_at = self
            .durations
            .due_date(as_of, material.category(), user.category);
        loan.renewals_used += 1;
        self.loans.update_loan(loan.clone())?;

        let renewals_remaining = self
            .durations
            .max_renewals(user.category)
            .saturating_sub(loan.renewals_used);

        self.notifier.notify(
            &loan.user_id,
            &format!(
                "Loan renewed. New due date: {}. Renewals remaining: {renewals_remaining}",
                loan.due_at.date()
            ),
        );
        tracing::info!(loan = %loan.id, due = %loan.due_at, renewals_remaining, "loan renewed");

        Ok(RenewalOutcome::Renewed(RenewalReceipt {
            loan,
            renewals_remaining,
        }))
    }

    /// Renewals still open to the loan's holder; zero for unknown loans.
    pub fn renewals_remaining(&self, loan_id: &LoanId) -> Result<u32, EngineError> {
        let loan = match self.loans.loan(loan_id)? {
            Some(loan) => loan,
            None => return Ok(0),
        };
        let user = self
            .users
            .user(&loan.user_id)?
            .ok_or_else(|| EngineError::not_found("user", loan.user_id.as_str()))?;

        Ok(self
            .durations
            .max_renewals(user.category)
            .saturating_sub(loan.renewals_used))
    }

    /// Latest theoretical due date if the holder used every renewal.
    pub fn max_due_date(&self, loan_id: &LoanId) -> Result<NaiveDateTime, EngineError> {
        let loan = self
            .loans
            .loan(loan_id)?
            .ok_or_else(|| EngineError::not_found("loan", loan_id.as_str()))?;
        let material = self
            .materials
            .material(&loan.material_id)?
            .ok_or_else(|| EngineError::not_found("material", loan.material_id.as_str()))?;
        let user = self
            .users
            .user(&loan.user_id)?
            .ok_or_else(|| EngineError::not_found("user", loan.user_id.as_str()))?;

        Ok(self
            .durations
            .max_due_date(loan.started_at, material.category(), user.category))
    }
}
