use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::availability::AvailabilityService;
use crate::domain::{
    LoanId, LoanRecord, MaterialId, MaterialState, UserId, ValidationOutcome,
};
use crate::error::EngineError;
use crate::policy::LoanDurationPolicy;
use crate::rules::RuleOrchestrator;
use crate::store::{LoanStore, MaterialStore, NotificationSink, UserStore};

static LOAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_loan_id() -> LoanId {
    let id = LOAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LoanId(format!("loan-{id:06}"))
}

/// Result of a borrow request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoanRequestOutcome {
    Registered(LoanRecord),
    Refused(ValidationOutcome),
}

/// Registers loans once the orchestrator clears the request.
pub struct LoanService {
    orchestrator: Arc<RuleOrchestrator>,
    availability: Arc<AvailabilityService>,
    durations: Arc<LoanDurationPolicy>,
    users: Arc<dyn UserStore>,
    materials: Arc<dyn MaterialStore>,
    loans: Arc<dyn LoanStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl LoanService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        orchestrator: Arc<RuleOrchestrator>,
        availability: Arc<AvailabilityService>,
        durations: Arc<LoanDurationPolicy>,
        users: Arc<dyn UserStore>,
        materials: Arc<dyn MaterialStore>,
        loans: Arc<dyn LoanStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orchestrator,
            availability,
            durations,
            users,
            materials,
            loans,
            notifier,
        }
    }

    pub fn register_loan(
        &self,
        user_id: &UserId,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<LoanRequestOutcome, EngineError> {
        let validation = self
            .orchestrator
            .validate_borrow(user_id, material_id, as_of)?;
        if !validation.is_valid() {
            tracing::debug!(user = %user_id, material = %material_id, reasons = %validation.summary(), "borrow refused");
            return Ok(LoanRequestOutcome::Refused(validation));
        }

        let user = self
            .users
            .user(user_id)?
            .ok_or_else(|| EngineError::not_found("user", user_id.as_str()))?;
        let mut material = self
            .materials
            .material(material_id)?
            .ok_or_else(|| EngineError::not_found("material", material_id.as_str()))?;

        if !self.availability.is_loanable(material_id)? {
            return Ok(LoanRequestOutcome::Refused(ValidationOutcome::invalid(
                format!(
                    "Material category is not loanable: {}",
                    material.title
                ),
            )));
        }

        let due_at = self
            .durations
            .due_date(as_of, material.category(), user.category);
        let loan = LoanRecord::new(
            next_loan_id(),
            user.id.clone(),
            material.id.clone(),
            as_of,
            due_at,
        );

        self.loans.insert_loan(loan.clone())?;
        material.state = MaterialState::Loaned;
        self.materials.update_material(material)?;

        self.notifier.notify(
            user_id,
            &format!("Loan registered. Due back on {}", due_at.date()),
        );
        tracing::info!(loan = %loan.id, user = %user_id, material = %material_id, due = %due_at, "loan registered");

        Ok(LoanRequestOutcome::Registered(loan))
    }

    /// The user's loans that are active and not yet returned.
    pub fn active_loans(&self, user_id: &UserId) -> Result<Vec<LoanRecord>, EngineError> {
        Ok(self
            .loans
            .loans_for_user(user_id)?
            .into_iter()
            .filter(LoanRecord::is_outstanding)
            .collect())
    }
}
