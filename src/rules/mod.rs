//! Eligibility rule chain and the orchestrator composing it with the
//! availability, blocking, and limit policies.

mod builtin;
mod context;

#[cfg(test)]
mod tests;

pub use builtin::{
    LimitNotExceededRule, MaterialAvailableRule, MaterialExistsRule, UserActiveRule,
    UserNotBlockedRule,
};
pub use context::ValidationContext;

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use crate::availability::AvailabilityService;
use crate::domain::{LoanId, MaterialId, TransactionStatus, UserId, ValidationOutcome};
use crate::error::EngineError;
use crate::policy::{BlockDecisionService, BorrowingLimitPolicy, LoanDurationPolicy};
use crate::store::{LoanStore, MaterialStore, ReservationStore, UserStore};

/// Renewals are refused once a loan is this far past due.
const RENEWAL_GRACE_DAYS: i64 = 7;

/// One named, prioritized predicate gating a circulation request.
///
/// Rules are stateless beyond constructor-injected collaborators. Lower
/// priority evaluates first; ties break by registration order.
pub trait EligibilityRule: Send + Sync {
    fn priority(&self) -> u8;
    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError>;
}

/// Answers "can this borrow / reservation / renewal proceed?".
pub struct RuleOrchestrator {
    users: Arc<dyn UserStore>,
    materials: Arc<dyn MaterialStore>,
    loans: Arc<dyn LoanStore>,
    reservations: Arc<dyn ReservationStore>,
    availability: Arc<AvailabilityService>,
    blocking: Arc<BlockDecisionService>,
    limits: Arc<BorrowingLimitPolicy>,
    durations: Arc<LoanDurationPolicy>,
    rules: Vec<Box<dyn EligibilityRule>>,
}

impl RuleOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserStore>,
        materials: Arc<dyn MaterialStore>,
        loans: Arc<dyn LoanStore>,
        reservations: Arc<dyn ReservationStore>,
        availability: Arc<AvailabilityService>,
        blocking: Arc<BlockDecisionService>,
        limits: Arc<BorrowingLimitPolicy>,
        durations: Arc<LoanDurationPolicy>,
    ) -> Self {
        Self {
            users,
            materials,
            loans,
            reservations,
            availability,
            blocking,
            limits,
            durations,
            rules: Vec::new(),
        }
    }

    /// Register an additional rule. No orchestrator change is needed for new
    /// rule variants; they only have to implement [`EligibilityRule`].
    pub fn register_rule(&mut self, rule: Box<dyn EligibilityRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn validate_borrow(
        &self,
        user_id: &UserId,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<ValidationOutcome, EngineError> {
        self.ensure_ids(user_id, material_id)?;

        let context = self.build_context(user_id, material_id, as_of)?;

        // Hard failures before soft rules.
        let user = match &context.user {
            Some(user) => user,
            None => return Ok(ValidationOutcome::invalid(format!("User not found: {user_id}"))),
        };
        let material = match &context.material {
            Some(material) => material,
            None => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Material not found: {material_id}"
                )))
            }
        };

        let mut outcome = ValidationOutcome::valid();

        if !self.availability.is_available(material_id)? {
            outcome = outcome.combine(ValidationOutcome::invalid(format!(
                "Material not available: {}",
                material.title
            )));
        }

        outcome = outcome.combine(self.blocking.should_block(user_id, as_of)?);

        if outcome.is_valid() {
            outcome = outcome.combine(self.limits.validate(user_id, user.category)?);
        }

        self.apply_rules(&context, outcome)
    }

    /// Reservations invert the availability check: only a currently
    /// unavailable material is eligible.
    pub fn validate_reservation(
        &self,
        user_id: &UserId,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<ValidationOutcome, EngineError> {
        self.ensure_ids(user_id, material_id)?;

        let context = self.build_context(user_id, material_id, as_of)?;

        if !context.has_user() {
            return Ok(ValidationOutcome::invalid(format!("User not found: {user_id}")));
        }
        let material = match &context.material {
            Some(material) => material,
            None => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Material not found: {material_id}"
                )))
            }
        };

        let mut outcome = ValidationOutcome::valid();

        outcome = outcome.combine(self.blocking.should_block(user_id, as_of)?);

        if self.availability.is_available(material_id)? {
            outcome = outcome.combine(ValidationOutcome::invalid(format!(
                "Material is available and does not require a reservation: {}",
                material.title
            )));
        }

        self.apply_rules(&context, outcome)
    }

    pub fn validate_renewal(
        &self,
        loan_id: &LoanId,
        as_of: NaiveDateTime,
    ) -> Result<ValidationOutcome, EngineError> {
        if loan_id.is_blank() {
            return Err(EngineError::invalid_argument("loan id must not be blank"));
        }

        let loan = match self.loans.loan(loan_id)? {
            Some(loan) => loan,
            None => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Loan '{loan_id}' does not exist"
                )))
            }
        };

        if loan.status != TransactionStatus::Active {
            return Ok(ValidationOutcome::invalid(format!(
                "Loan is not active. Current status: {}",
                loan.status.label()
            )));
        }

        let user = match self.users.user(&loan.user_id)? {
            Some(user) => user,
            None => {
                return Ok(ValidationOutcome::invalid(
                    "User associated with the loan was not found",
                ))
            }
        };

        let max_allowed = self.durations.max_renewals(user.category);
        if loan.renewals_used >= max_allowed {
            return Ok(ValidationOutcome::invalid(format!(
                "Renewal cap reached for this account: {max_allowed} allowed, {} used",
                loan.renewals_used
            )));
        }

        let has_active_reservation = self
            .reservations
            .reservations_for_material(&loan.material_id)?
            .iter()
            .any(|reservation| reservation.is_active());
        if has_active_reservation {
            return Ok(ValidationOutcome::invalid(
                "Cannot renew: active reservations exist for this material",
            ));
        }

        if as_of > loan.due_at + Duration::days(RENEWAL_GRACE_DAYS) {
            return Ok(ValidationOutcome::invalid(format!(
                "Loan is overdue by more than {RENEWAL_GRACE_DAYS} days; the material must be returned"
            )));
        }

        Ok(ValidationOutcome::valid())
    }

    fn ensure_ids(&self, user_id: &UserId, material_id: &MaterialId) -> Result<(), EngineError> {
        if user_id.is_blank() {
            return Err(EngineError::invalid_argument("user id must not be blank"));
        }
        if material_id.is_blank() {
            return Err(EngineError::invalid_argument(
                "material id must not be blank",
            ));
        }
        Ok(())
    }

    fn build_context(
        &self,
        user_id: &UserId,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<ValidationContext, EngineError> {
        Ok(ValidationContext {
            user_id: user_id.clone(),
            material_id: material_id.clone(),
            user: self.users.user(user_id)?,
            material: self.materials.material(material_id)?,
            as_of,
        })
    }

    /// Run every registered rule in ascending priority (stable on ties),
    /// folding with `combine` and stopping once the outcome turns invalid.
    fn apply_rules(
        &self,
        context: &ValidationContext,
        accumulated: ValidationOutcome,
    ) -> Result<ValidationOutcome, EngineError> {
        if self.rules.is_empty() {
            return Ok(accumulated);
        }

        let mut ordered: Vec<&dyn EligibilityRule> = self.rules.iter().map(Box::as_ref).collect();
        ordered.sort_by_key(|rule| rule.priority());

        let mut outcome = accumulated;
        for rule in ordered {
            if !outcome.is_valid() {
                break;
            }
            outcome = outcome.combine(rule.validate(context)?);
        }

        Ok(outcome)
    }
}
