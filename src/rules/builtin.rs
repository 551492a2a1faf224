use std::sync::Arc;

use crate::availability::AvailabilityService;
use crate::domain::{UserStatus, ValidationOutcome};
use crate::error::EngineError;
use crate::policy::{BlockDecisionService, BorrowingLimitPolicy};

use super::context::ValidationContext;
use super::EligibilityRule;

/// The account must be in the Active state.
pub struct UserActiveRule;

impl EligibilityRule for UserActiveRule {
    fn priority(&self) -> u8 {
        1
    }

    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError> {
        let user = match &context.user {
            Some(user) => user,
            None => {
                return Ok(ValidationOutcome::invalid(
                    "User not present in validation context",
                ))
            }
        };

        if user.status != UserStatus::Active {
            return Ok(ValidationOutcome::invalid(format!(
                "User is not active. Current status: {}",
                user.status.label()
            )));
        }

        Ok(ValidationOutcome::valid())
    }
}

/// The material must currently be available for circulation.
pub struct MaterialAvailableRule {
    availability: Arc<AvailabilityService>,
}

impl MaterialAvailableRule {
    pub fn new(availability: Arc<AvailabilityService>) -> Self {
        Self { availability }
    }
}

impl EligibilityRule for MaterialAvailableRule {
    fn priority(&self) -> u8 {
        2
    }

    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError> {
        let material = match &context.material {
            Some(material) => material,
            None => {
                return Ok(ValidationOutcome::invalid(
                    "Material not present in validation context",
                ))
            }
        };

        if !self.availability.is_available(&material.id)? {
            return Ok(ValidationOutcome::invalid(format!(
                "Material is not available. Current state: {}",
                material.state.label()
            )));
        }

        Ok(ValidationOutcome::valid())
    }
}

/// The account must not meet any blocking criterion.
pub struct UserNotBlockedRule {
    blocking: Arc<BlockDecisionService>,
}

impl UserNotBlockedRule {
    pub fn new(blocking: Arc<BlockDecisionService>) -> Self {
        Self { blocking }
    }
}

impl EligibilityRule for UserNotBlockedRule {
    fn priority(&self) -> u8 {
        2
    }

    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError> {
        if !context.has_user() {
            return Ok(ValidationOutcome::invalid(
                "User not present in validation context",
            ));
        }

        self.blocking.should_block(&context.user_id, context.as_of)
    }
}

/// The material id must resolve to a catalogued record.
pub struct MaterialExistsRule;

impl EligibilityRule for MaterialExistsRule {
    fn priority(&self) -> u8 {
        3
    }

    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError> {
        if !context.has_material() {
            return Ok(ValidationOutcome::invalid(format!(
                "Material not found: {}",
                context.material_id
            )));
        }
        Ok(ValidationOutcome::valid())
    }
}

/// The user must be below their category's concurrent-loan cap.
pub struct LimitNotExceededRule {
    limits: Arc<BorrowingLimitPolicy>,
}

impl LimitNotExceededRule {
    pub fn new(limits: Arc<BorrowingLimitPolicy>) -> Self {
        Self { limits }
    }
}

impl EligibilityRule for LimitNotExceededRule {
    fn priority(&self) -> u8 {
        4
    }

    fn validate(&self, context: &ValidationContext) -> Result<ValidationOutcome, EngineError> {
        let user = match &context.user {
            Some(user) => user,
            None => {
                return Ok(ValidationOutcome::invalid(
                    "User not present in validation context",
                ))
            }
        };

        self.limits.validate(&user.id, user.category)
    }
}
