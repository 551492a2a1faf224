use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::{UserCategory, UserId, ValidationOutcome};
use crate::error::EngineError;
use crate::store::{LoanStore, UserStore};

/// Per-category cap on concurrent loans.
///
/// Limits are mutable at runtime for administrative overrides but read-mostly
/// in normal operation.
pub struct BorrowingLimitPolicy {
    users: Arc<dyn UserStore>,
    loans: Arc<dyn LoanStore>,
    limits: RwLock<HashMap<UserCategory, u32>>,
}

impl BorrowingLimitPolicy {
    pub fn new(users: Arc<dyn UserStore>, loans: Arc<dyn LoanStore>) -> Self {
        let mut limits = HashMap::new();
        limits.insert(UserCategory::Student, 3);
        limits.insert(UserCategory::Faculty, 5);
        limits.insert(UserCategory::Researcher, 7);
        limits.insert(UserCategory::GeneralPublic, 2);

        Self {
            users,
            loans,
            limits: RwLock::new(limits),
        }
    }

    pub fn max_allowed(&self, category: UserCategory) -> u32 {
        self.limits
            .read()
            .expect("limit lock poisoned")
            .get(&category)
            .copied()
            .unwrap_or(0)
    }

    pub fn set_limit(&self, category: UserCategory, limit: u32) {
        self.limits
            .write()
            .expect("limit lock poisoned")
            .insert(category, limit);
    }

    /// Active, unreturned loans currently held by the user.
    pub fn current_count(&self, user_id: &UserId) -> Result<u32, EngineError> {
        let count = self
            .loans
            .loans_for_user(user_id)?
            .iter()
            .filter(|loan| loan.is_outstanding())
            .count();
        Ok(count as u32)
    }

    pub fn remaining_quota(&self, user_id: &UserId, category: UserCategory) -> Result<u32, EngineError> {
        let limit = self.max_allowed(category);
        let current = self.current_count(user_id)?;
        Ok(limit.saturating_sub(current))
    }

    pub fn validate(
        &self,
        user_id: &UserId,
        category: UserCategory,
    ) -> Result<ValidationOutcome, EngineError> {
        if user_id.is_blank() {
            return Err(EngineError::invalid_argument("user id must not be blank"));
        }

        if self.users.user(user_id)?.is_none() {
            return Ok(ValidationOutcome::invalid(format!(
                "User not found: {user_id}"
            )));
        }

        let limit = self.max_allowed(category);
        let current = self.current_count(user_id)?;

        if current >= limit {
            return Ok(ValidationOutcome::invalid(format!(
                "Borrowing limit reached. Limit: {limit}, currently borrowed: {current}"
            )));
        }

        Ok(ValidationOutcome::valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{LoanId, LoanRecord, MaterialId, UserRecord};
    use crate::store::MemoryStore;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, day)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time")
    }

    fn policy_with_loans(active: u32) -> (BorrowingLimitPolicy, UserId) {
        let users = Arc::new(MemoryStore::for_users());
        let loans = Arc::new(MemoryStore::for_loans());
        let user_id = UserId::new("u-1");
        users
            .insert(UserRecord::new(
                user_id.clone(),
                "Sam Okafor",
                "sam@example.org",
                UserCategory::Student,
                at(1),
            ))
            .expect("seed user");

        for n in 0..active {
            loans
                .insert(LoanRecord::new(
                    LoanId::new(format!("loan-{n}")),
                    user_id.clone(),
                    MaterialId::new(format!("m-{n}")),
                    at(1),
                    at(15),
                ))
                .expect("seed loan");
        }

        (BorrowingLimitPolicy::new(users, loans), user_id)
    }

    #[test]
    fn user_at_the_limit_fails_validation() {
        let (policy, user_id) = policy_with_loans(3);
        let outcome = policy
            .validate(&user_id, UserCategory::Student)
            .expect("validation runs");
        assert!(!outcome.is_valid());
        assert!(outcome.errors()[0].contains("Limit: 3"));
        assert!(outcome.errors()[0].contains("borrowed: 3"));
    }

    #[test]
    fn user_below_the_limit_passes() {
        let (policy, user_id) = policy_with_loans(2);
        let outcome = policy
            .validate(&user_id, UserCategory::Student)
            .expect("validation runs");
        assert!(outcome.is_valid());
        assert_eq!(
            policy
                .remaining_quota(&user_id, UserCategory::Student)
                .expect("quota"),
            1
        );
    }

    #[test]
    fn returned_loans_do_not_count() {
        let users = Arc::new(MemoryStore::for_users());
        let loans = Arc::new(MemoryStore::for_loans());
        let user_id = UserId::new("u-1");
        users
            .insert(UserRecord::new(
                user_id.clone(),
                "Sam Okafor",
                "sam@example.org",
                UserCategory::Student,
                at(1),
            ))
            .expect("seed user");
        let mut returned = LoanRecord::new(
            LoanId::new("loan-r"),
            user_id.clone(),
            MaterialId::new("m-r"),
            at(1),
            at(15),
        );
        returned.returned_at = Some(at(10));
        loans.insert(returned).expect("seed loan");

        let policy = BorrowingLimitPolicy::new(users, loans);
        assert_eq!(policy.current_count(&user_id).expect("count"), 0);
    }

    #[test]
    fn blank_ids_are_a_misuse() {
        let (policy, _) = policy_with_loans(0);
        assert!(matches!(
            policy.validate(&UserId::new("  "), UserCategory::Student),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn limits_are_overridable_at_runtime() {
        let (policy, user_id) = policy_with_loans(3);
        policy.set_limit(UserCategory::Student, 5);
        let outcome = policy
            .validate(&user_id, UserCategory::Student)
            .expect("validation runs");
        assert!(outcome.is_valid());
    }
}
