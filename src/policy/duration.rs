use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Duration, NaiveDateTime};

use crate::domain::{MaterialCategory, UserCategory};

const DEFAULT_LOAN_DAYS: i64 = 7;
const DEFAULT_MAX_RENEWALS: u32 = 2;

/// Loan length and renewal allowances per (material category, user category).
pub struct LoanDurationPolicy {
    durations: RwLock<HashMap<(MaterialCategory, UserCategory), i64>>,
    max_renewals: RwLock<HashMap<UserCategory, u32>>,
}

impl LoanDurationPolicy {
    pub fn days_for(&self, material: MaterialCategory, user: UserCategory) -> i64 {
        self.durations
            .read()
            .expect("duration lock poisoned")
            .get(&(material, user))
            .copied()
            .unwrap_or(DEFAULT_LOAN_DAYS)
    }

    pub fn due_date(
        &self,
        start: NaiveDateTime,
        material: MaterialCategory,
        user: UserCategory,
    ) -> NaiveDateTime {
        start + Duration::days(self.days_for(material, user))
    }

    /// Whether the combination is ever loanable (a zero-day allowance is not).
    pub fn is_borrowable(&self, material: MaterialCategory, user: UserCategory) -> bool {
        self.days_for(material, user) > 0
    }

    pub fn max_renewals(&self, user: UserCategory) -> u32 {
        self.max_renewals
            .read()
            .expect("renewal lock poisoned")
            .get(&user)
            .copied()
            .unwrap_or(DEFAULT_MAX_RENEWALS)
    }

    /// Latest theoretical due date when every renewal is used: each renewal
    /// adds half the base allowance (integer division). Reporting only.
    pub fn max_due_date(
        &self,
        start: NaiveDateTime,
        material: MaterialCategory,
        user: UserCategory,
    ) -> NaiveDateTime {
        let base = self.days_for(material, user);
        let per_renewal = base / 2;
        let total = base + per_renewal * i64::from(self.max_renewals(user));
        start + Duration::days(total)
    }

    pub fn set_days(&self, material: MaterialCategory, user: UserCategory, days: i64) {
        self.durations
            .write()
            .expect("duration lock poisoned")
            .insert((material, user), days);
    }

    pub fn set_max_renewals(&self, user: UserCategory, renewals: u32) {
        self.max_renewals
            .write()
            .expect("renewal lock poisoned")
            .insert(user, renewals);
    }
}

impl Default for LoanDurationPolicy {
    fn default() -> Self {
        use MaterialCategory::*;
        use UserCategory::*;

        let mut durations = HashMap::new();
        let table: &[(MaterialCategory, [i64; 4])] = &[
            (Book, [15, 30, 45, 10]),
            (Bestseller, [7, 15, 20, 5]),
            (Reference, [0, 2, 3, 0]),
            (Dvd, [3, 7, 10, 2]),
            (Magazine, [5, 10, 15, 3]),
            (Ebook, [7, 14, 21, 5]),
        ];
        for (material, days) in table {
            durations.insert((*material, Student), days[0]);
            durations.insert((*material, Faculty), days[1]);
            durations.insert((*material, Researcher), days[2]);
            durations.insert((*material, GeneralPublic), days[3]);
        }

        let mut max_renewals = HashMap::new();
        max_renewals.insert(Student, 2);
        max_renewals.insert(Faculty, 3);
        max_renewals.insert(Researcher, 4);
        max_renewals.insert(GeneralPublic, 1);

        Self {
            durations: RwLock::new(durations),
            max_renewals: RwLock::new(max_renewals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn due_date_adds_the_configured_allowance() {
        let policy = LoanDurationPolicy::default();
        let due = policy.due_date(start(), MaterialCategory::Book, UserCategory::Student);
        assert_eq!(due, start() + Duration::days(15));
    }

    #[test]
    fn unconfigured_combinations_default_to_seven_days() {
        let bare = LoanDurationPolicy {
            durations: RwLock::new(HashMap::new()),
            max_renewals: RwLock::new(HashMap::new()),
        };
        assert_eq!(
            bare.days_for(MaterialCategory::Dvd, UserCategory::Faculty),
            7
        );
        assert_eq!(bare.max_renewals(UserCategory::Faculty), 2);
    }

    #[test]
    fn reference_material_is_not_borrowable_by_students() {
        let policy = LoanDurationPolicy::default();
        assert!(!policy.is_borrowable(MaterialCategory::Reference, UserCategory::Student));
        assert!(policy.is_borrowable(MaterialCategory::Reference, UserCategory::Faculty));
    }

    #[test]
    fn max_due_date_adds_half_allowance_per_renewal() {
        let policy = LoanDurationPolicy::default();
        // Student book: 15 days base, 2 renewals of 7 days each.
        let max = policy.max_due_date(start(), MaterialCategory::Book, UserCategory::Student);
        assert_eq!(max, start() + Duration::days(15 + 7 * 2));
    }

    #[test]
    fn renewal_caps_follow_the_category_table() {
        let policy = LoanDurationPolicy::default();
        assert_eq!(policy.max_renewals(UserCategory::Student), 2);
        assert_eq!(policy.max_renewals(UserCategory::GeneralPublic), 1);

        policy.set_max_renewals(UserCategory::Student, 4);
        assert_eq!(policy.max_renewals(UserCategory::Student), 4);
    }
}
