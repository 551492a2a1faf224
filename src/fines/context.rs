use chrono::NaiveDateTime;

use crate::domain::{DamageAssessment, FineKind, LoanId, MaterialId, UserId};

/// Immutable context for one fine computation.
///
/// Built once per computation; the kind is a required constructor argument so
/// a case can never reach the dispatcher without a discriminant.
#[derive(Debug, Clone)]
pub struct FineCase {
    pub kind: FineKind,
    pub loan_id: LoanId,
    pub material_id: MaterialId,
    pub user_id: UserId,
    pub as_of: NaiveDateTime,
    pub assessment: Option<DamageAssessment>,
}

impl FineCase {
    pub fn new(
        kind: FineKind,
        loan_id: LoanId,
        material_id: MaterialId,
        user_id: UserId,
        as_of: NaiveDateTime,
    ) -> Self {
        Self {
            kind,
            loan_id,
            material_id,
            user_id,
            as_of,
            assessment: None,
        }
    }

    pub fn with_assessment(mut self, assessment: DamageAssessment) -> Self {
        self.assessment = Some(assessment);
        self
    }
}
