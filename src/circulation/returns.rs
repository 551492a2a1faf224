use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{
    DamageAssessment, Fine, FineKind, LoanId, LoanRecord, MaterialState, TransactionStatus,
    ValidationOutcome,
};
use crate::error::EngineError;
use crate::fines::{FineCase, FineDispatcher};
use crate::policy::BlockDecisionService;
use crate::store::{FineStore, LoanStore, MaterialStore, NotificationSink};

/// What a completed return produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    pub loan: LoanRecord,
    pub fines: Vec<Fine>,
}

impl ReturnReceipt {
    pub fn total_fines(&self) -> f64 {
        self.fines.iter().map(Fine::amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Completed(ReturnReceipt),
    Refused(ValidationOutcome),
}

/// Closes loans, prices the consequences, and triggers blocking when the
/// new fines tip the account over a threshold.
pub struct ReturnService {
    dispatcher: Arc<FineDispatcher>,
    loans: Arc<dyn LoanStore>,
    materials: Arc<dyn MaterialStore>,
    fines: Arc<dyn FineStore>,
    blocking: Arc<BlockDecisionService>,
    notifier: Arc<dyn NotificationSink>,
}

impl ReturnService {
    pub fn new(
        dispatcher: Arc<FineDispatcher>,
        loans: Arc<dyn LoanStore>,
        materials: Arc<dyn MaterialStore>,
        fines: Arc<dyn FineStore>,
        blocking: Arc<BlockDecisionService>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            dispatcher,
            loans,
            materials,
            fines,
            blocking,
            notifier,
        }
    }

    pub fn process_return(
        &self,
        loan_id: &LoanId,
        as_of: NaiveDateTime,
        assessment: Option<DamageAssessment>,
    ) -> Result<ReturnOutcome, EngineError> {
        let mut loan = self
            .loans
            .loan(loan_id)?
            .ok_or_else(|| EngineError::not_found("loan", loan_id.as_str()))?;

        if loan.returned_at.is_some() {
            return Ok(ReturnOutcome::Refused(ValidationOutcome::invalid(
                "This loan was already returned",
            )));
        }

        let mut material = self
            .materials
            .material(&loan.material_id)?
            .ok_or_else(|| EngineError::not_found("material", loan.material_id.as_str()))?;

        // Fines are computed against the still-open loan; the return date is
        // stamped afterwards so the lateness window is the real one.
        let mut issued = Vec::new();

        if as_of > loan.due_at {
            let case = FineCase::new(
                FineKind::LateReturn,
                loan.id.clone(),
                material.id.clone(),
                loan.user_id.clone(),
                as_of,
            );
            if let Some(fine) = self.dispatcher.calculate(&case)? {
                self.fines.insert_fine(fine.clone())?;
                issued.push(fine);
            }
        }

        if let Some(assessment) = &assessment {
            if assessment.has_damage() {
                let case = FineCase::new(
                    FineKind::Damage,
                    loan.id.clone(),
                    material.id.clone(),
                    loan.user_id.clone(),
                    as_of,
                )
                .with_assessment(assessment.clone());
                if let Some(fine) = self.dispatcher.calculate(&case)? {
                    self.fines.insert_fine(fine.clone())?;
                    issued.push(fine);
                }
            }
        }

        loan.returned_at = Some(as_of);
        loan.status = TransactionStatus::Completed;
        self.loans.update_loan(loan.clone())?;

        material.state = match &assessment {
            Some(assessment) if !assessment.usable() => MaterialState::UnderRepair,
            _ => MaterialState::Available,
        };
        self.materials.update_material(material)?;

        if !issued.is_empty() {
            self.blocking.enforce(&loan.user_id, as_of)?;
        }

        let receipt = ReturnReceipt {
            loan: loan.clone(),
            fines: issued,
        };
        self.notifier.notify(
            &loan.user_id,
            &format!(
                "Return processed. Outstanding charges from this return: ${:.2}",
                receipt.total_fines()
            ),
        );
        tracing::info!(loan = %loan.id, user = %loan.user_id, fines = receipt.fines.len(), "return processed");

        Ok(ReturnOutcome::Completed(receipt))
    }
}
