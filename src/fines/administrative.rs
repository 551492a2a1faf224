use crate::domain::{Fine, FineDetail, FineKind};
use crate::error::EngineError;

use super::context::FineCase;
use super::{next_fine_id, FineCalculator};

pub const DEFAULT_ADMINISTRATIVE_FEE: f64 = 5_000.0;

/// Flat-fee charge, no lookups.
pub struct AdministrativeFineCalculator {
    fee: f64,
}

impl AdministrativeFineCalculator {
    pub fn new() -> Self {
        Self::with_fee(DEFAULT_ADMINISTRATIVE_FEE)
    }

    pub fn with_fee(fee: f64) -> Self {
        Self { fee }
    }
}

impl Default for AdministrativeFineCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl FineCalculator for AdministrativeFineCalculator {
    fn can_handle(&self, case: &FineCase) -> bool {
        case.kind == FineKind::Administrative
    }

    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        Ok(Some(Fine::new(
            next_fine_id(),
            case.loan_id.clone(),
            case.user_id.clone(),
            case.as_of,
            "Administrative charge",
            FineDetail::Administrative { fee: self.fee },
        )))
    }
}
