use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::{Fine, FineDetail, FineKind, MaterialCategory};
use crate::error::EngineError;
use crate::store::{LoanStore, MaterialStore};

use super::context::FineCase;
use super::{next_fine_id, FineCalculator};

const DEFAULT_DAILY_TARIFF: f64 = 1_000.0;

/// Prices lateness with a per-day tariff keyed by the loaned material's
/// category. Digital material carries a zero tariff.
pub struct LateReturnCalculator {
    loans: Arc<dyn LoanStore>,
    materials: Arc<dyn MaterialStore>,
    tariffs: RwLock<HashMap<MaterialCategory, f64>>,
}

impl LateReturnCalculator {
    pub fn new(loans: Arc<dyn LoanStore>, materials: Arc<dyn MaterialStore>) -> Self {
        let mut tariffs = HashMap::new();
        tariffs.insert(MaterialCategory::Book, 1_000.0);
        tariffs.insert(MaterialCategory::Bestseller, 2_000.0);
        tariffs.insert(MaterialCategory::Reference, 1_500.0);
        tariffs.insert(MaterialCategory::Dvd, 3_000.0);
        tariffs.insert(MaterialCategory::Magazine, 500.0);
        tariffs.insert(MaterialCategory::Ebook, 0.0);

        Self {
            loans,
            materials,
            tariffs: RwLock::new(tariffs),
        }
    }

    pub fn daily_tariff(&self, category: MaterialCategory) -> f64 {
        self.tariffs
            .read()
            .expect("tariff lock poisoned")
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_DAILY_TARIFF)
    }

    pub fn set_daily_tariff(&self, category: MaterialCategory, tariff: f64) {
        self.tariffs
            .write()
            .expect("tariff lock poisoned")
            .insert(category, tariff);
    }
}

impl FineCalculator for LateReturnCalculator {
    fn can_handle(&self, case: &FineCase) -> bool {
        case.kind == FineKind::LateReturn
    }

    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        let loan = self
            .loans
            .loan(&case.loan_id)?
            .ok_or_else(|| EngineError::not_found("loan", case.loan_id.as_str()))?;

        let days_late = loan.days_overdue(case.as_of);
        if days_late <= 0 {
            return Ok(None);
        }

        let material = self
            .materials
            .material(&loan.material_id)?
            .ok_or_else(|| EngineError::not_found("material", loan.material_id.as_str()))?;

        let daily_tariff = self.daily_tariff(material.category());

        Ok(Some(Fine::new(
            next_fine_id(),
            loan.id.clone(),
            loan.user_id.clone(),
            case.as_of,
            format!("Returned {days_late} day(s) past the due date"),
            FineDetail::LateReturn {
                days_late,
                daily_tariff,
            },
        )))
    }
}
