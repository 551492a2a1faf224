use std::sync::Arc;

use crate::domain::{Fine, FineDetail, FineKind, MaterialKind, MaterialRecord};
use crate::error::EngineError;
use crate::store::MaterialStore;

use super::context::FineCase;
use super::{next_fine_id, FineCalculator};

pub const DEFAULT_LOSS_SURCHARGE: f64 = 0.20;

/// Prices a lost material at its estimated replacement value plus a fixed
/// surcharge fraction.
pub struct LossFineCalculator {
    materials: Arc<dyn MaterialStore>,
    surcharge: f64,
}

impl LossFineCalculator {
    pub fn new(materials: Arc<dyn MaterialStore>) -> Self {
        Self::with_surcharge(materials, DEFAULT_LOSS_SURCHARGE)
    }

    pub fn with_surcharge(materials: Arc<dyn MaterialStore>, surcharge: f64) -> Self {
        Self {
            materials,
            surcharge,
        }
    }

    /// Category-dependent base value with material-specific adjustments:
    /// audiovisual value scales with runtime, periodicals carry a premium
    /// for the current issue.
    pub fn replacement_value(material: &MaterialRecord) -> f64 {
        match &material.kind {
            MaterialKind::Book => 50_000.0,
            MaterialKind::Bestseller => 80_000.0,
            MaterialKind::Reference => 120_000.0,
            MaterialKind::Dvd { runtime_minutes } => 30_000.0 + f64::from(*runtime_minutes) * 100.0,
            MaterialKind::Magazine { current_issue } => {
                15_000.0 + if *current_issue { 5_000.0 } else { 0.0 }
            }
            MaterialKind::Ebook => 40_000.0,
        }
    }
}

impl FineCalculator for LossFineCalculator {
    fn can_handle(&self, case: &FineCase) -> bool {
        case.kind == FineKind::Loss
    }

    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        let material = self
            .materials
            .material(&case.material_id)?
            .ok_or_else(|| EngineError::not_found("material", case.material_id.as_str()))?;

        let replacement_value = Self::replacement_value(&material);

        Ok(Some(Fine::new(
            next_fine_id(),
            case.loan_id.clone(),
            case.user_id.clone(),
            case.as_of,
            format!("Loss of material '{}'", material.title),
            FineDetail::Loss {
                replacement_value,
                surcharge: self.surcharge,
            },
        )))
    }
}
