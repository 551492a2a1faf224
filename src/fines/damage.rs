use std::sync::Arc;

use crate::domain::{Fine, FineDetail, FineKind};
use crate::error::EngineError;

use super::context::FineCase;
use super::cost_table::DamageCostTable;
use super::{next_fine_id, FineCalculator};

/// Prices damage as the cost-table sum over all recorded findings.
pub struct DamageFineCalculator {
    cost_table: Arc<DamageCostTable>,
}

impl DamageFineCalculator {
    pub fn new(cost_table: Arc<DamageCostTable>) -> Self {
        Self { cost_table }
    }
}

impl FineCalculator for DamageFineCalculator {
    fn can_handle(&self, case: &FineCase) -> bool {
        case.kind == FineKind::Damage
    }

    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        let assessment = match &case.assessment {
            Some(assessment) if assessment.has_damage() => assessment,
            _ => return Ok(None),
        };

        let records = assessment.records().to_vec();
        let repair_cost = self.cost_table.total_cost(&records);

        Ok(Some(Fine::new(
            next_fine_id(),
            case.loan_id.clone(),
            case.user_id.clone(),
            case.as_of,
            format!("Damage to borrowed material ({} finding(s))", records.len()),
            FineDetail::Damage {
                records,
                repair_cost,
            },
        )))
    }
}
