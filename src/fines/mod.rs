//! Strategy-selected fine calculators and their dispatcher.

mod administrative;
mod context;
mod cost_table;
mod damage;
mod late_return;
mod loss;

#[cfg(test)]
mod tests;

pub use administrative::{AdministrativeFineCalculator, DEFAULT_ADMINISTRATIVE_FEE};
pub use context::FineCase;
pub use cost_table::DamageCostTable;
pub use damage::DamageFineCalculator;
pub use late_return::LateReturnCalculator;
pub use loss::{LossFineCalculator, DEFAULT_LOSS_SURCHARGE};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{Fine, FineId};
use crate::error::EngineError;

static FINE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_fine_id() -> FineId {
    let id = FINE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    FineId(format!("fine-{id:06}"))
}

/// One pricing strategy. `compute` returns `Ok(None)` when the case does not
/// actually warrant a fine.
pub trait FineCalculator: Send + Sync {
    fn can_handle(&self, case: &FineCase) -> bool;
    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError>;
}

/// Ordered registry of calculators; the first that claims a case wins.
///
/// Registration order is preserved so a more specific calculator registered
/// earlier shadows a default one registered later.
#[derive(Default)]
pub struct FineDispatcher {
    calculators: Vec<Box<dyn FineCalculator>>,
}

impl FineDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, calculator: Box<dyn FineCalculator>) {
        self.calculators.push(calculator);
    }

    pub fn calculate(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        for calculator in &self.calculators {
            if calculator.can_handle(case) {
                return calculator.compute(case);
            }
        }
        Err(EngineError::UnsupportedFineKind(case.kind))
    }
}
