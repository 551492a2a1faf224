use std::sync::Arc;

use super::common::*;
use crate::domain::{Fine, FineDetail, FineKind};
use crate::error::EngineError;
use crate::fines::{
    AdministrativeFineCalculator, DamageCostTable, DamageFineCalculator, FineCalculator, FineCase,
    FineDispatcher, LateReturnCalculator, LossFineCalculator,
};

fn full_dispatcher() -> FineDispatcher {
    let (loans, materials) = seeded_stores(book(), loan(&book()));
    let mut dispatcher = FineDispatcher::new();
    dispatcher.register(Box::new(LateReturnCalculator::new(
        loans,
        materials.clone(),
    )));
    dispatcher.register(Box::new(DamageFineCalculator::new(Arc::new(
        DamageCostTable::default(),
    ))));
    dispatcher.register(Box::new(LossFineCalculator::new(materials)));
    dispatcher
}

#[test]
fn dispatcher_routes_to_the_matching_calculator() {
    let dispatcher = full_dispatcher();

    let late = dispatcher
        .calculate(&case(FineKind::LateReturn, at(12, 9)))
        .expect("computation succeeds")
        .expect("fine produced");
    assert_eq!(late.kind(), FineKind::LateReturn);

    let loss = dispatcher
        .calculate(&case(FineKind::Loss, at(12, 9)))
        .expect("computation succeeds")
        .expect("fine produced");
    assert_eq!(loss.kind(), FineKind::Loss);
}

#[test]
fn unclaimed_kinds_are_rejected() {
    let dispatcher = full_dispatcher();

    match dispatcher.calculate(&case(FineKind::Administrative, at(12, 9))) {
        Err(EngineError::UnsupportedFineKind(kind)) => {
            assert_eq!(kind, FineKind::Administrative);
        }
        other => panic!("expected unsupported fine kind, got {other:?}"),
    }
}

struct FlatOverride;

impl FineCalculator for FlatOverride {
    fn can_handle(&self, case: &FineCase) -> bool {
        case.kind == FineKind::Administrative
    }

    fn compute(&self, case: &FineCase) -> Result<Option<Fine>, EngineError> {
        Ok(Some(Fine::new(
            crate::domain::FineId::new("fine-override"),
            case.loan_id.clone(),
            case.user_id.clone(),
            case.as_of,
            "Expedited processing",
            FineDetail::Administrative { fee: 250.0 },
        )))
    }
}

#[test]
fn first_registered_match_wins() {
    let mut dispatcher = FineDispatcher::new();
    dispatcher.register(Box::new(FlatOverride));
    dispatcher.register(Box::new(AdministrativeFineCalculator::new()));

    let fine = dispatcher
        .calculate(&case(FineKind::Administrative, at(12, 9)))
        .expect("computation succeeds")
        .expect("fine produced");

    assert_eq!(fine.amount(), 250.0);
}
