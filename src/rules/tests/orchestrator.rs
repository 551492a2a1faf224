use chrono::Duration;

use super::common::*;
use crate::domain::{
    Fine, FineDetail, FineId, LoanId, MaterialId, MaterialState, ReservationRecord, ReservationId,
    TransactionStatus, UserCategory, UserId,
};
use crate::error::EngineError;

#[test]
fn borrow_passes_for_an_eligible_request() {
    let fx = fixture();
    let user_id = seed_user(&fx, "u-1", UserCategory::Student);
    let material_id = seed_material(&fx, "m-1", MaterialState::Available);

    let outcome = fx
        .orchestrator()
        .validate_borrow(&user_id, &material_id, at(5))
        .expect("validation runs");
    assert!(outcome.is_valid());
}

#[test]
fn borrow_reports_unavailable_material_and_block_verdict_together() {
    let fx = fixture();
    let user_id = seed_user(&fx, "u-1", UserCategory::Student);
    let material_id = seed_material(&fx, "m-1", MaterialState::Loaned);
    fx.fines
        .insert(Fine::new(
            FineId::new("fine-loss"),
            LoanId::new("loan-x"),
            user_id.clone(),
            at(2),
            "Lost material",
            FineDetail::Loss {
                replacement_value: 50_000.0,
                surcharge: 0.20,
            },
        ))
        .expect("seed fine");

    let outcome = fx
        .orchestrator()
        .validate_borrow(&user_id, &material_id, at(5))
        .expect("validation runs");

    assert!(!outcome.is_valid());
    // Availability and the blocking criteria are both reported; the limit
    // check is skipped once the outcome is already invalid.
    assert!(outcome.errors().iter().any(|e| e.contains("not available")));
    assert!(outcome.errors().iter().any(|e| e.contains("lost")));
}

#[test]
fn borrow_rejects_unresolved_ids_before_running_rules() {
    let fx = fixture();
    let user_id = seed_user(&fx, "u-1", UserCategory::Student);

    let outcome = fx
        .orchestrator()
        .validate_borrow(&user_id, &MaterialId::new("m-ghost"), at(5))
        .expect("validation runs");
    assert!(!outcome.is_valid());
    assert_eq!(outcome.errors(), ["Material not found: m-ghost"]);

    let outcome = fx
        .orchestrator()
        .validate_borrow(&UserId::new("ghost"), &MaterialId::new("m-ghost"), at(5))
        .expect("validation runs");
    assert_eq!(outcome.errors(), ["User not found: ghost"]);
}

#[test]
fn blank_ids_are_invalid_arguments() {
    let fx = fixture();
    assert!(matches!(
        fx.orchestrator()
            .validate_borrow(&UserId::new(""), &MaterialId::new("m-1"), at(5)),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(matches!(
        fx.orchestrator()
            .validate_borrow(&UserId::new("u-1"), &MaterialId::new("   "), at(5)),
        Err(EngineError::InvalidArgument(_))
    ));
}

#[test]
fn reservation_requires_the_material_to_be_unavailable() {
    let fx = fixture();
    let user_id = seed_user(&fx, "u-1", UserCategory::Student);
    let available = seed_material(&fx, "m-1", MaterialState::Available);
    let loaned = seed_material(&fx, "m-2", MaterialState::Loaned);

    let rejected = fx
        .orchestrator()
        .validate_reservation(&user_id, &available, at(5))
        .expect("validation runs");
    assert!(!rejected.is_valid());
    assert!(rejected.errors()[0].contains("does not require a reservation"));

    let accepted = fx
        .orchestrator()
        .validate_reservation(&user_id, &loaned, at(5))
        .expect("validation runs");
    assert!(accepted.is_valid());
}

#[test]
fn renewal_validation_walks_every_guard() {
    let fx = fixture();
    let user_id = seed_user(&fx, "u-1", UserCategory::GeneralPublic);
    let material_id = seed_material(&fx, "m-1", MaterialState::Loaned);
    seed_loan(&fx, "loan-1", &user_id, &material_id);

    let orchestrator = fx.orchestrator();

    // Unknown loan.
    let outcome = orchestrator
        .validate_renewal(&LoanId::new("loan-ghost"), at(5))
        .expect("validation runs");
    assert!(outcome.errors()[0].contains("does not exist"));

    // Happy path within the due window.
    let outcome = orchestrator
        .validate_renewal(&LoanId::new("loan-1"), at(5))
        .expect("validation runs");
    assert!(outcome.is_valid());

    // Renewal cap: general public gets a single renewal.
    let mut capped = fx.loans.get("loan-1").expect("loan present");
    capped.renewals_used = 1;
    fx.loans.update(capped.clone()).expect("update");
    let outcome = orchestrator
        .validate_renewal(&LoanId::new("loan-1"), at(5))
        .expect("validation runs");
    assert!(outcome.errors()[0].contains("Renewal cap reached"));

    // Reservations on the material win over renewals.
    capped.renewals_used = 0;
    fx.loans.update(capped.clone()).expect("update");
    fx.reservations
        .insert(ReservationRecord::new(
            ReservationId::new("res-1"),
            UserId::new("u-2"),
            material_id.clone(),
            at(4),
            1,
        ))
        .expect("seed reservation");
    let outcome = orchestrator
        .validate_renewal(&LoanId::new("loan-1"), at(5))
        .expect("validation runs");
    assert!(outcome.errors()[0].contains("active reservations"));

    // Far past due: the grace window has lapsed.
    let mut cancelled = fx.reservations.get("res-1").expect("reservation");
    cancelled.status = TransactionStatus::Cancelled;
    fx.reservations.update(cancelled).expect("update");
    let outcome = orchestrator
        .validate_renewal(&LoanId::new("loan-1"), at(16) + Duration::days(8))
        .expect("validation runs");
    assert!(outcome.errors()[0].contains("overdue by more than 7 days"));
}
