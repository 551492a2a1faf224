use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    DamageAssessment, DamageKind, DamageRecord, FineKind, LoanId, LoanRecord, MaterialId,
    MaterialKind, MaterialRecord, Severity, UserCategory, UserId, UserRecord,
};
use crate::fines::FineCase;
use crate::store::MemoryStore;

pub(super) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub(super) fn user() -> UserRecord {
    UserRecord::new(
        UserId::new("u-100"),
        "Iris Chen",
        "iris@example.org",
        UserCategory::Student,
        at(1, 9),
    )
}

pub(super) fn book() -> MaterialRecord {
    MaterialRecord::new(MaterialId::new("m-200"), "The Name of the Wind", MaterialKind::Book)
}

pub(super) fn dvd(runtime_minutes: u32) -> MaterialRecord {
    MaterialRecord::new(
        MaterialId::new("m-201"),
        "Baraka",
        MaterialKind::Dvd { runtime_minutes },
    )
}

/// A loan due on day 10 at 09:00.
pub(super) fn loan(material: &MaterialRecord) -> LoanRecord {
    LoanRecord::new(
        LoanId::new("loan-500"),
        user().id,
        material.id.clone(),
        at(1, 9),
        at(10, 9),
    )
}

pub(super) fn seeded_stores(
    material: MaterialRecord,
    loan: LoanRecord,
) -> (Arc<MemoryStore<LoanRecord>>, Arc<MemoryStore<MaterialRecord>>) {
    let loans = Arc::new(MemoryStore::for_loans());
    let materials = Arc::new(MemoryStore::for_materials());
    materials.insert(material).expect("seed material");
    loans.insert(loan).expect("seed loan");
    (loans, materials)
}

pub(super) fn case(kind: FineKind, as_of: NaiveDateTime) -> FineCase {
    FineCase::new(
        kind,
        LoanId::new("loan-500"),
        MaterialId::new("m-200"),
        user().id,
        as_of,
    )
}

pub(super) fn assessment(severities: &[Severity]) -> DamageAssessment {
    DamageAssessment::new(
        severities
            .iter()
            .map(|severity| DamageRecord::new("inspection finding", *severity, DamageKind::Stains))
            .collect(),
    )
}
