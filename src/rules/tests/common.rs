use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::availability::AvailabilityService;
use crate::domain::{
    Fine, LoanId, LoanRecord, MaterialId, MaterialKind, MaterialRecord, MaterialState,
    ReservationRecord, UserCategory, UserId, UserRecord,
};
use crate::policy::{BlockDecisionService, BlockThresholds, BorrowingLimitPolicy, LoanDurationPolicy};
use crate::rules::RuleOrchestrator;
use crate::store::MemoryStore;

pub(super) fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, day)
        .expect("valid date")
        .and_hms_opt(10, 0, 0)
        .expect("valid time")
}

pub(super) struct Fixture {
    pub users: Arc<MemoryStore<UserRecord>>,
    pub materials: Arc<MemoryStore<MaterialRecord>>,
    pub loans: Arc<MemoryStore<LoanRecord>>,
    pub fines: Arc<MemoryStore<Fine>>,
    pub reservations: Arc<MemoryStore<ReservationRecord>>,
    pub availability: Arc<AvailabilityService>,
    pub blocking: Arc<BlockDecisionService>,
    pub limits: Arc<BorrowingLimitPolicy>,
    pub durations: Arc<LoanDurationPolicy>,
}

impl Fixture {
    pub fn orchestrator(&self) -> RuleOrchestrator {
        RuleOrchestrator::new(
            self.users.clone(),
            self.materials.clone(),
            self.loans.clone(),
            self.reservations.clone(),
            self.availability.clone(),
            self.blocking.clone(),
            self.limits.clone(),
            self.durations.clone(),
        )
    }
}

pub(super) fn fixture() -> Fixture {
    let users = Arc::new(MemoryStore::for_users());
    let materials = Arc::new(MemoryStore::for_materials());
    let loans = Arc::new(MemoryStore::for_loans());
    let fines = Arc::new(MemoryStore::for_fines());
    let reservations = Arc::new(MemoryStore::for_reservations());

    let availability = Arc::new(AvailabilityService::new(materials.clone(), loans.clone()));
    let blocking = Arc::new(BlockDecisionService::new(
        users.clone(),
        fines.clone(),
        loans.clone(),
        BlockThresholds::default(),
    ));
    let limits = Arc::new(BorrowingLimitPolicy::new(users.clone(), loans.clone()));
    let durations = Arc::new(LoanDurationPolicy::default());

    Fixture {
        users,
        materials,
        loans,
        fines,
        reservations,
        availability,
        blocking,
        limits,
        durations,
    }
}

pub(super) fn seed_user(fixture: &Fixture, id: &str, category: UserCategory) -> UserId {
    let user_id = UserId::new(id);
    fixture
        .users
        .insert(UserRecord::new(
            user_id.clone(),
            "Priya Raman",
            "priya@example.org",
            category,
            at(1),
        ))
        .expect("seed user");
    user_id
}

pub(super) fn seed_material(fixture: &Fixture, id: &str, state: MaterialState) -> MaterialId {
    let material_id = MaterialId::new(id);
    let mut record = MaterialRecord::new(material_id.clone(), "The Left Hand of Darkness", MaterialKind::Book);
    record.state = state;
    fixture.materials.insert(record).expect("seed material");
    material_id
}

pub(super) fn seed_loan(fixture: &Fixture, id: &str, user_id: &UserId, material_id: &MaterialId) {
    fixture
        .loans
        .insert(LoanRecord::new(
            LoanId::new(id),
            user_id.clone(),
            material_id.clone(),
            at(1),
            at(16),
        ))
        .expect("seed loan");
}
