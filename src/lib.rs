//! Rule validation and fine calculation engine for library circulation.
//!
//! The engine decides whether a borrow, reservation, or renewal may proceed
//! (an ordered, extensible chain of eligibility rules combined with limit,
//! availability, and block-decision policies) and prices the cost of a loan
//! that ends badly (strategy-selected fine calculators behind a first-match
//! dispatcher). Entity storage, notification delivery, and any user-facing
//! surface are host concerns consumed through the narrow traits in
//! [`store`].

pub mod availability;
pub mod circulation;
pub mod domain;
pub mod error;
pub mod fines;
pub mod policy;
pub mod rules;
pub mod store;
pub mod telemetry;

pub use availability::AvailabilityService;
pub use circulation::{
    CancellationOutcome, FineService, LoanRequestOutcome, LoanService, RenewalOutcome,
    RenewalReceipt, RenewalService, ReservationOutcome, ReservationService, ReturnOutcome,
    ReturnReceipt, ReturnService,
};
pub use domain::{
    DamageAssessment, DamageKind, DamageRecord, Fine, FineDetail, FineId, FineKind, FineStatus,
    LoanId, LoanRecord, MaterialCategory, MaterialId, MaterialKind, MaterialRecord, MaterialState,
    ReservationId, ReservationRecord, Severity, TransactionStatus, UserCategory, UserId,
    UserRecord, UserStatus, ValidationOutcome,
};
pub use error::EngineError;
pub use fines::{
    AdministrativeFineCalculator, DamageCostTable, DamageFineCalculator, FineCalculator, FineCase,
    FineDispatcher, LateReturnCalculator, LossFineCalculator,
};
pub use policy::{
    AccountStatusView, BlockDecisionService, BlockThresholds, BlockTransition,
    BorrowingLimitPolicy, LoanDurationPolicy,
};
pub use rules::{
    EligibilityRule, LimitNotExceededRule, MaterialAvailableRule, MaterialExistsRule,
    RuleOrchestrator, UserActiveRule, UserNotBlockedRule, ValidationContext,
};
pub use store::{
    FineStore, LoanStore, MaterialStore, MemoryStore, NoopNotifier, NotificationSink,
    ReservationStore, UserStore,
};
