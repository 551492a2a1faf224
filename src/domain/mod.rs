//! Entities and value objects shared across the engine.

mod damage;
mod fine;
mod ids;
mod loan;
mod material;
mod outcome;
mod reservation;
mod user;

pub use damage::{DamageAssessment, DamageKind, DamageRecord, Severity};
pub use fine::{Fine, FineDetail, FineKind, FineStatus};
pub use ids::{FineId, LoanId, MaterialId, ReservationId, UserId};
pub use loan::{LoanRecord, TransactionStatus};
pub use material::{MaterialCategory, MaterialKind, MaterialRecord, MaterialState};
pub use outcome::ValidationOutcome;
pub use reservation::ReservationRecord;
pub use user::{UserCategory, UserRecord, UserStatus};
