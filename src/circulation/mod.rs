//! Thin circulation services composing the engine with the entity stores.
//!
//! Every branching decision delegates to the orchestrator, the policies, or
//! the fine dispatcher; these services only sequence reads and writes.

mod fines;
mod loans;
mod renewals;
mod reservations;
mod returns;

pub use fines::FineService;
pub use loans::{LoanRequestOutcome, LoanService};
pub use renewals::{RenewalOutcome, RenewalReceipt, RenewalService};
pub use reservations::{CancellationOutcome, ReservationOutcome, ReservationService};
pub use returns::{ReturnOutcome, ReturnReceipt, ReturnService};
