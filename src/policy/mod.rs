//! Configurable lending policies: limits, durations, and account blocking.

mod blocking;
mod duration;
mod limits;

pub use blocking::{AccountStatusView, BlockDecisionService, BlockThresholds, BlockTransition};
pub use duration::LoanDurationPolicy;
pub use limits::BorrowingLimitPolicy;
