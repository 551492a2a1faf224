use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Borrower categories driving limits, loan durations, and renewal caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserCategory {
    Student,
    Faculty,
    Researcher,
    GeneralPublic,
}

/// Account state. Blocked sub-types record why new circulation is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    BlockedForFines,
    BlockedForLoss,
    Suspended,
}

impl UserStatus {
    pub const fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::BlockedForFines => "blocked_fines",
            UserStatus::BlockedForLoss => "blocked_loss",
            UserStatus::Suspended => "suspended",
        }
    }

    pub const fn is_blocked(self) -> bool {
        !matches!(self, UserStatus::Active)
    }
}

/// The narrow user projection the engine reads and mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub category: UserCategory,
    pub status: UserStatus,
    pub registered_at: NaiveDateTime,
}

impl UserRecord {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        category: UserCategory,
        registered_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            category,
            status: UserStatus::Active,
            registered_at,
        }
    }
}
