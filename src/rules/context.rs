use chrono::NaiveDateTime;

use crate::domain::{MaterialId, MaterialRecord, UserId, UserRecord};

/// Read-only bundle handed to every eligibility rule.
///
/// Built fresh per validation call. The record fields stay `None` when an id
/// does not resolve so rules can fail gracefully instead of erroring.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub user_id: UserId,
    pub material_id: MaterialId,
    pub user: Option<UserRecord>,
    pub material: Option<MaterialRecord>,
    pub as_of: NaiveDateTime,
}

impl ValidationContext {
    pub fn has_user(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }
}
