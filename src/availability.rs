use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use chrono::{Duration, NaiveDateTime};

use crate::domain::{MaterialCategory, MaterialId, MaterialState};
use crate::error::EngineError;
use crate::store::{LoanStore, MaterialStore};

const FALLBACK_AVAILABILITY_DAYS: i64 = 7;

/// Availability and loanability checks over the material store.
pub struct AvailabilityService {
    materials: Arc<dyn MaterialStore>,
    loans: Arc<dyn LoanStore>,
    non_loanable: RwLock<HashSet<MaterialCategory>>,
}

impl AvailabilityService {
    pub fn new(materials: Arc<dyn MaterialStore>, loans: Arc<dyn LoanStore>) -> Self {
        let mut non_loanable = HashSet::new();
        non_loanable.insert(MaterialCategory::Reference);

        Self {
            materials,
            loans,
            non_loanable: RwLock::new(non_loanable),
        }
    }

    /// False for materials that do not resolve.
    pub fn is_available(&self, material_id: &MaterialId) -> Result<bool, EngineError> {
        Ok(self
            .materials
            .material(material_id)?
            .map(|material| material.state == MaterialState::Available)
            .unwrap_or(false))
    }

    pub fn current_state(
        &self,
        material_id: &MaterialId,
    ) -> Result<Option<MaterialState>, EngineError> {
        Ok(self
            .materials
            .material(material_id)?
            .map(|material| material.state))
    }

    /// Whether the material's category is ever circulated.
    pub fn is_loanable(&self, material_id: &MaterialId) -> Result<bool, EngineError> {
        let material = match self.materials.material(material_id)? {
            Some(material) => material,
            None => return Ok(false),
        };
        Ok(!self
            .non_loanable
            .read()
            .expect("loanability lock poisoned")
            .contains(&material.category()))
    }

    pub fn mark_non_loanable(&self, category: MaterialCategory) {
        self.non_loanable
            .write()
            .expect("loanability lock poisoned")
            .insert(category);
    }

    /// Estimated moment the material frees up: `as_of` when it is already
    /// available or unknown, else the latest expected return among its
    /// outstanding loans, else a one-week fallback.
    pub fn estimated_available_at(
        &self,
        material_id: &MaterialId,
        as_of: NaiveDateTime,
    ) -> Result<NaiveDateTime, EngineError> {
        match self.materials.material(material_id)? {
            None => Ok(as_of),
            Some(material) if material.state == MaterialState::Available => Ok(as_of),
            Some(material) => {
                let latest_due = self
                    .loans
                    .loans_for_material(&material.id)?
                    .iter()
                    .filter(|loan| loan.is_outstanding())
                    .map(|loan| loan.due_at)
                    .max();
                Ok(latest_due.unwrap_or(as_of + Duration::days(FALLBACK_AVAILABILITY_DAYS)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{LoanId, LoanRecord, MaterialKind, MaterialRecord, UserId};
    use crate::store::MemoryStore;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, day)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time")
    }

    fn service_with(
        material: MaterialRecord,
    ) -> (AvailabilityService, Arc<MemoryStore<LoanRecord>>) {
        let materials = Arc::new(MemoryStore::for_materials());
        let loans = Arc::new(MemoryStore::for_loans());
        materials.insert(material).expect("seed material");
        (
            AvailabilityService::new(materials, loans.clone()),
            loans,
        )
    }

    #[test]
    fn reference_material_is_never_loanable() {
        let record = MaterialRecord::new(
            MaterialId::new("m-ref"),
            "Oxford English Dictionary",
            MaterialKind::Reference,
        );
        let (service, _) = service_with(record);
        assert!(!service.is_loanable(&MaterialId::new("m-ref")).expect("runs"));
    }

    #[test]
    fn unknown_materials_read_as_unavailable() {
        let (service, _) = service_with(MaterialRecord::new(
            MaterialId::new("m-1"),
            "Dune",
            MaterialKind::Book,
        ));
        assert!(!service.is_available(&MaterialId::new("ghost")).expect("runs"));
        assert_eq!(
            service.current_state(&MaterialId::new("ghost")).expect("runs"),
            None
        );
    }

    #[test]
    fn estimated_availability_uses_the_latest_outstanding_due_date() {
        let mut record =
            MaterialRecord::new(MaterialId::new("m-1"), "Dune", MaterialKind::Book);
        record.state = MaterialState::Loaned;
        let (service, loans) = service_with(record);

        loans
            .insert(LoanRecord::new(
                LoanId::new("loan-1"),
                UserId::new("u-1"),
                MaterialId::new("m-1"),
                at(1),
                at(12),
            ))
            .expect("seed loan");

        let estimate = service
            .estimated_available_at(&MaterialId::new("m-1"), at(5))
            .expect("runs");
        assert_eq!(estimate, at(12));
    }

    #[test]
    fn loaned_material_without_loans_falls_back_a_week() {
        let mut record =
            MaterialRecord::new(MaterialId::new("m-1"), "Dune", MaterialKind::Book);
        record.state = MaterialState::Loaned;
        let (service, _) = service_with(record);

        let estimate = service
            .estimated_available_at(&MaterialId::new("m-1"), at(5))
            .expect("runs");
        assert_eq!(estimate, at(12));
    }
}
