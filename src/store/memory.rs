use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{
    Fine, FineId, LoanId, LoanRecord, MaterialId, MaterialRecord, ReservationId,
    ReservationRecord, UserId, UserRecord,
};
use crate::error::EngineError;

use super::{FineStore, LoanStore, MaterialStore, ReservationStore, UserStore};

/// Thread-safe keyed store for a single entity type.
///
/// The id accessor is supplied at construction, so the store needs no
/// knowledge of the stored type beyond cloning it in and out.
pub struct MemoryStore<T: Clone + Send + Sync> {
    entity: &'static str,
    id_of: fn(&T) -> String,
    records: RwLock<HashMap<String, T>>,
}

impl<T: Clone + Send + Sync> MemoryStore<T> {
    pub fn new(entity: &'static str, id_of: fn(&T) -> String) -> Self {
        Self {
            entity,
            id_of,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, record: T) -> Result<(), EngineError> {
        let id = (self.id_of)(&record);
        let mut guard = self.records.write().expect("store lock poisoned");
        if guard.contains_key(&id) {
            return Err(EngineError::invalid_argument(format!(
                "{} '{id}' already exists",
                self.entity
            )));
        }
        guard.insert(id, record);
        Ok(())
    }

    pub fn update(&self, record: T) -> Result<(), EngineError> {
        let id = (self.id_of)(&record);
        let mut guard = self.records.write().expect("store lock poisoned");
        if !guard.contains_key(&id) {
            return Err(EngineError::not_found(self.entity, id));
        }
        guard.insert(id, record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .expect("store lock poisoned")
            .get(id)
            .cloned()
    }

    pub fn all(&self) -> Vec<T> {
        self.records
            .read()
            .expect("store lock poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl MemoryStore<UserRecord> {
    pub fn for_users() -> Self {
        Self::new("user", |record| record.id.0.clone())
    }
}

impl MemoryStore<MaterialRecord> {
    pub fn for_materials() -> Self {
        Self::new("material", |record| record.id.0.clone())
    }
}

impl MemoryStore<LoanRecord> {
    pub fn for_loans() -> Self {
        Self::new("loan", |record| record.id.0.clone())
    }
}

impl MemoryStore<Fine> {
    pub fn for_fines() -> Self {
        Self::new("fine", |fine| fine.id.0.clone())
    }
}

impl MemoryStore<ReservationRecord> {
    pub fn for_reservations() -> Self {
        Self::new("reservation", |record| record.id.0.clone())
    }
}

impl UserStore for MemoryStore<UserRecord> {
    fn user(&self, id: &UserId) -> Result<Option<UserRecord>, EngineError> {
        Ok(self.get(id.as_str()))
    }

    fn update_user(&self, record: UserRecord) -> Result<(), EngineError> {
        self.update(record)
    }
}

impl MaterialStore for MemoryStore<MaterialRecord> {
    fn material(&self, id: &MaterialId) -> Result<Option<MaterialRecord>, EngineError> {
        Ok(self.get(id.as_str()))
    }

    fn update_material(&self, record: MaterialRecord) -> Result<(), EngineError> {
        self.update(record)
    }
}

impl LoanStore for MemoryStore<LoanRecord> {
    fn loan(&self, id: &LoanId) -> Result<Option<LoanRecord>, EngineError> {
        Ok(self.get(id.as_str()))
    }

    fn loans_for_user(&self, id: &UserId) -> Result<Vec<LoanRecord>, EngineError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|loan| &loan.user_id == id)
            .collect())
    }

    fn loans_for_material(&self, id: &MaterialId) -> Result<Vec<LoanRecord>, EngineError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|loan| &loan.material_id == id)
            .collect())
    }

    fn insert_loan(&self, record: LoanRecord) -> Result<(), EngineError> {
        self.insert(record)
    }

    fn update_loan(&self, record: LoanRecord) -> Result<(), EngineError> {
        self.update(record)
    }
}

impl FineStore for MemoryStore<Fine> {
    fn fine(&self, id: &FineId) -> Result<Option<Fine>, EngineError> {
        Ok(self.get(id.as_str()))
    }

    fn fines_for_user(&self, id: &UserId) -> Result<Vec<Fine>, EngineError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|fine| &fine.user_id == id)
            .collect())
    }

    fn insert_fine(&self, fine: Fine) -> Result<(), EngineError> {
        self.insert(fine)
    }

    fn update_fine(&self, fine: Fine) -> Result<(), EngineError> {
        self.update(fine)
    }
}

impl ReservationStore for MemoryStore<ReservationRecord> {
    fn reservation(&self, id: &ReservationId) -> Result<Option<ReservationRecord>, EngineError> {
        Ok(self.get(id.as_str()))
    }

    fn reservations_for_material(
        &self,
        id: &MaterialId,
    ) -> Result<Vec<ReservationRecord>, EngineError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|reservation| &reservation.material_id == id)
            .collect())
    }

    fn insert_reservation(&self, record: ReservationRecord) -> Result<(), EngineError> {
        self.insert(record)
    }

    fn update_reservation(&self, record: ReservationRecord) -> Result<(), EngineError> {
        self.update(record)
    }
}
