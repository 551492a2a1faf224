use serde::{Deserialize, Serialize};

/// Ordinal impact level of a single damage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Irreparable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    TornPages,
    Stains,
    DamagedCover,
    Scratches,
    NonFunctional,
}

/// One finding from a physical inspection of returned material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRecord {
    pub description: String,
    pub severity: Severity,
    pub kind: DamageKind,
}

impl DamageRecord {
    pub fn new(description: impl Into<String>, severity: Severity, kind: DamageKind) -> Self {
        Self {
            description: description.into(),
            severity,
            kind,
        }
    }
}

const MAX_SEVERE_RECORDS_FOR_USABLE: usize = 2;

/// Inspection result for a returned material.
///
/// Usability is derived from the recorded severities and is the single
/// source of truth: any irreparable record, or more than two severe
/// records, renders the material unusable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageAssessment {
    records: Vec<DamageRecord>,
}

impl DamageAssessment {
    pub fn new(records: Vec<DamageRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DamageRecord] {
        &self.records
    }

    pub fn has_damage(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn usable(&self) -> bool {
        if self
            .records
            .iter()
            .any(|record| record.severity == Severity::Irreparable)
        {
            return false;
        }

        let severe = self
            .records
            .iter()
            .filter(|record| record.severity == Severity::Severe)
            .count();

        severe <= MAX_SEVERE_RECORDS_FOR_USABLE
    }
}
