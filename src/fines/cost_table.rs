use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{DamageKind, DamageRecord, Severity};

/// Repair tariff matrix keyed by (damage kind, severity).
///
/// Unconfigured pairs price at zero rather than erroring; single entries can
/// be overridden at runtime. Reads dominate, so the table sits behind a
/// read/write lock.
pub struct DamageCostTable {
    costs: RwLock<HashMap<(DamageKind, Severity), f64>>,
}

impl DamageCostTable {
    pub fn empty() -> Self {
        Self {
            costs: RwLock::new(HashMap::new()),
        }
    }

    pub fn cost(&self, kind: DamageKind, severity: Severity) -> f64 {
        self.costs
            .read()
            .expect("cost table lock poisoned")
            .get(&(kind, severity))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set_cost(&self, kind: DamageKind, severity: Severity, amount: f64) {
        self.costs
            .write()
            .expect("cost table lock poisoned")
            .insert((kind, severity), amount);
    }

    pub fn total_cost(&self, records: &[DamageRecord]) -> f64 {
        records
            .iter()
            .map(|record| self.cost(record.kind, record.severity))
            .sum()
    }
}

impl Default for DamageCostTable {
    fn default() -> Self {
        let table = Self::empty();

        let seed: &[(DamageKind, [f64; 4])] = &[
            (DamageKind::TornPages, [2_000.0, 5_000.0, 15_000.0, 50_000.0]),
            (DamageKind::Stains, [1_000.0, 3_000.0, 8_000.0, 20_000.0]),
            (
                DamageKind::DamagedCover,
                [3_000.0, 8_000.0, 20_000.0, 60_000.0],
            ),
            (DamageKind::Scratches, [500.0, 2_000.0, 5_000.0, 15_000.0]),
            (DamageKind::NonFunctional, [0.0, 0.0, 0.0, 100_000.0]),
        ];

        for (kind, amounts) in seed {
            table.set_cost(*kind, Severity::Minor, amounts[0]);
            table.set_cost(*kind, Severity::Moderate, amounts[1]);
            table.set_cost(*kind, Severity::Severe, amounts[2]);
            table.set_cost(*kind, Severity::Irreparable, amounts[3]);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_pairs_cost_nothing() {
        let table = DamageCostTable::empty();
        assert_eq!(table.cost(DamageKind::Stains, Severity::Severe), 0.0);
    }

    #[test]
    fn overrides_replace_single_entries() {
        let table = DamageCostTable::default();
        assert_eq!(table.cost(DamageKind::Scratches, Severity::Minor), 500.0);

        table.set_cost(DamageKind::Scratches, Severity::Minor, 750.0);
        assert_eq!(table.cost(DamageKind::Scratches, Severity::Minor), 750.0);
        assert_eq!(table.cost(DamageKind::Scratches, Severity::Moderate), 2_000.0);
    }

    #[test]
    fn total_cost_sums_per_record_lookups() {
        let table = DamageCostTable::default();
        let records = vec![
            DamageRecord::new("corner tear", Severity::Minor, DamageKind::TornPages),
            DamageRecord::new("coffee stain", Severity::Severe, DamageKind::Stains),
        ];
        assert_eq!(table.total_cost(&records), 2_000.0 + 8_000.0);
    }
}
