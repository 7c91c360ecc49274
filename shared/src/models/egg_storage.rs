//! Egg storage ("magazzino uova") models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::{storage_days, STALE_STORAGE_DAYS};
use crate::types::RowId;

/// A batch of eggs waiting in storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggStorageEntry {
    pub id: RowId,
    pub prodotto: String,
    /// Breed or batch label
    pub nome: String,
    pub origine: String,
    pub numero: i64,
    /// Age of the laying hens, in weeks
    pub eta: i32,
    pub arrivate_il: Option<NaiveDate>,
}

impl EggStorageEntry {
    /// Days in storage; zero when the arrival date is unknown or in the future
    pub fn giacenza(&self, today: NaiveDate) -> i64 {
        self.arrivate_il
            .map(|arrival| storage_days(arrival, today))
            .unwrap_or(0)
    }

    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.giacenza(today) > STALE_STORAGE_DAYS
    }

    /// Quantity as displayed: never negative
    pub fn display_quantity(&self) -> i64 {
        self.numero.max(0)
    }
}

/// Payload for registering a batch in storage
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EggStorageCreate {
    #[validate(length(min = 1))]
    pub prodotto: String,
    pub nome: String,
    pub origine: String,
    #[validate(range(min = 0))]
    pub numero: i64,
    #[validate(range(min = 0))]
    pub eta: i32,
    pub arrivate_il: NaiveDate,
}

/// Partial update of a storage batch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EggStorageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prodotto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrivate_il: Option<NaiveDate>,
}

/// Editable columns of the storage grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EggStorageField {
    Prodotto,
    Nome,
    Origine,
    Numero,
    Eta,
    ArrivateIl,
}

impl EggStorageField {
    pub fn is_numeric(&self) -> bool {
        matches!(self, EggStorageField::Numero | EggStorageField::Eta)
    }
}

/// Sort batches oldest-in-storage first
pub fn sort_by_giacenza(entries: &mut [EggStorageEntry], today: NaiveDate) {
    entries.sort_by_key(|e| std::cmp::Reverse(e.giacenza(today)));
}

/// Total eggs in storage per product
pub fn totals_by_product(entries: &[EggStorageEntry]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.prodotto.clone()).or_insert(0) += entry.display_quantity();
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: RowId, prodotto: &str, numero: i64, arrival: Option<NaiveDate>) -> EggStorageEntry {
        EggStorageEntry {
            id,
            prodotto: prodotto.to_string(),
            nome: "JA87".to_string(),
            origine: "Tonini".to_string(),
            numero,
            eta: 30,
            arrivate_il: arrival,
        }
    }

    #[test]
    fn test_giacenza_and_staleness() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let old = entry(1, "Ross", 100, NaiveDate::from_ymd_opt(2025, 6, 9));
        let fresh = entry(2, "Ross", 100, NaiveDate::from_ymd_opt(2025, 6, 15));
        let unknown = entry(3, "Ross", 100, None);
        assert_eq!(old.giacenza(today), 9);
        assert!(old.is_stale(today));
        assert!(!fresh.is_stale(today));
        assert_eq!(unknown.giacenza(today), 0);

        let mut entries = vec![fresh.clone(), unknown.clone(), old.clone()];
        sort_by_giacenza(&mut entries, today);
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_totals_by_product_clamps_negative() {
        let entries = vec![
            entry(1, "Ross", 1_000, None),
            entry(2, "Ross", 500, None),
            entry(3, "Pollo70", -20, None),
        ];
        let totals = totals_by_product(&entries);
        assert_eq!(totals["Ross"], 1_500);
        assert_eq!(totals["Pollo70"], 0);
    }
}
