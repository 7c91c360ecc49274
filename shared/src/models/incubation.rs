//! Incubation runs and the egg batches allocated to them

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::birth_rate::{storico_rate, BirthRateMatrix};
use crate::calendar::hatch_date;
use crate::types::{Percent, Product, RowId};

/// An incubation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incubation {
    pub id: RowId,
    pub data_incubazione: NaiveDate,
    pub data_schiusa: Option<NaiveDate>,
    #[serde(default)]
    pub pre_incubazione_ore: i32,
    pub partenza_macchine: Option<String>,
    pub operatore: Option<String>,
    /// Comma-separated machine numbers, e.g. `"1,3,5"`
    pub incubatrici: Option<String>,
    #[serde(default)]
    pub richiesta_granpollo: i64,
    #[serde(default)]
    pub richiesta_pollo70: i64,
    #[serde(default)]
    pub richiesta_color_yeald: i64,
    #[serde(default)]
    pub richiesta_ross: i64,
    pub stato: Option<String>,
    #[serde(default)]
    pub committed: bool,
    #[serde(default)]
    pub batches: Vec<IncubationBatch>,
}

impl Incubation {
    /// Hatch date, derived from the incubation date when the backend omits it
    pub fn expected_hatch(&self) -> NaiveDate {
        self.data_schiusa
            .unwrap_or_else(|| hatch_date(self.data_incubazione))
    }

    pub fn incubator_numbers(&self) -> Vec<u32> {
        parse_incubators(self.incubatrici.as_deref().unwrap_or(""))
    }

    pub fn requested(&self, product: Product) -> i64 {
        match product {
            Product::Granpollo => self.richiesta_granpollo,
            Product::Pollo70 => self.richiesta_pollo70,
            Product::ColorYeald => self.richiesta_color_yeald,
            Product::Ross => self.richiesta_ross,
        }
    }

    /// Eggs used per product across all batches
    pub fn used_by_product(&self) -> BTreeMap<Product, i64> {
        let mut used = BTreeMap::new();
        for batch in &self.batches {
            if let Some(product) = batch.product_line() {
                *used.entry(product).or_insert(0) += batch.uova_utilizzate;
            }
        }
        used
    }

    /// Forecast chicks across all batches
    pub fn forecast_chicks(&self, rates: &BirthRateMatrix) -> i64 {
        self.batches.iter().map(|b| b.forecast_chicks(rates)).sum()
    }
}

/// Eggs from one storage batch allocated to an incubation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncubationBatch {
    pub id: RowId,
    pub incubation_id: Option<RowId>,
    pub egg_storage_id: RowId,
    pub prodotto: String,
    pub nome: String,
    pub origine: String,
    /// Eggs available in the storage batch when allocated
    pub uova_partita: i64,
    #[serde(default)]
    pub uova_utilizzate: i64,
    pub eta: i32,
    pub storico_override: Option<Percent>,
}

impl IncubationBatch {
    pub fn product_line(&self) -> Option<Product> {
        self.prodotto.parse().ok()
    }

    pub fn storico(&self, rates: &BirthRateMatrix) -> Percent {
        storico_rate(rates, self.product_line(), self.eta, self.storico_override)
    }

    /// Forecast chicks: eggs used × hatch rate, rounded
    pub fn forecast_chicks(&self, rates: &BirthRateMatrix) -> i64 {
        self.storico(rates).apply(self.uova_utilizzate.max(0))
    }
}

/// Payload for creating an incubation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IncubationCreate {
    pub data_incubazione: Option<NaiveDate>,
    pub pre_incubazione_ore: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partenza_macchine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incubatrici: Option<String>,
    pub richiesta_granpollo: i64,
    pub richiesta_pollo70: i64,
    pub richiesta_color_yeald: i64,
    pub richiesta_ross: i64,
}

/// Partial update of an incubation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IncubationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_incubazione: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_incubazione_ore: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partenza_macchine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incubatrici: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub richiesta_granpollo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub richiesta_pollo70: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub richiesta_color_yeald: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub richiesta_ross: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stato: Option<String>,
}

/// Payload for allocating a storage batch to an incubation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreate {
    pub egg_storage_id: RowId,
    pub prodotto: String,
    pub nome: String,
    pub origine: String,
    pub uova_partita: i64,
    pub eta: i32,
}

/// Partial update of an allocated batch
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BatchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uova_utilizzate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storico_override: Option<Percent>,
}

/// Parse `"1, 3,5"` into machine numbers, ignoring junk
pub fn parse_incubators(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Join machine numbers for the wire (`"1,3,5"`)
pub fn format_incubators(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(prodotto: &str, used: i64, eta: i32) -> IncubationBatch {
        IncubationBatch {
            id: 1,
            incubation_id: Some(1),
            egg_storage_id: 10,
            prodotto: prodotto.to_string(),
            nome: "JA87".to_string(),
            origine: "Tonini".to_string(),
            uova_partita: 10_000,
            uova_utilizzate: used,
            eta,
            storico_override: None,
        }
    }

    #[test]
    fn test_incubator_parsing() {
        assert_eq!(parse_incubators("1, 3,5"), vec![1, 3, 5]);
        assert_eq!(parse_incubators(""), Vec::<u32>::new());
        assert_eq!(parse_incubators("2,x,4"), vec![2, 4]);
        assert_eq!(format_incubators(&[1, 3, 5]), "1,3,5");
    }

    #[test]
    fn test_forecast_and_usage() {
        let mut rates = BirthRateMatrix::default();
        rates.set(30, Product::Ross, Percent::from_whole(80).unwrap());

        let incubation = Incubation {
            id: 1,
            data_incubazione: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            data_schiusa: None,
            pre_incubazione_ore: 0,
            partenza_macchine: None,
            operatore: None,
            incubatrici: Some("1,3".to_string()),
            richiesta_granpollo: 0,
            richiesta_pollo70: 0,
            richiesta_color_yeald: 0,
            richiesta_ross: 9_000,
            stato: None,
            committed: false,
            batches: vec![batch("Ross", 5_000, 30), batch("Color Yeald", 1_000, 40)],
        };

        assert_eq!(
            incubation.expected_hatch(),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
        );
        // 5000 × 80% + 1000 × 82% (fallback)
        assert_eq!(incubation.forecast_chicks(&rates), 4_000 + 820);
        let used = incubation.used_by_product();
        assert_eq!(used[&Product::Ross], 5_000);
        assert_eq!(used[&Product::ColorYeald], 1_000);
        assert_eq!(incubation.requested(Product::Ross), 9_000);
        assert_eq!(incubation.incubator_numbers(), vec![1, 3]);
    }
}
