//! Hatch-rate tables used to forecast chick yield

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Percent, Product};

/// First and last age (weeks) covered by the birth-rate table
pub const BIRTH_RATE_WEEKS: std::ops::RangeInclusive<i32> = 24..=64;

/// Rate assumed for eggs of an age/product missing from the table
pub fn default_birth_rate() -> Percent {
    Percent::from_whole(82).unwrap_or_default()
}

/// Rate assumed for purchased eggs of a product missing from the table
pub fn default_purchase_birth_rate() -> Percent {
    Percent::from_whole(84).unwrap_or_default()
}

/// Week (24-64) × product key → hatch percentage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BirthRateMatrix {
    #[serde(default)]
    pub data: BTreeMap<i32, BTreeMap<String, Percent>>,
}

impl BirthRateMatrix {
    /// Hatch rate for eggs laid at `age` weeks, falling back to 82%
    pub fn rate(&self, age: i32, product: Product) -> Percent {
        self.data
            .get(&age)
            .and_then(|row| row.get(product.key()))
            .copied()
            .unwrap_or_else(default_birth_rate)
    }

    pub fn set(&mut self, age: i32, product: Product, rate: Percent) {
        self.data
            .entry(age)
            .or_default()
            .insert(product.key().to_string(), rate);
    }
}

/// Hatch rate per product for purchased eggs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PurchaseBirthRates {
    #[serde(default)]
    pub data: BTreeMap<String, Percent>,
}

impl PurchaseBirthRates {
    pub fn rate(&self, product: Product) -> Percent {
        self.data
            .get(product.key())
            .copied()
            .unwrap_or_else(default_purchase_birth_rate)
    }
}

/// Single-cell update of the birth-rate table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRateUpdate {
    pub week: i32,
    pub product: String,
    pub rate: Percent,
}

/// Single-cell update of the purchase birth-rate table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseBirthRateUpdate {
    pub product: String,
    pub rate: Percent,
}

/// Hatch rate applied to an incubation batch: explicit override, else table
pub fn storico_rate(
    matrix: &BirthRateMatrix,
    product: Option<Product>,
    age: i32,
    storico_override: Option<Percent>,
) -> Percent {
    if let Some(rate) = storico_override {
        return rate;
    }
    match product {
        Some(product) => matrix.rate(age, product),
        None => default_birth_rate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_deserializes_string_week_keys() {
        let json = r#"{"data": {"24": {"granpollo": 78.5, "ross": "80%"}, "25": {"granpollo": 81}}}"#;
        let matrix: BirthRateMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(matrix.rate(24, Product::Granpollo), Percent::parse("78.5").unwrap());
        assert_eq!(matrix.rate(24, Product::Ross), Percent::parse("80").unwrap());
        assert_eq!(matrix.rate(30, Product::Granpollo), default_birth_rate());
    }

    #[test]
    fn test_purchase_rate_fallback() {
        let rates = PurchaseBirthRates::default();
        assert_eq!(rates.rate(Product::Pollo70), Percent::from_whole(84).unwrap());
    }

    #[test]
    fn test_storico_rate_prefers_override() {
        let mut matrix = BirthRateMatrix::default();
        matrix.set(30, Product::Ross, Percent::from_whole(75).unwrap());
        assert_eq!(
            storico_rate(&matrix, Some(Product::Ross), 30, Some(Percent::from_whole(90).unwrap())),
            Percent::from_whole(90).unwrap()
        );
        assert_eq!(
            storico_rate(&matrix, Some(Product::Ross), 30, None),
            Percent::from_whole(75).unwrap()
        );
        assert_eq!(storico_rate(&matrix, None, 30, None), default_birth_rate());
    }
}
