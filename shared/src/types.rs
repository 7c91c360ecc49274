//! Common types used across the dashboard

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier assigned by the backend to every stored row
pub type RowId = i64;

/// A percentage in the range 0-100.
///
/// The backend is inconsistent about how it encodes percentages: birth rates
/// travel as plain numbers while production curves use strings such as
/// `"85.5%"`. Both forms are accepted on input; the numeric form is emitted
/// on output and the string form is produced only through [`Percent::to_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(Decimal);

impl Percent {
    pub const HUNDRED: Percent = Percent(Decimal::ONE_HUNDRED);

    /// Create a percentage, rejecting values outside 0-100
    pub fn new(value: Decimal) -> Result<Self, &'static str> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err("Percentage must be between 0 and 100");
        }
        Ok(Self(value.normalize()))
    }

    /// Create a percentage from a whole number
    pub fn from_whole(value: u32) -> Result<Self, &'static str> {
        Self::new(Decimal::from(value))
    }

    /// Parse user or wire text: `"82"`, `"82.5"`, `"82,5"`, `"82.50%"`
    pub fn parse(input: &str) -> Option<Self> {
        let cleaned = input.trim().trim_end_matches('%').trim().replace(',', ".");
        if cleaned.is_empty() {
            return None;
        }
        let value = Decimal::from_str(&cleaned).ok()?;
        Self::new(value).ok()
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The percentage as a fraction (82% -> 0.82)
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Apply the percentage to a whole quantity, rounding half away from zero
    pub fn apply(&self, quantity: i64) -> i64 {
        (Decimal::from(quantity) * self.fraction())
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    }

    /// String form expected by the production-curve endpoint (`"85.50%"`)
    pub fn to_label(&self) -> String {
        format!("{:.2}%", self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0.to_f64().unwrap_or(0.0))
    }
}

struct PercentVisitor;

impl<'de> Visitor<'de> for PercentVisitor {
    type Value = Percent;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number between 0 and 100 or a string such as \"85.5%\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Percent, E> {
        let value = Decimal::from_f64(v).ok_or_else(|| E::custom("percentage is not finite"))?;
        Percent::new(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Percent, E> {
        Percent::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Percent, E> {
        Percent::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Percent, E> {
        Percent::parse(v).ok_or_else(|| E::custom(format!("invalid percentage: {}", v)))
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PercentVisitor)
    }
}

/// Product lines raised on the farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Product {
    Granpollo,
    Pollo70,
    ColorYeald,
    Ross,
}

impl Product {
    pub const ALL: [Product; 4] = [
        Product::Granpollo,
        Product::Pollo70,
        Product::ColorYeald,
        Product::Ross,
    ];

    /// Key used in API paths and birth-rate tables
    pub fn key(&self) -> &'static str {
        match self {
            Product::Granpollo => "granpollo",
            Product::Pollo70 => "pollo70",
            Product::ColorYeald => "colorYeald",
            Product::Ross => "ross",
        }
    }

    /// Name stored on flock and storage records
    pub fn label(&self) -> &'static str {
        match self {
            Product::Granpollo => "Granpollo",
            Product::Pollo70 => "Pollo70",
            Product::ColorYeald => "Color Yeald",
            Product::Ross => "Ross",
        }
    }

    /// Identifier of the planning table that forecasts this product
    pub fn planning_table_id(&self) -> &'static str {
        match self {
            Product::Granpollo => "T010",
            Product::Pollo70 => "T011",
            Product::ColorYeald => "T012",
            Product::Ross => "T013",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Product {
    type Err = &'static str;

    /// Accepts both record labels ("Color Yeald") and keys ("colorYeald")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "granpollo" => Ok(Product::Granpollo),
            "pollo70" => Ok(Product::Pollo70),
            "coloryeald" => Ok(Product::ColorYeald),
            "ross" => Ok(Product::Ross),
            _ => Err("Unknown product"),
        }
    }
}

/// Which chicks a planning client takes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SexType {
    Maschi,
    Femmine,
    #[default]
    #[serde(other)]
    Entrambi,
}

impl SexType {
    pub fn symbol(&self) -> &'static str {
        match self {
            SexType::Maschi => "♂",
            SexType::Femmine => "♀",
            SexType::Entrambi => "♂♀",
        }
    }
}

/// Direction of an egg trade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Acquisto,
    Vendita,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Acquisto => "acquisto",
            TradeKind::Vendita => "vendita",
        }
    }
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
