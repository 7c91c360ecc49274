//! Standard laying curves ("curve di produzione")

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Percent;

/// Name of the week column in the curve table
pub const WEEK_COLUMN: &str = "W";

/// One week of every curve, keyed by column name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ProductionCurveRow(pub BTreeMap<String, Value>);

impl ProductionCurveRow {
    /// Week number from the `W` column, which may be a number or text
    pub fn week(&self) -> Option<f64> {
        match self.0.get(WEEK_COLUMN)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        }
    }

    /// Laying percentage of `curve` for this week; `None` when blank or invalid
    pub fn percent(&self, curve: &str) -> Option<Percent> {
        match self.0.get(curve)? {
            Value::Null => None,
            value => Percent::deserialize(value.clone()).ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductionCurveTable {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<ProductionCurveRow>,
}

impl ProductionCurveTable {
    /// Curve names, i.e. every column but `W`
    pub fn curves(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| *c != WEEK_COLUMN)
    }

    pub fn row_for_week(&self, week: f64) -> Option<&ProductionCurveRow> {
        self.data.iter().find(|row| row.week() == Some(week))
    }
}

/// Single-cell update; the endpoint stores the value as text (`"85.50%"`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveCellUpdate {
    pub week: f64,
    pub column: String,
    pub value: String,
}

impl CurveCellUpdate {
    pub fn new(week: f64, column: &str, value: Percent) -> Self {
        Self {
            week,
            column: column.to_string(),
            value: value.to_label(),
        }
    }
}
