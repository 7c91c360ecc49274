//! Egg purchase and sale ("acquisti"/"vendite") models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::WeekLabel;
use crate::types::{RowId, TradeKind};

/// A counterparty/product pair that gets its own column in the trading grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingConfig {
    pub id: RowId,
    pub tipo: TradeKind,
    pub azienda: String,
    pub prodotto: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TradingConfig {
    /// Grid column name, `Azienda_Prodotto`
    pub fn column_name(&self) -> String {
        format!("{}_{}", self.azienda, self.prodotto)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TradingConfigCreate {
    pub tipo: TradeKind,
    #[validate(length(min = 1))]
    pub azienda: String,
    #[validate(length(min = 1))]
    pub prodotto: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TradingConfigUpdate {
    #[validate(length(min = 1))]
    pub azienda: String,
    #[validate(length(min = 1))]
    pub prodotto: String,
}

/// One week of the trading grid: the period plus one quantity per column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingDataRow {
    #[serde(rename = "Periodo")]
    pub periodo: String,
    #[serde(flatten)]
    pub quantities: BTreeMap<String, i64>,
}

impl TradingDataRow {
    pub fn week(&self) -> Option<WeekLabel> {
        WeekLabel::parse_period(&self.periodo).ok()
    }

    pub fn quantity(&self, column: &str) -> i64 {
        self.quantities.get(column).copied().unwrap_or(0)
    }
}

/// The trading grid for one trade kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TradingTableData {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<TradingDataRow>,
}

impl TradingTableData {
    /// Columns holding quantities, i.e. everything but `Periodo`
    pub fn quantity_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| *c != "Periodo")
    }

    /// Sum of every column for the given week
    pub fn week_total(&self, week: WeekLabel) -> i64 {
        self.data
            .iter()
            .filter(|row| row.week() == Some(week))
            .map(|row| row.quantities.values().sum::<i64>())
            .sum()
    }
}

/// Quantity traded with one counterparty in one week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingCellUpdate {
    pub anno: i32,
    pub settimana: i32,
    pub azienda: String,
    pub prodotto: String,
    pub quantita: i64,
}

impl TradingCellUpdate {
    pub fn new(config: &TradingConfig, week: WeekLabel, quantita: i64) -> Self {
        Self {
            anno: week.year,
            settimana: week.week,
            azienda: config.azienda.clone(),
            prodotto: config.prodotto.clone(),
            quantita,
        }
    }
}

/// Bulk update body; the grid always sends a single cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingDataUpdate {
    pub updates: Vec<TradingCellUpdate>,
}

impl From<TradingCellUpdate> for TradingDataUpdate {
    fn from(update: TradingCellUpdate) -> Self {
        Self {
            updates: vec![update],
        }
    }
}
