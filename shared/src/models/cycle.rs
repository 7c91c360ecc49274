//! Weekly cycle records of a flock

use serde::{Deserialize, Serialize};

use crate::types::RowId;

/// Age (weeks) of the first row added to an empty cycle
pub const FIRST_CYCLE_AGE: i32 = 19;

/// Per-week counters recorded for a flock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyData {
    pub id: RowId,
    pub lotto_id: RowId,
    pub eta_animali: i32,
    pub anno: i32,
    pub settimana: i32,
    #[serde(default)]
    pub galline_morte: i64,
    #[serde(default)]
    pub galli_morti: i64,
    #[serde(default)]
    pub uova_incubabili: i64,
    #[serde(default)]
    pub uova_seconda: i64,
    #[serde(default)]
    pub tipo_mangime: String,
    /// Lights on, e.g. `"05:00"`
    #[serde(default)]
    pub accensione_luce: String,
    #[serde(default)]
    pub spegnimento_luce: String,
}

/// Editable columns of the weekly cycle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeeklyField {
    DeadHens,
    DeadRoosters,
    HatchableEggs,
    SecondGradeEggs,
    FeedType,
    LightsOn,
    LightsOff,
}

impl WeeklyField {
    pub fn wire_name(&self) -> &'static str {
        match self {
            WeeklyField::DeadHens => "galline_morte",
            WeeklyField::DeadRoosters => "galli_morti",
            WeeklyField::HatchableEggs => "uova_incubabili",
            WeeklyField::SecondGradeEggs => "uova_seconda",
            WeeklyField::FeedType => "tipo_mangime",
            WeeklyField::LightsOn => "accensione_luce",
            WeeklyField::LightsOff => "spegnimento_luce",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            WeeklyField::DeadHens
                | WeeklyField::DeadRoosters
                | WeeklyField::HatchableEggs
                | WeeklyField::SecondGradeEggs
        )
    }
}

/// Payload for appending a weekly row; the backend derives the solar week
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeeklyDataCreate {
    pub eta_animali: i32,
    pub galline_morte: i64,
    pub galli_morti: i64,
    pub uova_incubabili: i64,
    pub uova_seconda: i64,
    pub tipo_mangime: String,
    pub accensione_luce: String,
    pub spegnimento_luce: String,
}

/// Weekly rows of one flock, as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDataSheet {
    pub lotto_id: RowId,
    pub anno_start: Option<i32>,
    pub sett_start: Option<i32>,
    #[serde(default)]
    pub data: Vec<WeeklyData>,
}

/// Age of the row that "add row" appends
pub fn next_cycle_age(rows: &[WeeklyData]) -> i32 {
    rows.iter()
        .map(|r| r.eta_animali)
        .max()
        .map(|max| max + 1)
        .unwrap_or(FIRST_CYCLE_AGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(eta: i32) -> WeeklyData {
        WeeklyData {
            id: eta as RowId,
            lotto_id: 1,
            eta_animali: eta,
            anno: 2025,
            settimana: 10,
            galline_morte: 0,
            galli_morti: 0,
            uova_incubabili: 0,
            uova_seconda: 0,
            tipo_mangime: String::new(),
            accensione_luce: String::new(),
            spegnimento_luce: String::new(),
        }
    }

    #[test]
    fn test_next_cycle_age() {
        assert_eq!(next_cycle_age(&[]), 19);
        assert_eq!(next_cycle_age(&[row(19), row(23), row(20)]), 24);
    }
}
