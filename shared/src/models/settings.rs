//! Cycle and planning-table settings

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::{DEFAULT_CYCLE_END_AGE, DEFAULT_PRODUCING_AGE};

/// Flock ages (weeks) at which laying starts and the cycle ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleSettings {
    #[serde(default = "default_start")]
    pub eta_inizio_ciclo: i32,
    #[serde(default = "default_end")]
    pub eta_fine_ciclo: i32,
}

fn default_start() -> i32 {
    DEFAULT_PRODUCING_AGE
}

fn default_end() -> i32 {
    DEFAULT_CYCLE_END_AGE
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            eta_inizio_ciclo: DEFAULT_PRODUCING_AGE,
            eta_fine_ciclo: DEFAULT_CYCLE_END_AGE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
pub struct CycleSettingsUpdate {
    #[validate(range(min = 1, max = 104))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_inizio_ciclo: Option<i32>,
    #[validate(range(min = 1, max = 156))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_fine_ciclo: Option<i32>,
}

/// Display options of a planning table (T010-T013)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanningTableSettings {
    #[serde(default = "default_sex_split")]
    pub show_sex_split: bool,
}

fn default_sex_split() -> bool {
    true
}

impl Default for PlanningTableSettings {
    fn default() -> Self {
        Self {
            show_sex_split: true,
        }
    }
}
