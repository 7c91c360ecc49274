//! Flock ("lotto") models

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::{self, FlockStatus, WeekLabel};
use crate::types::{Product, RowId};

/// A flock housed in a shed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lotto {
    pub id: RowId,
    #[serde(rename = "Allevamento")]
    pub farm: String,
    #[serde(rename = "Capannone")]
    pub shed: String,
    /// Hen genetics
    #[serde(rename = "Razza")]
    pub breed: String,
    /// Rooster genetics
    #[serde(rename = "Razza_Gallo", default, skip_serializing_if = "Option::is_none")]
    pub rooster_breed: Option<String>,
    #[serde(rename = "Prodotto")]
    pub product: String,
    #[serde(rename = "Capi")]
    pub head_count: i64,
    #[serde(rename = "Anno_Start")]
    pub start_year: i32,
    #[serde(rename = "Sett_Start")]
    pub start_week: i32,
    /// Explicit end of cycle, normally `YYYY/WW`
    #[serde(rename = "Data_Fine_Prevista", default, skip_serializing_if = "Option::is_none")]
    pub end_label: Option<String>,
    #[serde(rename = "Curva_Produzione", default, skip_serializing_if = "Option::is_none")]
    pub production_curve: Option<String>,
    #[serde(rename = "Attivo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Lotto {
    /// Birth week of the flock ("Nascita Ripr.")
    pub fn birth_label(&self) -> WeekLabel {
        WeekLabel::new(self.start_year, self.start_week.max(1))
    }

    pub fn age_weeks(&self, today: NaiveDate) -> i32 {
        calendar::age_weeks(self.start_year, self.start_week, today)
    }

    pub fn status(&self, today: NaiveDate, producing_from: i32) -> FlockStatus {
        calendar::classify_status(
            self.end_label.as_deref().filter(|s| !s.trim().is_empty()),
            self.age_weeks(today),
            producing_from,
            today,
        )
    }

    /// First laying week ("Inizio Ciclo")
    pub fn cycle_start(&self, producing_from: i32) -> WeekLabel {
        self.birth_label().add_weeks(producing_from)
    }

    /// Explicit end label when it parses, otherwise birth + default cycle length
    pub fn cycle_end(&self, cycle_end_age: i32) -> WeekLabel {
        self.explicit_end()
            .unwrap_or_else(|| self.birth_label().add_weeks(cycle_end_age))
    }

    /// Age at end of cycle ("Età fine ciclo")
    pub fn cycle_end_age(&self, cycle_end_age: i32) -> i32 {
        self.birth_label().weeks_until(self.cycle_end(cycle_end_age))
    }

    fn explicit_end(&self) -> Option<WeekLabel> {
        self.end_label.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn product_line(&self) -> Option<Product> {
        self.product.parse().ok()
    }

    /// Human-facing cycle code, e.g. `7TON2025JA87`
    pub fn user_code(&self) -> String {
        let farm: String = self.farm.chars().take(3).collect::<String>().to_uppercase();
        let farm = if farm.is_empty() { "XXX".to_string() } else { farm };
        let breed = self.breed.split(' ').next().filter(|s| !s.is_empty()).unwrap_or("N/A");
        format!("{}{}{}{}", self.id, farm, self.start_year, breed)
    }
}

/// Editable columns of the flock grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlockField {
    Farm,
    Shed,
    Breed,
    RoosterBreed,
    Product,
    HeadCount,
    StartYear,
    StartWeek,
    EndLabel,
    ProductionCurve,
    Active,
}

impl FlockField {
    /// Property name the backend expects in update payloads
    pub fn wire_name(&self) -> &'static str {
        match self {
            FlockField::Farm => "Allevamento",
            FlockField::Shed => "Capannone",
            FlockField::Breed => "Razza",
            FlockField::RoosterBreed => "Razza_Gallo",
            FlockField::Product => "Prodotto",
            FlockField::HeadCount => "Capi",
            FlockField::StartYear => "Anno_Start",
            FlockField::StartWeek => "Sett_Start",
            FlockField::EndLabel => "Data_Fine_Prevista",
            FlockField::ProductionCurve => "Curva_Produzione",
            FlockField::Active => "Attivo",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FlockField::HeadCount | FlockField::StartYear | FlockField::StartWeek
        )
    }
}

impl fmt::Display for FlockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Payload for housing a new flock
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LottoCreate {
    #[validate(length(min = 1))]
    #[serde(rename = "Allevamento")]
    pub farm: String,
    #[validate(length(min = 1))]
    #[serde(rename = "Capannone")]
    pub shed: String,
    #[serde(rename = "Razza")]
    pub breed: String,
    #[serde(rename = "Razza_Gallo", skip_serializing_if = "Option::is_none")]
    pub rooster_breed: Option<String>,
    #[serde(rename = "Prodotto")]
    pub product: String,
    #[validate(range(min = 0))]
    #[serde(rename = "Capi")]
    pub head_count: i64,
    #[serde(rename = "Anno_Start")]
    pub start_year: i32,
    #[validate(range(min = 1, max = 52))]
    #[serde(rename = "Sett_Start")]
    pub start_week: i32,
    #[serde(rename = "Data_Fine_Prevista", skip_serializing_if = "Option::is_none")]
    pub end_label: Option<String>,
    #[serde(rename = "Curva_Produzione", skip_serializing_if = "Option::is_none")]
    pub production_curve: Option<String>,
    #[serde(rename = "Attivo")]
    pub active: bool,
}

impl LottoCreate {
    /// Form defaults: first farm, shed 1, 10 000 head, week 1 of this year
    pub fn with_defaults(farm: &str, start_year: i32) -> Self {
        Self {
            farm: farm.to_string(),
            shed: "1".to_string(),
            breed: String::new(),
            rooster_breed: None,
            product: Product::Granpollo.label().to_string(),
            head_count: 10_000,
            start_year,
            start_week: 1,
            end_label: None,
            production_curve: Some("ROSS 308 STANDARD".to_string()),
            active: true,
        }
    }
}

/// Farms and their shed numbers
pub type FarmStructure = BTreeMap<String, Vec<i64>>;

/// Leading numeric id of a cycle code (`"12PAS2025JA57K"` -> 12)
pub fn id_from_code(code: &str) -> Option<RowId> {
    let digits: String = code.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Result of looking up a flock by cycle code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LottoSearchResult {
    pub found: bool,
    pub lotto: Lotto,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lotto {
        Lotto {
            id: 7,
            farm: "Tonini".to_string(),
            shed: "2".to_string(),
            breed: "JA87 STANDARD".to_string(),
            rooster_breed: None,
            product: "Granpollo".to_string(),
            head_count: 12_000,
            start_year: 2025,
            start_week: 1,
            end_label: None,
            production_curve: None,
            active: true,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Allevamento"], "Tonini");
        assert_eq!(json["Sett_Start"], 1);
        assert!(json.get("Data_Fine_Prevista").is_none());

        let parsed: Lotto = serde_json::from_value(serde_json::json!({
            "id": 1, "Allevamento": "A", "Capannone": "1", "Razza": "R",
            "Prodotto": "Ross", "Capi": 100, "Anno_Start": 2024, "Sett_Start": 3
        }))
        .unwrap();
        assert!(parsed.active);
        assert_eq!(parsed.product_line(), Some(Product::Ross));
    }

    #[test]
    fn test_cycle_labels() {
        let mut lotto = sample();
        assert_eq!(lotto.birth_label().to_string(), "2025/01");
        assert_eq!(lotto.cycle_start(24).to_string(), "2025/25");
        assert_eq!(lotto.cycle_end(64).to_string(), "2026/13");
        assert_eq!(lotto.cycle_end_age(64), 64);

        lotto.end_label = Some("2026/20".to_string());
        assert_eq!(lotto.cycle_end(64).to_string(), "2026/20");
        assert_eq!(lotto.cycle_end_age(64), 71);
    }

    #[test]
    fn test_user_code() {
        assert_eq!(sample().user_code(), "7TON2025JA87");
        assert_eq!(id_from_code("7TON2025JA87"), Some(7));
        assert_eq!(id_from_code(" 12PAS2025JA57K"), Some(12));
        assert_eq!(id_from_code("TON7"), None);
    }

    #[test]
    fn test_status_uses_end_label() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let mut lotto = sample();
        assert_eq!(lotto.status(today, 24), FlockStatus::Producing);
        lotto.end_label = Some("2025/20".to_string());
        assert_eq!(lotto.status(today, 24), FlockStatus::Closed);
        lotto.end_label = Some("  ".to_string());
        assert_eq!(lotto.status(today, 30), FlockStatus::Scheduled);
    }

    #[test]
    fn test_create_validation() {
        let mut form = LottoCreate::with_defaults("Tonini", 2025);
        assert!(form.validate().is_ok());
        form.start_week = 53;
        assert!(form.validate().is_err());
        form.start_week = 10;
        form.farm.clear();
        assert!(form.validate().is_err());
    }
}
