//! WebAssembly module for the Hatchery Dashboard
//!
//! Provides client-side computation for:
//! - Week labels and flock age
//! - Flock status and cycle labels
//! - Hatch dates and egg storage days
//! - Chick forecasts and percentage parsing
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings and week labels as
//! `YYYY/WW`.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::{BirthRateMatrix, FlockStatus, PurchaseBirthRates, SourceWeek};

fn js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in the browser's time zone
#[wasm_bindgen]
pub fn today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// ISO-8601 week number of a date
#[wasm_bindgen]
pub fn week_number(date: &str) -> Result<u32, JsValue> {
    parse_date(date).map(shared::week_number).map_err(js_error)
}

/// Shift a `YYYY/WW` label by `weeks` (52-week years)
#[wasm_bindgen]
pub fn add_weeks(label: &str, weeks: i32) -> Result<String, JsValue> {
    shared::add_weeks(label, weeks).map_err(|e| js_error(e.to_string()))
}

/// Age in weeks of a flock started at `start_year`/`start_week`
#[wasm_bindgen]
pub fn flock_age(start_year: i32, start_week: i32, today: &str) -> Result<i32, JsValue> {
    let today = parse_date(today).map_err(js_error)?;
    Ok(shared::age_weeks(start_year, start_week, today))
}

fn status_of(
    end_label: Option<&str>,
    start_year: i32,
    start_week: i32,
    producing_from: i32,
    today: NaiveDate,
) -> FlockStatus {
    shared::classify_status(
        end_label.filter(|s| !s.trim().is_empty()),
        shared::age_weeks(start_year, start_week, today),
        producing_from,
        today,
    )
}

/// Status label shown in the flock grid
#[wasm_bindgen]
pub fn flock_status(
    end_label: Option<String>,
    start_year: i32,
    start_week: i32,
    producing_from: i32,
    today: &str,
) -> Result<String, JsValue> {
    let today = parse_date(today).map_err(js_error)?;
    Ok(status_of(end_label.as_deref(), start_year, start_week, producing_from, today)
        .label_it()
        .to_string())
}

/// Expected hatch date of eggs set on `incubation_date`
#[wasm_bindgen]
pub fn hatch_date(incubation_date: &str) -> Result<String, JsValue> {
    parse_date(incubation_date)
        .map(|d| format_date(shared::hatch_date(d)))
        .map_err(js_error)
}

/// Days an egg batch has been in storage
#[wasm_bindgen]
pub fn storage_days(arrival: &str, today: &str) -> Result<i32, JsValue> {
    let arrival = parse_date(arrival).map_err(js_error)?;
    let today = parse_date(today).map_err(js_error)?;
    Ok(shared::storage_days(arrival, today) as i32)
}

/// Chicks expected from `eggs` at `rate` percent; `None` for a rate
/// outside 0-100
#[wasm_bindgen]
pub fn possible_animals(eggs: f64, rate: f64) -> Option<f64> {
    let rate = Decimal::try_from(rate).ok()?;
    let rate = Percent::new(rate).ok()?;
    Some(shared::possible_animals(eggs.round() as i64, rate) as f64)
}

/// Parse percentage text (`"82,5"`, `"85.50%"`); `None` when invalid
#[wasm_bindgen]
pub fn parse_percent(input: &str) -> Option<f64> {
    Percent::parse(input).and_then(|p| p.value().to_f64())
}

#[derive(Deserialize)]
struct ForecastInput {
    product: String,
    source: SourceWeek,
    #[serde(default)]
    rates: BirthRateMatrix,
    #[serde(default)]
    purchase_rates: PurchaseBirthRates,
}

fn forecast(input_json: &str) -> Result<String, String> {
    let input: ForecastInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid forecast JSON: {}", e))?;
    let product: Product = input.product.parse().map_err(|e: &str| e.to_string())?;
    let forecast = shared::forecast_week(
        &input.source,
        product,
        &input.rates,
        &input.purchase_rates,
    );
    serde_json::to_string(&forecast).map_err(|e| e.to_string())
}

/// Forecast one birth week from its source-week eggs.
///
/// Takes `{product, source: {contributions, purchased, sold}, rates?,
/// purchase_rates?}` and returns the term breakdown with the rounded total.
#[wasm_bindgen]
pub fn forecast_week(input_json: &str) -> Result<String, JsValue> {
    forecast(input_json).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_arithmetic() {
        assert_eq!(week_number("2025-06-18").unwrap(), 25);
        assert_eq!(add_weeks("2025/52", 1).unwrap(), "2026/01");
        assert_eq!(flock_age(2025, 1, "2025-06-18").unwrap(), 24);
    }

    #[test]
    fn test_flock_status() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        assert_eq!(status_of(Some("2025/20"), 2024, 1, 24, today), FlockStatus::Closed);
        assert_eq!(status_of(Some(" "), 2025, 10, 24, today), FlockStatus::Scheduled);
        assert_eq!(status_of(None, 2025, 1, 24, today), FlockStatus::Producing);
        assert_eq!(
            flock_status(None, 2025, 1, 24, "2025-06-18").unwrap(),
            FlockStatus::Producing.label_it()
        );
    }

    #[test]
    fn test_dates() {
        assert_eq!(hatch_date("2025-06-02").unwrap(), "2025-06-23");
        assert_eq!(storage_days("2025-06-02", "2025-06-10").unwrap(), 8);
        assert!(parse_date("02/06/2025").is_err());
    }

    #[test]
    fn test_possible_animals() {
        assert_eq!(possible_animals(10_000.0, 82.0), Some(8_200.0));
        assert_eq!(possible_animals(10_000.0, 120.0), None);
        assert_eq!(parse_percent("85,5%"), Some(85.5));
        assert_eq!(parse_percent("abc"), None);
    }

    #[test]
    fn test_forecast_json() {
        let output = forecast(
            r#"{
                "product": "ross",
                "source": {
                    "contributions": [{"allevamento": "Tonini", "eta": 30, "uova": 10000}],
                    "sold": 0
                }
            }"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["animali_possibili"], 8_200);
        assert!(forecast(r#"{"product": "tacchino", "source": {}}"#).is_err());
    }
}
