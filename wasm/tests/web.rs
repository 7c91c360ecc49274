//! Browser tests for the exported week and status helpers
//!
//! Run with `wasm-pack test --headless --firefox wasm`.

#![cfg(target_arch = "wasm32")]

use hatchery_dashboard_wasm::{add_weeks, flock_age, flock_status, parse_percent};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_add_weeks_rolls_over_year() {
    assert_eq!(add_weeks("2025/52", 1).unwrap(), "2026/01");
    assert_eq!(add_weeks("2025/01", -1).unwrap(), "2024/52");
    assert!(add_weeks("2025-01", 1).is_err());
}

#[wasm_bindgen_test]
fn test_flock_status_labels() {
    assert_eq!(flock_age(2025, 1, "2025-06-18").unwrap(), 24);
    assert_eq!(
        flock_status(None, 2025, 1, 24, "2025-06-18").unwrap(),
        "In produzione"
    );
    assert_eq!(
        flock_status(Some("2025/20".to_string()), 2024, 1, 24, "2025-06-18").unwrap(),
        "Chiuso"
    );
    assert_eq!(
        flock_status(None, 2025, 10, 24, "2025-06-18").unwrap(),
        "Previsto"
    );
    assert!(flock_status(None, 2025, 1, 24, "18/06/2025").is_err());
}

#[wasm_bindgen_test]
fn test_parse_percent() {
    assert_eq!(parse_percent("82,5%"), Some(82.5));
    assert_eq!(parse_percent("150"), None);
}
