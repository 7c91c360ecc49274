//! Validation utilities for the Hatchery Dashboard
//!
//! Form validators return `Result<(), &'static str>`; the cell parsers used
//! by the editable grids return the parsed value, or `None` when the edit
//! must be discarded.

use chrono::NaiveTime;

use crate::calendar::{WeekLabel, WEEKS_PER_YEAR};
use crate::models::BIRTH_RATE_WEEKS;
use crate::types::Percent;

// ============================================================================
// Record Validations
// ============================================================================

/// Start week of a flock must lie in 1..=52
pub fn validate_start_week(week: i32) -> Result<(), &'static str> {
    if !(1..=WEEKS_PER_YEAR).contains(&week) {
        return Err("Start week must be between 1 and 52");
    }
    Ok(())
}

/// Explicit end of cycle, when present, must be a `YYYY/WW` label
pub fn validate_end_label(label: Option<&str>) -> Result<(), &'static str> {
    match label.map(str::trim) {
        None | Some("") => Ok(()),
        Some(raw) => raw
            .parse::<WeekLabel>()
            .map(|_| ())
            .map_err(|_| "End of cycle must be in YYYY/WW format"),
    }
}

/// Validate a percentage typed as text
pub fn validate_percentage(input: &str) -> Result<(), &'static str> {
    Percent::parse(input)
        .map(|_| ())
        .ok_or("Percentage must be a number between 0 and 100")
}

/// Birth rates are tracked from 24 to 64 weeks of age
pub fn validate_birth_rate_week(week: i32) -> Result<(), &'static str> {
    if !BIRTH_RATE_WEEKS.contains(&week) {
        return Err("Birth-rate week must be between 24 and 64");
    }
    Ok(())
}

/// Eggs used from a batch cannot exceed what the batch holds
pub fn validate_batch_usage(used: i64, available: i64) -> Result<(), &'static str> {
    if used < 0 {
        return Err("Used eggs cannot be negative");
    }
    if used > available {
        return Err("Used eggs exceed the eggs in the batch");
    }
    Ok(())
}

/// Quantities and head counts cannot be negative
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Lighting times are `HH:MM`
pub fn validate_light_time(input: &str) -> Result<(), &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    NaiveTime::parse_from_str(input, "%H:%M")
        .map(|_| ())
        .map_err(|_| "Time must be in HH:MM format")
}

// ============================================================================
// Cell Parsers
// ============================================================================

/// Parse an integer cell: dots are thousands separators, junk becomes 0
pub fn parse_integer_input(input: &str) -> i64 {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect();
    cleaned.parse().unwrap_or(0)
}

/// Parse a percentage cell; out-of-range or non-numeric input yields `None`
pub fn parse_percent_input(input: &str) -> Option<Percent> {
    Percent::parse(input)
}

/// Parse a `YYYY/WW` cell; blank clears the value
pub fn parse_end_label_input(input: &str) -> Option<Option<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    input
        .parse::<WeekLabel>()
        .ok()
        .map(|label| Some(label.to_string()))
}

// ============================================================================
// Formatting
// ============================================================================

/// Italian thousands grouping: 12345 -> "12.345"
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
