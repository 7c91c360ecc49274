//! Cell values and the parsers that turn editor text into them

use std::fmt;

use serde_json::Value;
use shared::{format_thousands, parse_integer_input, parse_percent_input, Percent};

/// Content of a heterogeneous table cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Percent(Percent),
    Flag(bool),
}

impl CellValue {
    /// JSON form used in partial-update bodies
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Empty => Value::Null,
            CellValue::Text(text) => Value::String(text.clone()),
            CellValue::Integer(n) => Value::from(*n),
            CellValue::Percent(p) => serde_json::to_value(p).unwrap_or(Value::Null),
            CellValue::Flag(flag) => Value::Bool(*flag),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_percent(&self) -> Option<Percent> {
        match self {
            CellValue::Percent(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Integer(n) => f.write_str(&format_thousands(*n)),
            CellValue::Percent(p) => write!(f, "{}", p),
            CellValue::Flag(true) => f.write_str("Sì"),
            CellValue::Flag(false) => f.write_str("No"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<Percent> for CellValue {
    fn from(p: Percent) -> Self {
        CellValue::Percent(p)
    }
}

/// Integer cells never reject input; junk becomes 0
pub fn integer_cell(raw: &str) -> Option<CellValue> {
    Some(CellValue::Integer(parse_integer_input(raw)))
}

pub fn percent_cell(raw: &str) -> Option<CellValue> {
    parse_percent_input(raw).map(CellValue::Percent)
}

/// Text cells keep the trimmed input; blank clears the cell
pub fn text_cell(raw: &str) -> Option<CellValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        Some(CellValue::Empty)
    } else {
        Some(CellValue::Text(raw.to_string()))
    }
}

/// Plain integer grids (trading, planning requests)
pub fn quantity(raw: &str) -> Option<i64> {
    Some(parse_integer_input(raw))
}

/// Plain percentage grids (birth rates, curves)
pub fn percent(raw: &str) -> Option<Percent> {
    parse_percent_input(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers() {
        assert_eq!(integer_cell("12.000"), Some(CellValue::Integer(12_000)));
        assert_eq!(integer_cell("abc"), Some(CellValue::Integer(0)));
        assert_eq!(percent_cell("101"), None);
        assert_eq!(text_cell("  "), Some(CellValue::Empty));
        assert_eq!(text_cell(" JA87 "), Some(CellValue::Text("JA87".to_string())));
    }

    #[test]
    fn test_json_and_display() {
        assert_eq!(CellValue::Integer(5).to_json(), serde_json::json!(5));
        assert_eq!(CellValue::Empty.to_json(), Value::Null);
        assert_eq!(
            CellValue::Percent(Percent::parse("82.5").unwrap()).to_json(),
            serde_json::json!(82.5)
        );
        assert_eq!(CellValue::Integer(10_000).to_string(), "10.000");
        assert_eq!(CellValue::Percent(Percent::parse("82.5").unwrap()).to_string(), "82.50%");
    }
}
