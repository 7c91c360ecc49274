//! Week-label arithmetic for flock cycles
//!
//! Flock ages, cycle boundaries, and planning windows are all expressed as
//! `YYYY/WW` labels. Week numbers of calendar dates follow the ISO-8601
//! Thursday rule, while label arithmetic uses a fixed 52-week year. Years
//! with 53 ISO weeks therefore drift by one week; the backend performs the
//! same arithmetic, so both sides stay in agreement.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Weeks per year used by label arithmetic
pub const WEEKS_PER_YEAR: i32 = 52;

/// Age (weeks) at which a flock starts laying
pub const DEFAULT_PRODUCING_AGE: i32 = 24;

/// Age (weeks) at which a flock's cycle normally ends
pub const DEFAULT_CYCLE_END_AGE: i32 = 64;

/// Days between setting eggs in the incubator and hatching
pub const INCUBATION_DAYS: i64 = 21;

/// Days after which a stored egg batch is considered stale
pub const STALE_STORAGE_DAYS: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Week label must be in format YYYY/WW: {0}")]
    InvalidLabel(String),

    #[error("Week {0} is out of range")]
    WeekOutOfRange(i32),
}

/// A `YYYY/WW` week label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekLabel {
    pub year: i32,
    pub week: i32,
}

impl WeekLabel {
    /// Build a label, folding weeks outside 1..=52 into neighbouring years
    pub fn new(year: i32, week: i32) -> Self {
        let year = year + (week - 1).div_euclid(WEEKS_PER_YEAR);
        let week = (week - 1).rem_euclid(WEEKS_PER_YEAR) + 1;
        Self { year, week }
    }

    /// Label of the week containing `date`.
    ///
    /// The year is the calendar year of `date`, not its ISO week-year, so the
    /// first days of January may map to week 52 or 53 of the same year.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            week: week_number(date) as i32,
        }
    }

    pub fn add_weeks(self, weeks: i32) -> Self {
        Self::new(self.year, self.week + weeks)
    }

    /// Signed number of weeks from `self` to `other`
    pub fn weeks_until(self, other: WeekLabel) -> i32 {
        (other.year - self.year) * WEEKS_PER_YEAR + (other.week - self.week)
    }

    /// Label used by the trading grid (`"2026 - 04"`)
    pub fn to_period(self) -> String {
        format!("{} - {:02}", self.year, self.week)
    }

    /// Parse a trading-grid period (`"2026 - 04"`)
    pub fn parse_period(period: &str) -> Result<Self, CalendarError> {
        let (year, week) = period
            .split_once('-')
            .ok_or_else(|| CalendarError::InvalidLabel(period.to_string()))?;
        Self::from_parts(period, year, week)
    }

    fn from_parts(raw: &str, year: &str, week: &str) -> Result<Self, CalendarError> {
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| CalendarError::InvalidLabel(raw.to_string()))?;
        let week: i32 = week
            .trim()
            .parse()
            .map_err(|_| CalendarError::InvalidLabel(raw.to_string()))?;
        if !(1..=53).contains(&week) {
            return Err(CalendarError::WeekOutOfRange(week));
        }
        Ok(Self { year, week })
    }
}

impl PartialOrd for WeekLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeekLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.week).cmp(&(other.year, other.week))
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.week)
    }
}

impl FromStr for WeekLabel {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, week) = s
            .split_once('/')
            .ok_or_else(|| CalendarError::InvalidLabel(s.to_string()))?;
        Self::from_parts(s, year, week)
    }
}

impl Serialize for WeekLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// ISO-8601 week number (1..=53): move to the Thursday of the date's week and
/// count weeks from January 1st of that Thursday's year.
pub fn week_number(date: NaiveDate) -> u32 {
    let weekday = date.weekday().number_from_monday() as i64;
    let thursday = date + Duration::days(4 - weekday);
    thursday.ordinal0() / 7 + 1
}

/// Add `weeks` (possibly negative) to a `YYYY/WW` label
pub fn add_weeks(label: &str, weeks: i32) -> Result<String, CalendarError> {
    let parsed: WeekLabel = label.parse()?;
    Ok(parsed.add_weeks(weeks).to_string())
}

/// Age in weeks of a flock started at `start_year`/`start_week`, as of `today`
pub fn age_weeks(start_year: i32, start_week: i32, today: NaiveDate) -> i32 {
    WeekLabel {
        year: start_year,
        week: start_week,
    }
    .weeks_until(WeekLabel::containing(today))
}

/// Signed week distance between two labels
pub fn weeks_between(from: &str, to: &str) -> Result<i32, CalendarError> {
    let from: WeekLabel = from.parse()?;
    let to: WeekLabel = to.parse()?;
    Ok(from.weeks_until(to))
}

/// Calendar week of a weekly cycle row for animals aged `age` weeks
pub fn solar_week(start_year: i32, start_week: i32, age: i32) -> WeekLabel {
    WeekLabel::new(start_year, start_week + age)
}

/// Expected hatch date of eggs set on `incubation_date`
pub fn hatch_date(incubation_date: NaiveDate) -> NaiveDate {
    incubation_date + Duration::days(INCUBATION_DAYS)
}

/// Days an egg batch has been in storage ("giacenza"), never negative
pub fn storage_days(arrival: NaiveDate, today: NaiveDate) -> i64 {
    (today - arrival).num_days().max(0)
}

/// `count` consecutive week labels starting `offset` weeks after `start`
pub fn week_window(start: WeekLabel, offset: i32, count: usize) -> Vec<WeekLabel> {
    let first = start.add_weeks(offset);
    (0..count as i32).map(|i| first.add_weeks(i)).collect()
}

/// Whether an explicit end-of-cycle value lies in the past.
///
/// Accepts a `YYYY-MM-DD` date or a `YYYY/WW` label; anything else is
/// treated as "not passed".
pub fn end_label_passed(raw: &str, today: NaiveDate) -> bool {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date < today;
    }
    match raw.parse::<WeekLabel>() {
        Ok(label) => label < WeekLabel::containing(today),
        Err(_) => false,
    }
}

/// Lifecycle classification of a flock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlockStatus {
    /// Explicit end of cycle already passed
    Closed,
    /// Housed but not yet laying
    Scheduled,
    Producing,
}

impl FlockStatus {
    /// Label shown in the flock grid
    pub fn label_it(&self) -> &'static str {
        match self {
            FlockStatus::Closed => "Chiuso",
            FlockStatus::Scheduled => "Previsto",
            FlockStatus::Producing => "In produzione",
        }
    }
}

impl fmt::Display for FlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockStatus::Closed => write!(f, "Closed"),
            FlockStatus::Scheduled => write!(f, "Scheduled"),
            FlockStatus::Producing => write!(f, "Producing"),
        }
    }
}

/// Classify a flock from its explicit end label and age
pub fn classify_status(
    end_label: Option<&str>,
    age: i32,
    producing_from: i32,
    today: NaiveDate,
) -> FlockStatus {
    if end_label.is_some_and(|raw| end_label_passed(raw, today)) {
        return FlockStatus::Closed;
    }
    if age < producing_from {
        return FlockStatus::Scheduled;
    }
    FlockStatus::Producing
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_weeks_rollover() {
        assert_eq!(add_weeks("2025/52", 1).unwrap(), "2026/01");
        assert_eq!(add_weeks("2025/01", -1).unwrap(), "2024/52");
        assert_eq!(add_weeks("2025/10", 24).unwrap(), "2025/34");
        assert_eq!(add_weeks("2025/10", 104).unwrap(), "2027/10");
        assert_eq!(add_weeks("2025/10", -61).unwrap(), "2024/01");
    }

    #[test]
    fn test_add_weeks_rejects_bad_labels() {
        assert!(add_weeks("2025-10", 1).is_err());
        assert!(add_weeks("2025/xx", 1).is_err());
        assert_eq!(
            add_weeks("2025/60", 1),
            Err(CalendarError::WeekOutOfRange(60))
        );
    }

    #[test]
    fn test_week_number_known_dates() {
        assert_eq!(week_number(date(2025, 1, 1)), 1);
        assert_eq!(week_number(date(2025, 6, 18)), 25);
        assert_eq!(week_number(date(2020, 12, 31)), 53);
        assert_eq!(week_number(date(2021, 1, 3)), 53);
        assert_eq!(week_number(date(2024, 12, 30)), 1);
    }

    #[test]
    fn test_age_weeks() {
        // 2025-06-18 falls in week 25
        assert_eq!(age_weeks(2025, 1, date(2025, 6, 18)), 24);
        assert_eq!(age_weeks(2024, 50, date(2025, 6, 18)), 27);
        assert_eq!(age_weeks(2025, 30, date(2025, 6, 18)), -5);
    }

    #[test]
    fn test_weeks_between() {
        assert_eq!(weeks_between("2024/10", "2025/22").unwrap(), 64);
        assert_eq!(weeks_between("2025/22", "2024/10").unwrap(), -64);
    }

    #[test]
    fn test_classify_status() {
        let today = date(2025, 6, 18);
        assert_eq!(
            classify_status(Some("2025/10"), 40, 24, today),
            FlockStatus::Closed
        );
        assert_eq!(
            classify_status(Some("2025-06-17"), 2, 24, today),
            FlockStatus::Closed
        );
        assert_eq!(
            classify_status(Some("2026/10"), 10, 24, today),
            FlockStatus::Scheduled
        );
        assert_eq!(classify_status(None, 23, 24, today), FlockStatus::Scheduled);
        assert_eq!(classify_status(None, 24, 24, today), FlockStatus::Producing);
        assert_eq!(
            classify_status(Some("not a date"), 30, 24, today),
            FlockStatus::Producing
        );
    }

    #[test]
    fn test_hatch_and_storage_days() {
        assert_eq!(hatch_date(date(2025, 2, 10)), date(2025, 3, 3));
        assert_eq!(storage_days(date(2025, 6, 10), date(2025, 6, 18)), 8);
        assert_eq!(storage_days(date(2025, 6, 20), date(2025, 6, 18)), 0);
    }

    #[test]
    fn test_week_window_rolls_over() {
        let window = week_window(WeekLabel::new(2025, 50), 3, 3);
        let labels: Vec<String> = window.iter().map(|w| w.to_string()).collect();
        assert_eq!(labels, vec!["2026/01", "2026/02", "2026/03"]);
    }

    #[test]
    fn test_period_round_trip() {
        let label = WeekLabel::parse_period("2026 - 04").unwrap();
        assert_eq!(label, WeekLabel::new(2026, 4));
        assert_eq!(label.to_period(), "2026 - 04");
    }

    #[test]
    fn test_solar_week() {
        assert_eq!(solar_week(2025, 40, 19), WeekLabel::new(2026, 7));
    }

    proptest! {
        #[test]
        fn prop_week_number_matches_iso(days in 0i64..20_000) {
            let d = date(1990, 1, 1) + Duration::days(days);
            prop_assert_eq!(week_number(d), d.iso_week().week());
        }

        #[test]
        fn prop_add_weeks_stays_in_range(year in 1990i32..2100, week in 1i32..=52, n in -500i32..500) {
            let label = WeekLabel { year, week }.add_weeks(n);
            prop_assert!((1..=52).contains(&label.week));
            prop_assert_eq!(WeekLabel { year, week }.weeks_until(label), n);
        }
    }
}
