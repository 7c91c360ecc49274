//! Chick forecasting for the planning tables
//!
//! Chicks hatch three weeks after the eggs are laid, so every birth week
//! draws on the eggs of its source week: produced by the housed flocks,
//! plus purchased, minus sold. Each contribution is multiplied by the hatch
//! rate for its age and the total is rounded to the nearest hundred.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calendar::WeekLabel;
use crate::models::{BirthRateMatrix, PurchaseBirthRates};
use crate::types::{Percent, Product, SexType};

/// Weeks between laying and hatching
pub const HATCH_LAG_WEEKS: i32 = 3;

/// Number of birth weeks shown in a planning table
pub const PLANNING_WEEKS: usize = 52;

/// Chicks expected from `eggs` at the given hatch rate
pub fn possible_animals(eggs: i64, birth_rate: Percent) -> i64 {
    birth_rate.apply(eggs)
}

/// Round to the nearest hundred, halves away from zero
pub fn round_to_hundreds(value: i64) -> i64 {
    (Decimal::from(value) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
        * 100
}

/// Eggs laid by one flock in the source week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlockContribution {
    pub allevamento: String,
    /// Age of the hens in weeks
    pub eta: i32,
    pub uova: i64,
}

/// One line of the "animali possibili" breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTerm {
    pub source: String,
    pub uova: i64,
    pub eta: Option<i32>,
    pub rate: Percent,
    pub animali: i64,
}

/// Forecast for one birth week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekForecast {
    pub terms: Vec<ForecastTerm>,
    pub animali_possibili: i64,
}

/// Eggs entering a birth week's forecast
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeek {
    pub contributions: Vec<FlockContribution>,
    pub purchased: i64,
    pub sold: i64,
}

impl SourceWeek {
    pub fn produced(&self) -> i64 {
        self.contributions.iter().map(|c| c.uova).sum()
    }

    /// `produced + purchased - sold`
    pub fn total_eggs(&self) -> i64 {
        self.produced() + self.purchased - self.sold
    }
}

/// Forecast the chicks of one birth week.
///
/// Sold eggs are taken from the youngest flocks first; what remains of
/// each flock's eggs hatches at the rate for its age, purchased eggs at the
/// product's purchase rate.
pub fn forecast_week(
    source: &SourceWeek,
    product: Product,
    rates: &BirthRateMatrix,
    purchase_rates: &PurchaseBirthRates,
) -> WeekForecast {
    let mut contributions: Vec<&FlockContribution> = source.contributions.iter().collect();
    contributions.sort_by_key(|c| c.eta);

    let mut remaining_sales = source.sold.max(0);
    let mut terms = Vec::new();
    for contribution in contributions {
        let taken = remaining_sales.min(contribution.uova.max(0));
        remaining_sales -= taken;
        let uova = contribution.uova - taken;
        if uova <= 0 {
            continue;
        }
        let rate = rates.rate(contribution.eta, product);
        terms.push(ForecastTerm {
            source: contribution.allevamento.clone(),
            uova,
            eta: Some(contribution.eta),
            rate,
            animali: possible_animals(uova, rate),
        });
    }

    if source.purchased > 0 {
        let rate = purchase_rates.rate(product);
        terms.push(ForecastTerm {
            source: "Uova Acquistate".to_string(),
            uova: source.purchased,
            eta: None,
            rate,
            animali: possible_animals(source.purchased, rate),
        });
    }

    let total: i64 = terms.iter().map(|t| t.animali).sum();
    WeekForecast {
        terms,
        animali_possibili: round_to_hundreds(total),
    }
}

/// A client's request in one birth week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientRequest {
    pub sex_type: SexType,
    pub quantity: i64,
}

/// Chicks left after the requests; negative means a shortfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Split { maschi: i64, femmine: i64 },
    Combined(i64),
}

impl Availability {
    pub fn is_short(&self) -> bool {
        match *self {
            Availability::Split { maschi, femmine } => maschi < 0 || femmine < 0,
            Availability::Combined(total) => total < 0,
        }
    }
}

/// Subtract client requests from the possible chicks.
///
/// With the sex split, half of the chicks are males and half females;
/// clients taking both sexes draw half of their request from each.
pub fn availability(
    possible: i64,
    requests: &[ClientRequest],
    show_sex_split: bool,
) -> Availability {
    if !show_sex_split {
        let requested: i64 = requests.iter().map(|r| r.quantity).sum();
        return Availability::Combined(possible - requested);
    }

    let mut maschi = possible / 2;
    let mut femmine = possible / 2;
    for request in requests {
        match request.sex_type {
            SexType::Maschi => maschi -= request.quantity,
            SexType::Femmine => femmine -= request.quantity,
            SexType::Entrambi => {
                maschi -= request.quantity / 2;
                femmine -= request.quantity / 2;
            }
        }
    }
    Availability::Split { maschi, femmine }
}

/// Birth weeks of a planning table with their source weeks.
///
/// The table starts three weeks after the current week so that every row
/// can still be served by eggs laid from this week on.
pub fn planning_window(today: NaiveDate) -> Vec<(WeekLabel, WeekLabel)> {
    crate::calendar::week_window(WeekLabel::containing(today), HATCH_LAG_WEEKS, PLANNING_WEEKS)
        .into_iter()
        .map(|birth| (birth, birth.add_weeks(-HATCH_LAG_WEEKS)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entrambi(quantity: i64) -> ClientRequest {
        ClientRequest {
            sex_type: SexType::Entrambi,
            quantity,
        }
    }

    #[test]
    fn test_possible_animals() {
        assert_eq!(possible_animals(10_000, Percent::from_whole(82).unwrap()), 8_200);
        assert_eq!(possible_animals(3, Percent::parse("50").unwrap()), 2);
        assert_eq!(possible_animals(0, Percent::HUNDRED), 0);
    }

    #[test]
    fn test_round_to_hundreds() {
        assert_eq!(round_to_hundreds(8_249), 8_200);
        assert_eq!(round_to_hundreds(8_250), 8_300);
        assert_eq!(round_to_hundreds(49), 0);
        assert_eq!(round_to_hundreds(-150), -200);
    }

    #[test]
    fn test_two_entrambi_clients_split_evenly() {
        let possible = possible_animals(10_000, Percent::from_whole(82).unwrap());
        let result = availability(possible, &[entrambi(2_000), entrambi(2_000)], true);
        assert_eq!(result, Availability::Split { maschi: 2_100, femmine: 2_100 });
        assert!(!result.is_short());
    }

    #[test]
    fn test_sex_specific_clients_and_combined_total() {
        let requests = [
            ClientRequest { sex_type: SexType::Maschi, quantity: 3_000 },
            ClientRequest { sex_type: SexType::Femmine, quantity: 500 },
            entrambi(1_001),
        ];
        assert_eq!(
            availability(6_000, &requests, true),
            Availability::Split { maschi: -500, femmine: 2_000 }
        );
        assert!(availability(6_000, &requests, true).is_short());
        assert_eq!(availability(6_000, &requests, false), Availability::Combined(1_499));
    }

    #[test]
    fn test_sales_consume_youngest_flocks_first() {
        let mut rates = BirthRateMatrix::default();
        rates.set(26, Product::Ross, Percent::from_whole(70).unwrap());
        rates.set(40, Product::Ross, Percent::from_whole(90).unwrap());

        let source = SourceWeek {
            contributions: vec![
                FlockContribution { allevamento: "Old".to_string(), eta: 40, uova: 5_000 },
                FlockContribution { allevamento: "Young".to_string(), eta: 26, uova: 3_000 },
            ],
            purchased: 1_000,
            sold: 4_000,
        };
        assert_eq!(source.total_eggs(), 5_000);

        let forecast = forecast_week(&source, Product::Ross, &rates, &PurchaseBirthRates::default());
        // Young (3000) fully sold, Old keeps 4000 × 90%, purchases 1000 × 84%
        assert_eq!(forecast.terms.len(), 2);
        assert_eq!(forecast.terms[0].source, "Old");
        assert_eq!(forecast.terms[0].uova, 4_000);
        assert_eq!(forecast.terms[0].animali, 3_600);
        assert_eq!(forecast.terms[1].eta, None);
        assert_eq!(forecast.terms[1].animali, 840);
        assert_eq!(forecast.animali_possibili, 4_400);
    }

    #[test]
    fn test_planning_window_source_lag() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        let window = planning_window(today);
        assert_eq!(window.len(), 52);
        assert_eq!(window[0].0.to_string(), "2026/02");
        assert_eq!(window[0].1.to_string(), "2025/51");
        assert_eq!(window[51].0.to_string(), "2027/01");
    }

    proptest! {
        #[test]
        fn prop_sex_split_conserves_requests(
            possible in 0i64..1_000_000,
            quantities in proptest::collection::vec(0i64..50_000, 0..8),
        ) {
            let requests: Vec<_> = quantities.iter().map(|q| entrambi(*q * 2)).collect();
            let requested: i64 = quantities.iter().sum::<i64>() * 2;
            if let Availability::Split { maschi, femmine } = availability(possible, &requests, true) {
                prop_assert_eq!(maschi, femmine);
                prop_assert_eq!(maschi + femmine, (possible / 2) * 2 - requested);
            } else {
                prop_assert!(false, "expected a split result");
            }
        }

        #[test]
        fn prop_rounded_forecast_is_multiple_of_hundred(
            uova in proptest::collection::vec((24i32..64, 0i64..100_000), 0..6),
            purchased in 0i64..50_000,
            sold in 0i64..50_000,
        ) {
            let source = SourceWeek {
                contributions: uova
                    .iter()
                    .map(|(eta, n)| FlockContribution { allevamento: "A".to_string(), eta: *eta, uova: *n })
                    .collect(),
                purchased,
                sold,
            };
            let forecast = forecast_week(&source, Product::Granpollo, &BirthRateMatrix::default(), &PurchaseBirthRates::default());
            prop_assert_eq!(forecast.animali_possibili % 100, 0);
            prop_assert!(forecast.animali_possibili >= 0);
        }
    }
}
