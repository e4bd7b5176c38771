//! Demand estimation over a medicine's sales window: daily bucketing,
//! moving-average profiles, and history-depth confidence grading.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{SaleRecord, StockState};

/// Demand statistics derived from one medicine's sales window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub total_units: u64,
    /// Units per day over the requested window length. Days without sales
    /// count toward the denominator, so sparse sellers average low instead
    /// of being skipped.
    pub daily_average: f64,
    /// Distinct calendar days with at least one sale.
    pub observed_days: usize,
    /// Ledger records in the window.
    pub sample_count: usize,
    /// Last observed day's total minus the first's.
    pub trend: f64,
}

/// Total units sold per calendar day; multiple records on a day are summed.
pub fn daily_totals(window: &[SaleRecord]) -> BTreeMap<NaiveDate, u64> {
    let mut totals = BTreeMap::new();
    for record in window {
        *totals.entry(record.date).or_insert(0u64) += u64::from(record.quantity);
    }
    totals
}

/// Summarizes a sales window against a lookback of `lookback_days` days.
/// Entry points validate `lookback_days >= 1` before calling in here.
pub fn profile(window: &[SaleRecord], lookback_days: u32) -> DemandProfile {
    let totals = daily_totals(window);
    let total_units: u64 = totals.values().sum();
    let daily_average = total_units as f64 / f64::from(lookback_days.max(1));
    let trend = match (totals.values().next(), totals.values().next_back()) {
        (Some(first), Some(last)) => *last as f64 - *first as f64,
        _ => 0.0,
    };
    DemandProfile {
        total_units,
        daily_average,
        observed_days: totals.len(),
        sample_count: window.len(),
        trend,
    }
}

/// Confidence in a demand estimate, graded by history depth.
pub fn confidence(sample_count: usize) -> f64 {
    if sample_count >= 30 {
        0.8
    } else if sample_count >= 14 {
        0.6
    } else if sample_count >= 1 {
        0.4
    } else {
        0.2
    }
}

/// A medicine ranked by units sold over the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSeller {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub total_sold: u64,
    pub avg_per_sale: f64,
}

/// Ranks medicines by total units sold, descending, keeping `limit` rows.
pub fn top_sellers(items: &[(StockState, Vec<SaleRecord>)], limit: usize) -> Vec<TopSeller> {
    let mut ranked: Vec<TopSeller> = items
        .iter()
        .map(|(stock, window)| {
            let total_sold: u64 = window.iter().map(|r| u64::from(r.quantity)).sum();
            let avg_per_sale = if window.is_empty() {
                0.0
            } else {
                total_sold as f64 / window.len() as f64
            };
            TopSeller {
                medicine_id: stock.medicine_id,
                medicine_name: stock.medicine_name.clone(),
                total_sold,
                avg_per_sale,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[test]
    fn daily_totals_merges_same_day_records() {
        let window = vec![
            SaleRecord::new(day(1), 3),
            SaleRecord::new(day(1), 4),
            SaleRecord::new(day(2), 5),
        ];
        let totals = daily_totals(&window);
        assert_eq!(totals[&day(1)], 7);
        assert_eq!(totals[&day(2)], 5);
    }

    #[test]
    fn profile_divides_by_window_length_not_active_days() {
        // 70 units on just two active days still averages over 7 days.
        let window = vec![SaleRecord::new(day(1), 30), SaleRecord::new(day(4), 40)];
        let p = profile(&window, 7);
        assert_eq!(p.total_units, 70);
        assert!((p.daily_average - 10.0).abs() < f64::EPSILON);
        assert_eq!(p.observed_days, 2);
        assert_eq!(p.sample_count, 2);
        assert!((p.trend - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_window_profiles_as_zero_demand() {
        let p = profile(&[], 7);
        assert_eq!(p.total_units, 0);
        assert_eq!(p.daily_average, 0.0);
        assert_eq!(p.trend, 0.0);
    }

    #[rstest]
    #[case(0, 0.2)]
    #[case(1, 0.4)]
    #[case(13, 0.4)]
    #[case(14, 0.6)]
    #[case(29, 0.6)]
    #[case(30, 0.8)]
    fn confidence_tiers(#[case] samples: usize, #[case] expected: f64) {
        assert_eq!(confidence(samples), expected);
    }

    #[test]
    fn top_sellers_ranks_by_total_descending() {
        let slow = StockState::new(Uuid::new_v4(), "Cetirizine 10mg", 50, 10);
        let fast = StockState::new(Uuid::new_v4(), "Paracetamol 500mg", 50, 10);
        let items = vec![
            (slow, vec![SaleRecord::new(day(1), 2)]),
            (fast, vec![SaleRecord::new(day(1), 20), SaleRecord::new(day(2), 10)]),
        ];
        let ranked = top_sellers(&items, 10);
        assert_eq!(ranked[0].medicine_name, "Paracetamol 500mg");
        assert_eq!(ranked[0].total_sold, 30);
        assert!((ranked[0].avg_per_sale - 15.0).abs() < f64::EPSILON);
        assert_eq!(ranked[1].total_sold, 2);
    }

    #[test]
    fn top_sellers_honors_limit() {
        let items: Vec<(StockState, Vec<SaleRecord>)> = (0u32..5)
            .map(|i| {
                (
                    StockState::new(Uuid::new_v4(), format!("med-{}", i), 10, 5),
                    vec![SaleRecord::new(day(1), i)],
                )
            })
            .collect();
        assert_eq!(top_sellers(&items, 3).len(), 3);
    }
}
