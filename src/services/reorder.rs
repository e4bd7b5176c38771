//! Turns stock snapshots and recent sales into prioritized reorder
//! suggestions.

use tracing::{debug, instrument};
use validator::Validate;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::models::{Priority, ReorderSuggestion, SaleRecord, StockState};
use crate::services::{demand, round2, validate_window, DEMAND_EPSILON, MAX_DAYS_OF_COVER};

/// Reorder suggestion engine.
///
/// Stateless: every call is a pure function of its inputs and the
/// configured policy constants, so a single instance may be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct ReorderEngine {
    config: EngineConfig,
}

impl ReorderEngine {
    /// Engine with the given policy. Fails if the policy itself is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sizes a reorder for one medicine from its sales window.
    ///
    /// `sales_window` holds the ledger records for
    /// `[now - lookback_days, now]`; the average divides by the window
    /// length, so days without sales pull it down. An empty window is
    /// valid and means zero observed demand.
    #[instrument(skip(self, stock, sales_window), fields(medicine = %stock.medicine_name))]
    pub fn suggest(
        &self,
        stock: &StockState,
        sales_window: &[SaleRecord],
        lookback_days: u32,
        horizon_days: u32,
    ) -> Result<ReorderSuggestion, EngineError> {
        validate_window(lookback_days, horizon_days)?;
        stock.validate()?;

        let profile = demand::profile(sales_window, lookback_days);
        let daily_average = profile.daily_average;
        let current = f64::from(stock.current_stock);

        let projected_demand = daily_average * f64::from(horizon_days);
        let safety_stock = daily_average * self.config.safety_factor;
        let target_stock = projected_demand + safety_stock;
        if !daily_average.is_finite() || !target_stock.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "demand projection for {} is not finite",
                stock.medicine_name
            )));
        }

        let suggested_order_qty = (target_stock - current).ceil().max(0.0) as u32;
        let priority = self.classify(stock, daily_average, target_stock);
        let days_of_cover = if daily_average > 0.0 {
            (current / daily_average.max(DEMAND_EPSILON)).min(MAX_DAYS_OF_COVER)
        } else {
            MAX_DAYS_OF_COVER
        };

        debug!(
            daily_average,
            suggested_order_qty,
            priority = %priority,
            "computed reorder suggestion"
        );

        Ok(ReorderSuggestion {
            medicine_id: stock.medicine_id,
            medicine_name: stock.medicine_name.clone(),
            current_stock: stock.current_stock,
            daily_average: round2(daily_average),
            suggested_order_qty,
            priority,
            reorder_level: stock.reorder_level,
            days_of_cover,
        })
    }

    /// [`suggest`](Self::suggest) with the configured default lookback and
    /// horizon.
    pub fn suggest_with_defaults(
        &self,
        stock: &StockState,
        sales_window: &[SaleRecord],
    ) -> Result<ReorderSuggestion, EngineError> {
        self.suggest(
            stock,
            sales_window,
            self.config.default_lookback_days,
            self.config.default_horizon_days,
        )
    }

    /// Suggestions for a whole inventory, most urgent first: by priority
    /// band, then by fewest days of cover within a band. The sort is
    /// stable, so equally urgent medicines keep their input order.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn suggest_all(
        &self,
        items: &[(StockState, Vec<SaleRecord>)],
        lookback_days: u32,
        horizon_days: u32,
    ) -> Result<Vec<ReorderSuggestion>, EngineError> {
        let mut suggestions = items
            .iter()
            .map(|(stock, window)| self.suggest(stock, window, lookback_days, horizon_days))
            .collect::<Result<Vec<_>, _>>()?;
        suggestions.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.days_of_cover.total_cmp(&b.days_of_cover))
        });
        Ok(suggestions)
    }

    /// Medicines at or below their reorder threshold.
    pub fn low_stock<'a>(&self, stocks: &'a [StockState]) -> Vec<&'a StockState> {
        stocks.iter().filter(|s| s.is_low_stock()).collect()
    }

    fn classify(&self, stock: &StockState, daily_average: f64, target_stock: f64) -> Priority {
        // No demand signal: the reorder threshold is the only input worth
        // trusting.
        if daily_average <= 0.0 {
            return if stock.current_stock <= stock.reorder_level {
                Priority::High
            } else {
                Priority::Low
            };
        }
        let current = f64::from(stock.current_stock);
        if stock.current_stock <= 0
            || current < daily_average * self.config.critical_cover_days
        {
            Priority::Critical
        } else if stock.current_stock <= stock.reorder_level {
            Priority::High
        } else if current < target_stock {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use uuid::Uuid;

    fn engine() -> ReorderEngine {
        ReorderEngine::new(EngineConfig::default()).unwrap()
    }

    fn med(stock: i32, reorder: i32) -> StockState {
        StockState::new(Uuid::new_v4(), "Metformin 850mg", stock, reorder)
    }

    /// Seven daily records summing to `total`, remainder on the last day.
    fn week_of_sales(total: u32) -> Vec<SaleRecord> {
        let base = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let per_day = total / 7;
        let mut window: Vec<SaleRecord> = (0..7)
            .map(|i| SaleRecord::new(base + chrono::Duration::days(i), per_day))
            .collect();
        window[6].quantity += total % 7;
        window
    }

    #[test]
    fn sizes_order_to_cover_horizon_plus_safety_stock() {
        // 70 units / 7 days = 10/day; target = 70 + 15 = 85; on hand 5.
        let suggestion = engine().suggest(&med(5, 10), &week_of_sales(70), 7, 7).unwrap();
        assert_eq!(suggestion.suggested_order_qty, 80);
        assert_eq!(suggestion.priority, Priority::Critical);
        assert!((suggestion.daily_average - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ample_stock_orders_nothing() {
        // 1/day against 100 on hand: target 8.5, already covered.
        let suggestion = engine().suggest(&med(100, 10), &week_of_sales(7), 7, 7).unwrap();
        assert_eq!(suggestion.suggested_order_qty, 0);
        assert_eq!(suggestion.priority, Priority::Low);
    }

    #[rstest]
    #[case(0, 10, Priority::Critical)] // out of stock
    #[case(19, 10, Priority::Critical)] // under two days of cover
    #[case(20, 30, Priority::High)] // at two days but below threshold
    #[case(20, 10, Priority::Medium)] // above threshold, below target (85)
    #[case(85, 10, Priority::Low)] // exactly at target
    fn priority_bands_at_ten_units_per_day(
        #[case] stock: i32,
        #[case] reorder: i32,
        #[case] expected: Priority,
    ) {
        let suggestion = engine()
            .suggest(&med(stock, reorder), &week_of_sales(70), 7, 7)
            .unwrap();
        assert_eq!(suggestion.priority, expected);
    }

    #[test]
    fn empty_window_splits_on_reorder_threshold() {
        let e = engine();
        let below = e.suggest(&med(10, 10), &[], 7, 7).unwrap();
        assert_eq!(below.priority, Priority::High);
        assert_eq!(below.suggested_order_qty, 0);

        let above = e.suggest(&med(11, 10), &[], 7, 7).unwrap();
        assert_eq!(above.priority, Priority::Low);
        assert_eq!(above.suggested_order_qty, 0);
        assert_eq!(above.days_of_cover, 999.0);
    }

    #[test]
    fn zero_stock_with_no_history_is_threshold_only_high() {
        let suggestion = engine().suggest(&med(0, 10), &[], 7, 7).unwrap();
        assert_eq!(suggestion.priority, Priority::High);
    }

    #[rstest]
    #[case(0, 7)]
    #[case(7, 0)]
    fn degenerate_windows_are_rejected(#[case] lookback: u32, #[case] horizon: u32) {
        let err = engine()
            .suggest(&med(5, 10), &week_of_sales(70), lookback, horizon)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = engine().suggest(&med(-1, 10), &[], 7, 7).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn days_of_cover_reflects_observed_rate() {
        let suggestion = engine().suggest(&med(30, 5), &week_of_sales(70), 7, 7).unwrap();
        assert!((suggestion.days_of_cover - 3.0).abs() < 1e-9);
    }

    #[test]
    fn default_window_comes_from_config() {
        // Defaults are 7/7, so this matches the explicit call exactly.
        let e = engine();
        let explicit = e.suggest(&med(5, 10), &week_of_sales(70), 7, 7).unwrap();
        let defaulted = e.suggest_with_defaults(&med(5, 10), &week_of_sales(70)).unwrap();
        assert_eq!(explicit.suggested_order_qty, defaulted.suggested_order_qty);
        assert_eq!(explicit.priority, defaulted.priority);
    }

    #[test]
    fn low_stock_filters_at_threshold() {
        let stocks = vec![med(5, 10), med(10, 10), med(11, 10)];
        let flagged = engine().low_stock(&stocks);
        assert_eq!(flagged.len(), 2);
    }
}
