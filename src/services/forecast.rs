//! Per-medicine demand forecasting with explicit confidence grading and a
//! threshold-based fallback for medicines with no sales history.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::models::{SaleRecord, StockState};
use crate::services::{demand, round2, validate_window, MAX_DAYS_OF_COVER};

/// How a forecast was produced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ForecastMethod {
    /// Moving average over the lookback window.
    MovingAverage,
    /// No sales history; threshold-derived fallback.
    Baseline,
}

/// Demand projection for one medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderForecast {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub method: ForecastMethod,
    pub current_stock: i32,
    pub daily_average: f64,
    pub projected_demand: f64,
    pub safety_stock: f64,
    pub suggested_order_qty: u32,
    /// 0.0..=1.0, graded by how much history backs the estimate.
    pub confidence: f64,
    pub days_of_cover: f64,
}

/// Produces reorder forecasts.
///
/// Unlike [`ReorderEngine::suggest`](crate::ReorderEngine::suggest), a
/// medicine with no history at all gets a baseline order sized from its
/// reorder threshold rather than an empty suggestion, flagged with low
/// confidence for manual review.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    config: EngineConfig,
}

impl DemandForecaster {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[instrument(skip(self, stock, sales_window), fields(medicine = %stock.medicine_name))]
    pub fn forecast(
        &self,
        stock: &StockState,
        sales_window: &[SaleRecord],
        lookback_days: u32,
        horizon_days: u32,
    ) -> Result<ReorderForecast, EngineError> {
        validate_window(lookback_days, horizon_days)?;
        stock.validate()?;

        if sales_window.is_empty() {
            return Ok(self.baseline(stock));
        }

        let profile = demand::profile(sales_window, lookback_days);
        let daily_average = profile.daily_average;
        let current = f64::from(stock.current_stock);

        let projected_demand = daily_average * f64::from(horizon_days);
        let safety_stock = daily_average * self.config.safety_factor;
        let target_stock = projected_demand + safety_stock;
        if !target_stock.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "demand projection for {} is not finite",
                stock.medicine_name
            )));
        }

        let suggested_order_qty = (target_stock - current).ceil().max(0.0) as u32;
        let days_of_cover = if daily_average > 0.0 {
            (current / daily_average).min(MAX_DAYS_OF_COVER)
        } else {
            MAX_DAYS_OF_COVER
        };

        debug!(
            daily_average,
            suggested_order_qty,
            samples = profile.sample_count,
            "computed moving-average forecast"
        );

        Ok(ReorderForecast {
            medicine_id: stock.medicine_id,
            medicine_name: stock.medicine_name.clone(),
            method: ForecastMethod::MovingAverage,
            current_stock: stock.current_stock,
            daily_average: round2(daily_average),
            projected_demand: round2(projected_demand),
            safety_stock: round2(safety_stock),
            suggested_order_qty,
            confidence: demand::confidence(profile.sample_count),
            days_of_cover,
        })
    }

    /// Nothing to project from: order enough to sit comfortably above the
    /// configured threshold and flag the result for manual review.
    fn baseline(&self, stock: &StockState) -> ReorderForecast {
        let fallback =
            (stock.reorder_level.max(0) as u32).saturating_mul(self.config.baseline_multiplier);
        ReorderForecast {
            medicine_id: stock.medicine_id,
            medicine_name: stock.medicine_name.clone(),
            method: ForecastMethod::Baseline,
            current_stock: stock.current_stock,
            daily_average: 0.0,
            projected_demand: 0.0,
            safety_stock: 0.0,
            suggested_order_qty: fallback,
            confidence: demand::confidence(0),
            days_of_cover: MAX_DAYS_OF_COVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn forecaster() -> DemandForecaster {
        DemandForecaster::new(EngineConfig::default()).unwrap()
    }

    fn med(stock: i32, reorder: i32) -> StockState {
        StockState::new(Uuid::new_v4(), "Omeprazole 20mg", stock, reorder)
    }

    fn daily_sales(quantities: &[u32]) -> Vec<SaleRecord> {
        let base = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| SaleRecord::new(base + chrono::Duration::days(i as i64), q))
            .collect()
    }

    #[test]
    fn moving_average_forecast_matches_suggestion_math() {
        let window = daily_sales(&[10, 10, 10, 10, 10, 10, 10]);
        let forecast = forecaster().forecast(&med(5, 10), &window, 7, 7).unwrap();
        assert_eq!(forecast.method, ForecastMethod::MovingAverage);
        assert!((forecast.daily_average - 10.0).abs() < f64::EPSILON);
        assert!((forecast.projected_demand - 70.0).abs() < f64::EPSILON);
        assert!((forecast.safety_stock - 15.0).abs() < f64::EPSILON);
        assert_eq!(forecast.suggested_order_qty, 80);
        assert_eq!(forecast.confidence, 0.4);
    }

    #[test]
    fn deep_history_raises_confidence() {
        let window = daily_sales(&[2; 30]);
        let forecast = forecaster().forecast(&med(50, 10), &window, 30, 7).unwrap();
        assert_eq!(forecast.confidence, 0.8);
    }

    #[test]
    fn empty_history_falls_back_to_threshold_baseline() {
        let forecast = forecaster().forecast(&med(3, 10), &[], 7, 7).unwrap();
        assert_eq!(forecast.method, ForecastMethod::Baseline);
        assert_eq!(forecast.suggested_order_qty, 20);
        assert_eq!(forecast.confidence, 0.2);
        assert_eq!(forecast.projected_demand, 0.0);
    }

    #[test]
    fn method_serializes_in_snake_case() {
        let json = serde_json::to_string(&ForecastMethod::MovingAverage).unwrap();
        assert_eq!(json, "\"moving_average\"");
        assert_eq!(ForecastMethod::Baseline.to_string(), "baseline");
    }
}
