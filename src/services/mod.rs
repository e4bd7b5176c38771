pub mod demand;
pub mod expiry;
pub mod forecast;
pub mod reorder;

pub use expiry::ExpiryMonitor;
pub use forecast::{DemandForecaster, ForecastMethod, ReorderForecast};
pub use reorder::ReorderEngine;

use crate::errors::EngineError;

/// Cap on the reported stock-out horizon when the window shows no demand.
pub(crate) const MAX_DAYS_OF_COVER: f64 = 999.0;

/// Guard against dividing by a vanishing demand rate when ranking.
pub(crate) const DEMAND_EPSILON: f64 = 1e-9;

pub(crate) fn validate_window(lookback_days: u32, horizon_days: u32) -> Result<(), EngineError> {
    if lookback_days < 1 {
        return Err(EngineError::InvalidInput(
            "lookback_days must be at least 1".to_string(),
        ));
    }
    if horizon_days < 1 {
        return Err(EngineError::InvalidInput(
            "horizon_days must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
