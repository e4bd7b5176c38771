//! Flags batches that are expired or about to expire.

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::models::{BatchStock, ExpiryAlert, ExpiryReport, ExpiryStatus, ExpirySummary};

/// Classifies stocked batches against their expiry dates.
#[derive(Debug, Clone)]
pub struct ExpiryMonitor {
    warning_days: u32,
}

impl ExpiryMonitor {
    pub fn new(warning_days: u32) -> Self {
        Self { warning_days }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.expiry_warning_days)
    }

    /// Where one batch stands as of the given date. Batches without a
    /// recorded expiry date are never flagged.
    pub fn status(&self, batch: &BatchStock, as_of: NaiveDate) -> ExpiryStatus {
        let Some(expiry) = batch.expiry_date else {
            return ExpiryStatus::Ok;
        };
        let days_left = (expiry - as_of).num_days();
        if days_left <= 0 {
            ExpiryStatus::Expired
        } else if days_left <= i64::from(self.warning_days) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Ok
        }
    }

    /// Batches expiring within the warning window, soonest first.
    pub fn expiring_soon(&self, batches: &[BatchStock], as_of: NaiveDate) -> Vec<ExpiryAlert> {
        self.alerts_with_status(batches, as_of, ExpiryStatus::ExpiringSoon)
    }

    /// Batches already past their expiry date, oldest first.
    pub fn expired(&self, batches: &[BatchStock], as_of: NaiveDate) -> Vec<ExpiryAlert> {
        self.alerts_with_status(batches, as_of, ExpiryStatus::Expired)
    }

    /// Full at-risk snapshot: expiring and expired batches plus counts.
    #[instrument(skip(self, batches), fields(count = batches.len()))]
    pub fn report(&self, batches: &[BatchStock], as_of: NaiveDate) -> ExpiryReport {
        let expiring_soon = self.expiring_soon(batches, as_of);
        let expired = self.expired(batches, as_of);
        let summary = ExpirySummary {
            expiring_count: expiring_soon.len(),
            expired_count: expired.len(),
            total_at_risk: expiring_soon.len() + expired.len(),
        };
        info!(
            expiring = summary.expiring_count,
            expired = summary.expired_count,
            "generated expiry report"
        );
        ExpiryReport {
            as_of,
            expiring_soon,
            expired,
            summary,
        }
    }

    fn alerts_with_status(
        &self,
        batches: &[BatchStock],
        as_of: NaiveDate,
        wanted: ExpiryStatus,
    ) -> Vec<ExpiryAlert> {
        let mut alerts: Vec<ExpiryAlert> = batches
            .iter()
            .filter_map(|batch| {
                let expiry = batch.expiry_date?;
                let status = self.status(batch, as_of);
                (status == wanted).then(|| ExpiryAlert {
                    medicine_id: batch.medicine_id,
                    medicine_name: batch.medicine_name.clone(),
                    batch_no: batch.batch_no.clone(),
                    expiry_date: expiry,
                    days_left: (expiry - as_of).num_days(),
                    status,
                    stock_qty: batch.stock_qty,
                })
            })
            .collect();
        alerts.sort_by_key(|alert| alert.expiry_date);
        alerts
    }
}
