use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A stocked batch of a medicine with its recorded expiry date, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStock {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub stock_qty: i32,
}

/// Where a batch stands relative to its expiry date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Ok,
}

/// A batch that is expired or about to expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub batch_no: Option<String>,
    pub expiry_date: NaiveDate,
    /// Days remaining as of the report date; zero or negative once expired.
    pub days_left: i64,
    pub status: ExpiryStatus,
    pub stock_qty: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirySummary {
    pub expiring_count: usize,
    pub expired_count: usize,
    pub total_at_risk: usize,
}

/// Everything at risk of expiry as of a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryReport {
    pub as_of: NaiveDate,
    /// Batches inside the warning window, soonest expiry first.
    pub expiring_soon: Vec<ExpiryAlert>,
    pub expired: Vec<ExpiryAlert>,
    pub summary: ExpirySummary,
}
