use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Units of one medicine sold on a calendar day, as recorded by the sales
/// ledger. Records are historical facts: the engine reads them, never
/// mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub quantity: u32,
}

impl SaleRecord {
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self { date, quantity }
    }
}
