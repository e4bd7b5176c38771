pub mod expiry;
pub mod sale;
pub mod stock;
pub mod suggestion;

pub use expiry::{BatchStock, ExpiryAlert, ExpiryReport, ExpiryStatus, ExpirySummary};
pub use sale::SaleRecord;
pub use stock::StockState;
pub use suggestion::{Priority, ReorderSuggestion};
