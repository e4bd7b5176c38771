//! PharmaRec Engine Library
//!
//! This crate provides the decision core of a pharmacy inventory system:
//! demand-driven reorder suggestions, per-medicine demand forecasts, and
//! expiry monitoring. It performs no I/O — the sales ledger and inventory
//! store hand data in through plain function calls, and the presentation
//! layer renders whatever comes back.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::{init_tracing, load_config, EngineConfig, EngineConfigError};
pub use errors::EngineError;
pub use models::{
    BatchStock, ExpiryAlert, ExpiryReport, ExpiryStatus, ExpirySummary, Priority,
    ReorderSuggestion, SaleRecord, StockState,
};
pub use services::demand::{DemandProfile, TopSeller};
pub use services::{DemandForecaster, ExpiryMonitor, ForecastMethod, ReorderEngine, ReorderForecast};
