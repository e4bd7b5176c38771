use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// Default values for configuration
const DEFAULT_SAFETY_FACTOR: f64 = 1.5;
const DEFAULT_CRITICAL_COVER_DAYS: f64 = 2.0;
const DEFAULT_LOOKBACK_DAYS: u32 = 7;
const DEFAULT_HORIZON_DAYS: u32 = 7;
const DEFAULT_EXPIRY_WARNING_DAYS: u32 = 30;
const DEFAULT_BASELINE_MULTIPLIER: u32 = 2;
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "PHARMAREC";

/// Reorder policy knobs with validation.
///
/// Every threshold the engine applies lives here, so deployments can tune
/// them without code changes and tests can exercise boundary values
/// deterministically.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Multiplier on daily demand used to size safety stock.
    #[serde(default = "default_safety_factor")]
    #[validate(range(min = 0.0))]
    pub safety_factor: f64,

    /// Days of cover below which a medicine is classified CRITICAL.
    #[serde(default = "default_critical_cover_days")]
    #[validate(range(min = 0.0))]
    pub critical_cover_days: f64,

    /// Lookback window applied when the caller does not choose one.
    #[serde(default = "default_lookback_days")]
    #[validate(range(min = 1, max = 90))]
    pub default_lookback_days: u32,

    /// Sizing horizon applied when the caller does not choose one.
    #[serde(default = "default_horizon_days")]
    #[validate(range(min = 1, max = 30))]
    pub default_horizon_days: u32,

    /// How far ahead expiry monitoring warns.
    #[serde(default = "default_expiry_warning_days")]
    #[validate(range(min = 1, max = 365))]
    pub expiry_warning_days: u32,

    /// Reorder-level multiple ordered for a medicine with no history.
    #[serde(default = "default_baseline_multiplier")]
    #[validate(range(min = 1))]
    pub baseline_multiplier: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            safety_factor: DEFAULT_SAFETY_FACTOR,
            critical_cover_days: DEFAULT_CRITICAL_COVER_DAYS,
            default_lookback_days: DEFAULT_LOOKBACK_DAYS,
            default_horizon_days: DEFAULT_HORIZON_DAYS,
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            baseline_multiplier: DEFAULT_BASELINE_MULTIPLIER,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

/// Default value functions
fn default_safety_factor() -> f64 {
    DEFAULT_SAFETY_FACTOR
}

fn default_critical_cover_days() -> f64 {
    DEFAULT_CRITICAL_COVER_DAYS
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_expiry_warning_days() -> u32 {
    DEFAULT_EXPIRY_WARNING_DAYS
}

fn default_baseline_multiplier() -> u32 {
    DEFAULT_BASELINE_MULTIPLIER
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum EngineConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Loads configuration from, in order of precedence:
/// 1. Built-in defaults
/// 2. `config/engine.toml` if present
/// 3. Environment variables (`PHARMAREC__*`)
pub fn load_config() -> Result<EngineConfig, EngineConfigError> {
    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let settings = Config::builder()
        .add_source(File::with_name(&format!("{}/engine", CONFIG_DIR)).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let config: EngineConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from an explicit file plus environment overrides.
pub fn load_config_from(path: &Path) -> Result<EngineConfig, EngineConfigError> {
    let settings = Config::builder()
        .add_source(File::from(path))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let config: EngineConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Initializes the global tracing subscriber. Call once at startup;
/// embedding applications may skip it and install their own.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("pharmarec_engine={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter =
        EnvFilter::try_new(filter_directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
            .ok();
    }
}
