//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Field-office backend API configuration.
    pub api: ApiConfig,
    /// Reconciliation policy configuration.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// Field-office backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many member bundles to fetch concurrently.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_fetch_concurrency() -> usize {
    4
}

/// Reconciliation policy configuration.
///
/// The amount-tolerance constants are heuristics, so they are exposed as
/// configuration rather than baked into the matcher. The defaults are the
/// production values.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Fraction of the expected installment accepted as deviation.
    #[serde(default = "default_tolerance_ratio")]
    pub tolerance_ratio: Decimal,
    /// Minimum absolute deviation accepted, in taka.
    #[serde(default = "default_tolerance_floor")]
    pub tolerance_floor: Decimal,
    /// Calendar-day window around a sheet column that still counts as
    /// belonging to that column.
    #[serde(default = "default_sheet_window_days")]
    pub sheet_window_days: i64,
}

fn default_tolerance_ratio() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

fn default_tolerance_floor() -> Decimal {
    Decimal::from(200)
}

fn default_sheet_window_days() -> i64 {
    3
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tolerance_ratio: default_tolerance_ratio(),
            tolerance_floor: default_tolerance_floor(),
            sheet_window_days: default_sheet_window_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KISTI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
