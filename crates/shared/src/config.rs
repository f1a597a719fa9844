//! Application configuration management.
//!
//! Configuration is passed explicitly into store and service constructors,
//! never read from ambient global state.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// ISO 4217 currency code used for all budget amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Pagination configuration.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Recurring generation configuration.
    #[serde(default)]
    pub recurring: RecurringConfig,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            pagination: PaginationConfig::default(),
            recurring: RecurringConfig::default(),
        }
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not specify one.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    /// Upper bound on page size; larger requests are capped.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_max_per_page() -> u32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

/// Recurring generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurringConfig {
    /// Maximum number of occurrences a single generation may produce.
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: u32,
}

fn default_max_occurrences() -> u32 {
    60
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self {
            max_occurrences: default_max_occurrences(),
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
            .add_source(config::Environment::with_prefix("MANDIRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
