//! Scenario default assumptions loaded from config.toml.
//!
//! New scenarios are seeded with these values. The file is optional: when it
//! is missing the built-in defaults are used, so a fresh checkout runs without
//! any configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Default assumptions applied to newly created scenarios
    #[serde(default)]
    pub scenario_defaults: ScenarioDefaults,
}

/// Default assumptions for a newly created scenario
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScenarioDefaults {
    /// Month offset at which sales begin
    pub sales_start_offset: i32,
    /// Nominal sales window length in months
    pub sales_duration_months: i32,
    /// Month offset at which units are delivered
    pub delivery_start_offset: i32,
    /// Linear absorption rate, percent of generic inventory per month
    pub absorption_rate_monthly: f64,
    /// Initial deposit percent of each sale
    pub deposit_initial: f64,
    /// Progress payment percent of each sale
    pub deposit_progress: f64,
    /// Closing/financing percent of each sale
    pub deposit_closing: f64,
    /// Sales commission percent of revenue
    pub commission_rate: f64,
    /// Marketing budget percent of revenue
    pub marketing_cost_percent: f64,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            sales_start_offset: 0,
            sales_duration_months: 24,
            delivery_start_offset: 24,
            absorption_rate_monthly: 0.0,
            deposit_initial: 10.0,
            deposit_progress: 10.0,
            deposit_closing: 80.0,
            commission_rate: 6.0,
            marketing_cost_percent: 2.0,
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the given path, falling back to built-in defaults
/// when the file does not exist. Parse errors in an existing file still fail.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::info!("No config.toml found, using built-in scenario defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_scenario_defaults() {
        let toml_str = r"
            [scenario_defaults]
            sales_start_offset = 2
            sales_duration_months = 18
            delivery_start_offset = 20
            absorption_rate_monthly = 8.5
            deposit_initial = 15.0
            deposit_progress = 25.0
            deposit_closing = 60.0
            commission_rate = 5.0
            marketing_cost_percent = 1.5
        ";

        let config: Config = toml::from_str(toml_str).unwrap();
        let d = config.scenario_defaults;
        assert_eq!(d.sales_start_offset, 2);
        assert_eq!(d.delivery_start_offset, 20);
        assert_eq!(d.absorption_rate_monthly, 8.5);
        assert_eq!(d.deposit_closing, 60.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let toml_str = r"
            [scenario_defaults]
            absorption_rate_monthly = 10.0
        ";

        let config: Config = toml::from_str(toml_str).unwrap();
        let d = config.scenario_defaults;
        assert_eq!(d.absorption_rate_monthly, 10.0);
        // Untouched fields fall back to the built-in defaults
        assert_eq!(d.delivery_start_offset, 24);
        assert_eq!(d.deposit_initial, 10.0);
        assert_eq!(d.deposit_closing, 80.0);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        let d = config.scenario_defaults;
        assert_eq!(d.sales_duration_months, 24);
        assert_eq!(d.commission_rate, 6.0);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_or_default("does-not-exist.toml").unwrap();
        assert_eq!(config.scenario_defaults.deposit_progress, 10.0);
    }
}
