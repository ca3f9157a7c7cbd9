/// Database configuration and connection management
pub mod database;

/// Scenario default assumptions loaded from config.toml
pub mod defaults;
