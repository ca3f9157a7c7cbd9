//! Unified error and result types for `BrixFlow`.
//!
//! The pure distribution core never raises - malformed numeric inputs are
//! clamped to zero there. Errors are reserved for the persistence and
//! configuration layers: query failures, missing scenarios, and invalid
//! entity inputs caught at write time.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// A scenario lookup by name or id returned no rows
    #[error("Scenario not found: {name}")]
    ScenarioNotFound {
        /// Scenario name or id used for the lookup
        name: String,
    },

    /// A monetary or count input failed validation at write time
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization error, e.g. a corrupt stored absorption curve
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
