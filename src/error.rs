//! Error handling for the capital gains calculator
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for reading operations and evaluating them
#[derive(Error, Debug)]
pub enum CapitalGainsError {
    #[error("parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("unknown operation: {0:?} (expected \"buy\" or \"sell\")")]
    UnknownOperation(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("trade {trade} sells {requested} units but only {held} are held")]
    Oversell {
        trade: usize,
        requested: i64,
        held: i64,
    },

    #[error("trade {trade} ({detail}) leaves the supported numeric range")]
    Overflow { trade: usize, detail: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;
