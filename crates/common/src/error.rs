//! Error types shared across the harness crates

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by fixtures and masterdata records
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Fixture not found: {name}")]
    FixtureNotFound { name: String },

    #[error("Fixture {name} failed to parse: {reason}")]
    FixtureParse { name: String, reason: String },

    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
