//! Error types for the analysis crate.
//!
//! Problems with individual records or test groups are not errors: they are
//! reported as [`Diagnostic`](crate::core::diagnostics::Diagnostic) values and
//! aggregation carries on. `Error` covers the cases where there is nothing to
//! aggregate at all.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Results payload is not JSON or has no `results` array
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration is well formed but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested experiment or results file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
