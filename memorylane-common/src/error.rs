//! Common error types for MemoryLane

use thiserror::Error;

/// Common result type for MemoryLane operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared across MemoryLane crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Album file parsing or validation error
    #[error("Album error: {0}")]
    Album(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Album(e.to_string())
    }
}
