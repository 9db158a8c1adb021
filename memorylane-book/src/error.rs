//! Error types for memorylane-book
//!
//! Module-specific error types using thiserror for clear error
//! propagation. Navigation itself never produces errors; these cover the
//! service edges (startup, HTTP, content loading).

use thiserror::Error;

/// Main error type for the memorylane-book module
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Album content errors
    #[error("Album error: {0}")]
    Album(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the shared library
    #[error(transparent)]
    Common(#[from] memorylane_common::Error),
}

/// Convenience Result type using memorylane-book Error
pub type Result<T> = std::result::Result<T, Error>;
