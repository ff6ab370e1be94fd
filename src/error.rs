//! Error types for telewatch.

use thiserror::Error;

/// Common error type for telewatch.
#[derive(Error, Debug)]
pub enum TelewatchError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Feed-layer setup error (e.g. HTTP client construction).
    ///
    /// Per-fetch failures are not represented here; they are
    /// [`FetchError`](crate::feed::FetchError) values consumed by the
    /// polling loop.
    #[error("feed error: {0}")]
    Feed(String),
}

/// Result type alias for telewatch operations.
pub type Result<T> = std::result::Result<T, TelewatchError>;
