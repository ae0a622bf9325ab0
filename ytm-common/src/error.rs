//! Common error types for the analytics tools

use thiserror::Error;

/// Common result type for analytics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the analytics crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error that prevents the dataset from being read at all
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
