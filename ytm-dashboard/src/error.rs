//! Error types for ytm-dashboard

use thiserror::Error;

/// Main error type for the dashboard pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Loading, configuration or other shared-library errors
    #[error(transparent)]
    Common(#[from] ytm_common::Error),

    /// Chart drawing or PNG encoding failed
    #[error("Chart error ({chart}): {message}")]
    Chart { chart: String, message: String },

    /// File I/O errors (output directory, report file)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON summary export failed
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing left to analyze after cleaning
    #[error("Dataset is empty after cleaning: {0}")]
    EmptyDataset(String),
}

impl Error {
    /// Wrap a plotting backend error with the chart it came from
    pub fn chart(chart: &str, err: impl std::fmt::Display) -> Self {
        Error::Chart {
            chart: chart.to_string(),
            message: err.to_string(),
        }
    }
}

/// Convenience Result type using the dashboard Error
pub type Result<T> = std::result::Result<T, Error>;
