//! # YTM Common Library
//!
//! Shared code for the YouTube music analytics tools including:
//! - Song record model and CSV loading/cleaning
//! - Descriptive statistics (mean, median, quantiles, correlation, binning)
//! - Configuration loading
//! - Human-readable number formatting

pub mod config;
pub mod dataset;
pub mod error;
pub mod human_format;
pub mod stats;

pub use dataset::{load_songs, LoadedDataset, SongRecord};
pub use error::{Error, Result};
