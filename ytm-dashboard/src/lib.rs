//! # YouTube Music Analytics Dashboard
//!
//! Loads a CSV of song metadata, computes descriptive statistics, renders a
//! fixed set of PNG charts and writes a plain-text insights report.
//!
//! The [`pipeline::Dashboard`] runner sequences the stages; each stage is a
//! plain function over the borrowed dataset and can be used on its own.

pub mod analysis;
pub mod build_info;
pub mod charts;
pub mod error;
pub mod pipeline;
pub mod report;

pub use build_info::BuildInfo;
pub use error::{Error, Result};
pub use pipeline::{Dashboard, RunOutcome};
