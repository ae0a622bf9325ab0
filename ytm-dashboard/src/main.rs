//! ytm-dashboard - YouTube Music analytics from a CSV export
//!
//! **Usage:**
//! ```bash
//! ytm-dashboard [--input <CSV>] [--output-dir <DIR>] [--config <TOML>] [--export-json <FILE>]
//! ```
//!
//! With no arguments, analyzes `youtube-top-100-songs-2025.csv` in the current
//! directory and writes charts plus `INSIGHTS_REPORT.txt` to `analytics_output/`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info};
use ytm_common::config::{resolve_config, CliOverrides};
use ytm_dashboard::{BuildInfo, Dashboard};

/// YouTube Music analytics dashboard
#[derive(Parser, Debug)]
#[clap(name = "ytm-dashboard")]
#[clap(version, about = "Analyze a YouTube music CSV and render charts plus an insights report")]
struct Args {
    /// Input CSV file
    #[clap(long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Directory for charts and the report
    #[clap(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[clap(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Export the analysis summary to a JSON file
    #[clap(long, value_name = "FILE")]
    export_json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = CliOverrides {
        input: args.input,
        output_dir: args.output_dir,
        config: args.config,
        log_level: args.log_level,
    };
    // Resolved before tracing exists so the configured level can apply
    let config = resolve_config(&overrides).context("Failed to resolve configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting YouTube Music Analytics Dashboard {}",
        BuildInfo::current()
    );
    match &config.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    info!("Input: {}", config.input.display());
    info!("Output directory: {}", config.output_dir.display());

    let mut dashboard = Dashboard::new(config);
    if let Some(path) = args.export_json {
        dashboard = dashboard.with_json_export(path);
    }

    if let Err(e) = dashboard.run() {
        error!("Error during analysis: {}", e);
        return Err(e).with_context(|| {
            format!(
                "Analysis of {} failed",
                dashboard.config().input.display()
            )
        });
    }

    Ok(())
}
