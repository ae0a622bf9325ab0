//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; a config file that exists but cannot
//! be parsed is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input CSV, relative to the working directory
pub const DEFAULT_INPUT: &str = "youtube-top-100-songs-2025.csv";

/// Default output directory for charts and the report
pub const DEFAULT_OUTPUT_DIR: &str = "analytics_output";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ytm-dashboard.toml";

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "ytm-dashboard";

pub const ENV_INPUT: &str = "YTM_INPUT";
pub const ENV_OUTPUT_DIR: &str = "YTM_OUTPUT_DIR";
pub const ENV_CONFIG: &str = "YTM_CONFIG";
pub const ENV_LOG_LEVEL: &str = "YTM_LOG_LEVEL";

/// Contents of the TOML config file (all keys optional)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
    pub charts: ChartConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Console table sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows in the "most viewed songs" console table
    pub top_songs: usize,
    /// Rows in the "top channels" console table
    pub top_channels: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_songs: 20,
            top_channels: 10,
        }
    }
}

/// Chart rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum points drawn in scatter plots
    pub scatter_sample_size: usize,
    /// Seed for the scatter sample, so repeated runs draw the same points
    pub sample_seed: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            scatter_sample_size: 2000,
            sample_seed: 42,
        }
    }
}

impl TomlConfig {
    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub analysis: AnalysisConfig,
    pub charts: ChartConfig,
    /// Config file that was read, if any
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Compiled defaults, ignoring environment and config files
    pub fn defaults() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_level: LoggingConfig::default().level,
            analysis: AnalysisConfig::default(),
            charts: ChartConfig::default(),
            config_file: None,
        }
    }
}

/// Resolve configuration from CLI, environment, config file and defaults
pub fn resolve_config(cli: &CliOverrides) -> Result<ResolvedConfig> {
    let (toml_config, config_file) = match locate_config_file(cli.config.as_deref())? {
        Some(path) => (TomlConfig::load(&path)?, Some(path)),
        None => (TomlConfig::default(), None),
    };

    let input = cli
        .input
        .clone()
        .or_else(|| env_path(ENV_INPUT))
        .or(toml_config.input)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| env_path(ENV_OUTPUT_DIR))
        .or(toml_config.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env_string(ENV_LOG_LEVEL))
        .unwrap_or(toml_config.logging.level);

    let resolved = ResolvedConfig {
        input,
        output_dir,
        log_level,
        analysis: toml_config.analysis,
        charts: toml_config.charts,
        config_file,
    };
    validate(&resolved)?;
    Ok(resolved)
}

/// Find the config file to read
///
/// An explicitly requested file (CLI or environment) must exist. Implicit
/// locations are probed and skipped when absent.
fn locate_config_file(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path.map(Path::to_path_buf).or_else(|| env_path(ENV_CONFIG)) {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(user) = default_config_path() {
        if user.exists() {
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// Platform config file path, e.g. `~/.config/ytm-dashboard/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

fn validate(config: &ResolvedConfig) -> Result<()> {
    if config.analysis.top_songs == 0 || config.analysis.top_channels == 0 {
        return Err(Error::Config(
            "analysis.top_songs and analysis.top_channels must be at least 1".to_string(),
        ));
    }
    if config.charts.width < 200 || config.charts.height < 200 {
        return Err(Error::Config(format!(
            "Chart size {}x{} is too small (minimum 200x200)",
            config.charts.width, config.charts.height
        )));
    }
    if config.charts.scatter_sample_size == 0 {
        return Err(Error::Config(
            "charts.scatter_sample_size must be at least 1".to_string(),
        ));
    }
    match config.log_level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(Error::Config(format!("Unknown log level: {}", other))),
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_string(name).map(PathBuf::from)
}
