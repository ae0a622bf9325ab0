//! Dashboard runner
//!
//! Sequences the six stages over one borrowed dataset:
//! load & clean, exploratory analysis, statistical analysis, charts,
//! insights report, completion. Any stage failure aborts the run.

use crate::analysis::Analysis;
use crate::charts::{ChartRenderer, RenderedChart};
use crate::report::{AnalysisSummary, ConsoleFormatter, InsightsReport};
use crate::Result;
use std::path::PathBuf;
use tracing::info;
use ytm_common::config::ResolvedConfig;
use ytm_common::load_songs;

/// Number of progress stages reported as `[n/6]`
pub const STAGES: usize = 6;

/// Files produced by a successful run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: Analysis,
    pub charts: Vec<RenderedChart>,
    pub report_path: PathBuf,
    /// JSON summary, when one was requested
    pub summary_path: Option<PathBuf>,
}

/// Runs the full analysis for one resolved configuration
pub struct Dashboard {
    config: ResolvedConfig,
    export_json: Option<PathBuf>,
}

impl Dashboard {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            export_json: None,
        }
    }

    /// Also write a JSON summary to `path`
    pub fn with_json_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_json = Some(path.into());
        self
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunOutcome> {
        let config = &self.config;
        println!("{}", ConsoleFormatter::format_header());

        stage(1, "Loading and cleaning data...");
        let dataset = load_songs(&config.input)?;
        info!("✓ Data cleaning completed");

        stage(2, "Performing Exploratory Data Analysis...");
        let analysis = Analysis::compute(&dataset)?;
        println!("{}", ConsoleFormatter::format_dataset_statistics(&analysis));
        println!(
            "{}",
            ConsoleFormatter::format_top_songs(&dataset, config.analysis.top_songs)
        );
        println!(
            "{}",
            ConsoleFormatter::format_top_channels(&dataset, config.analysis.top_channels)
        );
        info!("✓ EDA completed");

        stage(3, "Performing Statistical Analysis...");
        println!("{}", ConsoleFormatter::format_statistical_analysis(&analysis));
        info!("✓ Statistical analysis completed");

        stage(4, "Creating Visualizations...");
        std::fs::create_dir_all(&config.output_dir)?;
        let charts = ChartRenderer::new(&config.output_dir, config.charts)
            .render_all(&dataset, &analysis)?;
        info!(
            "✓ All {} visualizations saved to '{}'",
            charts.len(),
            config.output_dir.display()
        );

        stage(5, "Generating Insights Report...");
        let report = InsightsReport::new(&dataset, &analysis);
        let report_path = report.write_to(&config.output_dir)?;
        println!("\n{}\n", report.text());
        info!("✓ Report saved to '{}'", report_path.display());

        let summary_path = match &self.export_json {
            Some(path) => {
                AnalysisSummary::new(&dataset, &analysis, &charts).export_json(path)?;
                info!("✓ Summary exported to '{}'", path.display());
                Some(path.clone())
            }
            None => None,
        };

        stage(6, "Analysis Complete!");
        println!(
            "{}",
            ConsoleFormatter::format_completion(&config.output_dir, charts.len())
        );

        Ok(RunOutcome {
            analysis,
            charts,
            report_path,
            summary_path,
        })
    }
}

fn stage(n: usize, description: &str) {
    info!("[{}/{}] {}", n, STAGES, description);
}
