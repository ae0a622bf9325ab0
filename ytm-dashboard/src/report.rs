//! Report generation and formatting
//!
//! Console tables printed while the pipeline runs, the plain-text
//! `INSIGHTS_REPORT.txt`, and the optional JSON summary export.

use crate::analysis::{top_channels_by_views, top_songs, Analysis};
use crate::charts::RenderedChart;
use crate::{BuildInfo, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use ytm_common::human_format::{dotted, format_count, format_grouped, truncate_label};
use ytm_common::stats::Summary;
use ytm_common::LoadedDataset;

/// Report file written into the output directory
pub const REPORT_FILE_NAME: &str = "INSIGHTS_REPORT.txt";

const RULE_WIDTH: usize = 80;

/// Timestamp format used in the report header
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Section heading between two rules, preceded by a blank line
fn banner(title: &str) -> String {
    format!("\n{}\n{}\n{}\n", rule(), title, rule())
}

/// Console tables printed between pipeline stages
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Title banner printed once at startup
    pub fn format_header() -> String {
        format!("{}\nYOUTUBE MUSIC ANALYTICS DASHBOARD\n{}\n", rule(), rule())
    }

    /// Key dataset figures with dotted leaders
    pub fn format_dataset_statistics(analysis: &Analysis) -> String {
        let overview = &analysis.overview;
        let rows = [
            ("Total Songs", format_count(overview.total_songs as u64)),
            ("Total Channels", format_count(overview.unique_channels as u64)),
            (
                "Total Views (Billions)",
                format!("{:.2}B", overview.total_views_in_billions()),
            ),
            ("Average Views per Song", format_grouped(overview.mean_views, 0)),
            ("Median Views per Song", format_grouped(overview.median_views, 0)),
            (
                "Average Duration",
                format!("{:.2} minutes", overview.mean_duration_minutes),
            ),
            ("Most Popular Channel", overview.most_popular_channel.clone()),
        ];

        let mut output = banner("DATASET STATISTICS");
        for (label, value) in rows {
            output.push_str(&format!("{} {}\n", dotted(label, 40), value));
        }
        output
    }

    /// Ranked list of the most viewed songs
    pub fn format_top_songs(dataset: &LoadedDataset, n: usize) -> String {
        let mut output = banner(&format!("TOP {} MOST VIEWED SONGS", n));
        for (idx, song) in top_songs(&dataset.songs, n).into_iter().enumerate() {
            output.push_str(&format!(
                "{:2}. {} {:>15} views\n",
                idx + 1,
                dotted(&truncate_label(&song.title, 50), 55),
                format_count(song.view_count)
            ));
        }
        output
    }

    /// Ranked list of channels by summed views
    pub fn format_top_channels(dataset: &LoadedDataset, n: usize) -> String {
        let mut output = banner(&format!("TOP {} CHANNELS BY TOTAL VIEWS", n));
        for (idx, channel) in top_channels_by_views(&dataset.songs, n)
            .into_iter()
            .enumerate()
        {
            output.push_str(&format!(
                "{:2}. {} {:>18} ({} songs)\n",
                idx + 1,
                dotted(&truncate_label(&channel.channel, 40), 45),
                format_count(channel.total_views),
                channel.song_count
            ));
        }
        output
    }

    /// Distribution, correlation and popularity block
    pub fn format_statistical_analysis(analysis: &Analysis) -> String {
        let distribution = &analysis.distribution;
        let mut output = banner("STATISTICAL ANALYSIS");

        output.push_str("\n📊 View Count Distribution:\n");
        output.push_str(&summary_lines(&distribution.views, true, |v| {
            format_grouped(v, 0)
        }));

        output.push_str("\n⏱️  Duration Distribution (minutes):\n");
        output.push_str(&summary_lines(&distribution.duration_minutes, false, |v| {
            format!("{:.2}", v)
        }));

        output.push_str("\n🔗 Correlation Analysis:\n");
        output.push_str(&format!(
            "   Duration vs Views:            {:>8}\n",
            coefficient(distribution.correlation.duration_vs_views())
        ));
        if let Some(r) = distribution.correlation.followers_vs_views() {
            output.push_str(&format!(
                "   Channel Followers vs Views:   {:>8.4}\n",
                r
            ));
        }

        output.push_str("\n📈 Popularity Categories:\n");
        let popularity = &analysis.popularity;
        for (tier, count) in popularity.tiers() {
            let label = format!("{} ({}):", tier.label(), tier.range_label());
            output.push_str(&format!(
                "   {:<29}{:>8} ({:>5.1}%)\n",
                label,
                format_count(count as u64),
                popularity.percent(count)
            ));
        }
        output
    }

    /// Closing summary after every stage succeeded
    pub fn format_completion(output_dir: &Path, charts: usize) -> String {
        let mut output = format!("\n{}\n✅ ANALYSIS COMPLETED SUCCESSFULLY\n{}\n", rule(), rule());
        output.push_str(&format!(
            "\n📁 Output files saved in '{}' directory:\n",
            output_dir.display()
        ));
        output.push_str(&format!("   • {} visualization charts (PNG format)\n", charts));
        output.push_str("   • 1 insights report (TXT format)\n");
        output.push_str(&format!("{}\n", rule()));
        output
    }
}

fn summary_lines(summary: &Summary, with_quartiles: bool, fmt: impl Fn(f64) -> String) -> String {
    let std_dev = summary.std_dev.map(&fmt).unwrap_or_else(|| "n/a".to_string());
    let mut rows = vec![
        ("Mean:", fmt(summary.mean)),
        ("Median:", fmt(summary.median)),
        ("Std Dev:", std_dev),
        ("Min:", fmt(summary.min)),
        ("Max:", fmt(summary.max)),
    ];
    if with_quartiles {
        rows.push(("25th %ile:", fmt(summary.p25)));
        rows.push(("75th %ile:", fmt(summary.p75)));
    }

    rows.into_iter()
        .map(|(label, value)| format!("   {:<13}{:>15}\n", label, value))
        .collect()
}

fn coefficient(value: Option<f64>) -> String {
    match value {
        Some(r) => format!("{:.4}", r),
        None => "n/a".to_string(),
    }
}

/// The plain-text insights report
#[derive(Debug, Clone)]
pub struct InsightsReport {
    pub generated_at: DateTime<Local>,
    pub dataset: PathBuf,
    text: String,
}

impl InsightsReport {
    /// Build the report, stamped with the current local time
    pub fn new(dataset: &LoadedDataset, analysis: &Analysis) -> Self {
        Self::with_timestamp(dataset, analysis, Local::now())
    }

    /// Build the report with an explicit generation time
    pub fn with_timestamp(
        dataset: &LoadedDataset,
        analysis: &Analysis,
        generated_at: DateTime<Local>,
    ) -> Self {
        let text = render_report(&dataset.source, analysis, &generated_at);
        Self {
            generated_at,
            dataset: dataset.source.clone(),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the report into `output_dir`, returning the file path
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(REPORT_FILE_NAME);
        let mut file = File::create(&path)?;
        file.write_all(self.text.as_bytes())?;
        Ok(path)
    }
}

fn render_report(source: &Path, analysis: &Analysis, generated_at: &DateTime<Local>) -> String {
    let overview = &analysis.overview;
    let popularity = &analysis.popularity;
    let mut lines: Vec<String> = Vec::new();

    lines.push(rule());
    lines.push("YOUTUBE MUSIC ANALYTICS - KEY INSIGHTS REPORT".to_string());
    lines.push(rule());
    lines.push(format!(
        "\nGenerated on: {}",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    lines.push(format!("Dataset: {}", source.display()));
    lines.push(format!("\n{}", rule()));
    lines.push("EXECUTIVE SUMMARY".to_string());
    lines.push(rule());

    lines.push("\n📊 Dataset Overview:".to_string());
    lines.push(format!(
        "   • Total songs analyzed: {}",
        format_count(overview.total_songs as u64)
    ));
    lines.push(format!(
        "   • Unique channels: {}",
        format_count(overview.unique_channels as u64)
    ));
    lines.push(format!(
        "   • Combined views: {:.2} billion",
        overview.total_views_in_billions()
    ));
    lines.push(format!(
        "   • Average views per song: {}",
        format_grouped(overview.mean_views, 0)
    ));

    lines.push("\n🏆 Top Performers:".to_string());
    lines.push(format!("   • Most viewed song: {}", overview.most_viewed_song));
    lines.push(format!(
        "     Views: {}",
        format_count(overview.most_viewed_song_views)
    ));
    lines.push(format!("     Channel: {}", overview.most_viewed_song_channel));
    lines.push(format!("   • Top channel: {}", overview.most_popular_channel));
    lines.push(format!(
        "     Total views: {}",
        format_count(overview.most_popular_channel_views)
    ));

    lines.push("\n💡 Key Insights:".to_string());
    for (i, insight) in analysis.insights.iter().enumerate() {
        lines.push(format!("   {}. {}", i + 1, insight));
    }

    lines.push("\n⏱️  Duration Insights:".to_string());
    lines.push(format!(
        "   • Average song duration: {:.2} minutes",
        overview.mean_duration_minutes
    ));
    lines.push("   • Most common duration range: 3-5 minutes".to_string());
    lines.push(format!(
        "   • Songs under 3 minutes: {} ({:.1}%)",
        format_count(popularity.short_songs as u64),
        popularity.percent(popularity.short_songs)
    ));

    lines.push("\n📈 Popularity Analysis:".to_string());
    lines.push(format!(
        "   • Mega hits (≥1B views): {} songs ({:.1}%)",
        format_count(popularity.mega_hits as u64),
        popularity.percent(popularity.mega_hits)
    ));
    lines.push(format!(
        "   • Popular (100M-1B): {} songs ({:.1}%)",
        format_count(popularity.popular as u64),
        popularity.percent(popularity.popular)
    ));

    lines.push("\n🎯 Recommendations:".to_string());
    for (i, recommendation) in RECOMMENDATIONS.iter().enumerate() {
        lines.push(format!("   {}. {}", i + 1, recommendation));
    }

    lines.push(format!("\n{}", rule()));
    lines.push("END OF REPORT".to_string());
    lines.push(rule());

    lines.join("\n")
}

const RECOMMENDATIONS: [&str; 4] = [
    "Focus on popular channels with proven track records",
    "Optimal song duration appears to be 3-4 minutes",
    "Channel size strongly correlates with video performance",
    "Consistency matters - top channels have multiple hits",
];

/// Machine-readable summary of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,

    /// Build of the dashboard that produced the summary
    pub build: BuildInfo,

    /// Input CSV
    pub dataset: PathBuf,

    /// Rows read before cleaning
    pub total_rows: usize,

    /// Rows dropped during cleaning
    pub removed_rows: usize,

    #[serde(flatten)]
    pub analysis: Analysis,

    /// Charts written this run
    pub charts: Vec<RenderedChart>,
}

impl AnalysisSummary {
    pub fn new(dataset: &LoadedDataset, analysis: &Analysis, charts: &[RenderedChart]) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            build: BuildInfo::current(),
            dataset: dataset.source.clone(),
            total_rows: dataset.total_rows,
            removed_rows: dataset.removed_rows,
            analysis: analysis.clone(),
            charts: charts.to_vec(),
        }
    }

    /// Export summary to a pretty-printed JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn import_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use chrono::TimeZone;
    use ytm_common::SongRecord;

    fn create_test_dataset() -> LoadedDataset {
        let songs = vec![
            SongRecord::new("Despacito", "Luis Fonsi", 8_000_000_000, 282),
            SongRecord::new("Shape of You", "Ed Sheeran", 6_000_000_000, 263)
                .with_followers(55_000_000),
            SongRecord::new("Perfect", "Ed Sheeran", 3_500_000_000, 280)
                .with_followers(55_000_000),
            SongRecord::new("Short One", "Indie Act", 150_000_000, 150),
            SongRecord::new(
                "An extremely long song title that goes well past fifty characters",
                "Indie Act",
                2_000_000,
                200,
            ),
        ];
        LoadedDataset::from_records("songs.csv", songs)
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_dataset_statistics_table() {
        let dataset = create_test_dataset();
        let analysis = Analysis::compute(&dataset).unwrap();

        let formatted = ConsoleFormatter::format_dataset_statistics(&analysis);

        assert!(formatted.contains("DATASET STATISTICS"));
        assert!(formatted.contains("Total Songs............................. 5\n"));
        assert!(formatted.contains("Total Views (Billions).................. 17.65B"));
        assert!(formatted.contains("Most Popular Channel.................... Ed Sheeran"));
    }

    #[test]
    fn test_top_songs_table() {
        let dataset = create_test_dataset();

        let formatted = ConsoleFormatter::format_top_songs(&dataset, 20);

        assert!(formatted.contains("TOP 20 MOST VIEWED SONGS"));
        assert!(formatted.contains(" 1. Despacito....."));
        assert!(formatted.contains("8,000,000,000 views"));
        assert!(formatted.contains("An extremely long song title that goes well past f..."));
        assert_eq!(formatted.matches(" views\n").count(), 5);
    }

    #[test]
    fn test_top_channels_table() {
        let dataset = create_test_dataset();

        let formatted = ConsoleFormatter::format_top_channels(&dataset, 10);

        let first = formatted.find(" 1. Ed Sheeran").unwrap();
        let second = formatted.find(" 2. Luis Fonsi").unwrap();
        assert!(first < second);
        assert!(formatted.contains("9,500,000,000 (2 songs)"));
    }

    #[test]
    fn test_statistical_analysis_block() {
        let dataset = create_test_dataset();
        let analysis = Analysis::compute(&dataset).unwrap();

        let formatted = ConsoleFormatter::format_statistical_analysis(&analysis);

        assert!(formatted.contains("View Count Distribution"));
        assert!(formatted.contains("25th %ile:"));
        assert!(formatted.contains("Duration Distribution (minutes)"));
        assert!(formatted.contains("Duration vs Views:"));
        assert!(formatted.contains("Mega Hits (≥1B views):"));
        assert!(formatted.contains("( 60.0%)"));
        // Only two rows carry followers: no coefficient for them
        assert!(!formatted.contains("Channel Followers vs Views"));
    }

    #[test]
    fn test_insights_report_layout() {
        let dataset = create_test_dataset();
        let analysis = Analysis::compute(&dataset).unwrap();

        let report = InsightsReport::with_timestamp(&dataset, &analysis, fixed_time());
        let text = report.text();

        assert!(text.starts_with(&rule()));
        assert!(text.contains("Generated on: 2025-03-14 09:26:53"));
        assert!(text.contains("Dataset: songs.csv"));
        assert!(text.contains("   • Total songs analyzed: 5"));
        assert!(text.contains("   • Most viewed song: Despacito"));
        assert!(text.contains("     Total views: 9,500,000,000"));
        assert!(text.contains("   1. Dataset contains 5 songs from 3 channels"));
        assert!(text.contains("   • Songs under 3 minutes: 1 (20.0%)"));
        assert!(text.contains("   • Mega hits (≥1B views): 3 songs (60.0%)"));
        assert!(text.contains("   4. Consistency matters - top channels have multiple hits"));
        assert!(text.ends_with(&format!("END OF REPORT\n{}", rule())));

        let summary = text.find("EXECUTIVE SUMMARY").unwrap();
        let insights = text.find("Key Insights").unwrap();
        let recommendations = text.find("Recommendations").unwrap();
        assert!(summary < insights && insights < recommendations);
    }

    #[test]
    fn test_insights_report_write() {
        let dataset = create_test_dataset();
        let analysis = Analysis::compute(&dataset).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let report = InsightsReport::new(&dataset, &analysis);
        let path = report.write_to(dir.path()).unwrap();

        assert_eq!(path, dir.path().join(REPORT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), report.text());
    }

    #[test]
    fn test_json_export_import() {
        let dataset = create_test_dataset();
        let analysis = Analysis::compute(&dataset).unwrap();
        let charts = vec![RenderedChart {
            kind: ChartKind::TopSongs,
            path: PathBuf::from("out/01_top_15_songs.png"),
        }];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let summary = AnalysisSummary::new(&dataset, &analysis, &charts);
        summary.export_json(&path).unwrap();
        let imported = AnalysisSummary::import_json(&path).unwrap();

        assert_eq!(imported.analysis.overview.total_views, analysis.overview.total_views);
        assert_eq!(imported.analysis.popularity, analysis.popularity);
        assert_eq!(imported.analysis.insights, analysis.insights);
        assert_eq!(imported.charts, charts);
        assert_eq!(imported.total_rows, 5);
        assert!(!imported.generated_at.is_empty());
        assert_eq!(imported.build, BuildInfo::current());
    }

    #[test]
    fn test_completion_banner() {
        let formatted = ConsoleFormatter::format_completion(Path::new("analytics_output"), 8);
        assert!(formatted.contains("ANALYSIS COMPLETED SUCCESSFULLY"));
        assert!(formatted.contains("'analytics_output'"));
        assert!(formatted.contains("8 visualization charts"));
    }
}
