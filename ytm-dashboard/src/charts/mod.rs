//! # Chart Rendering
//!
//! Renders the fixed chart set to PNG files using [`plotters`]' bitmap backend.
//! Chart data is prepared from the dataset and [`Analysis`] first (the
//! `*_data` functions, testable without a font stack), then handed to one of
//! the drawing primitives in the submodules.
//!
//! Every chart declared by [`planned_charts`] is written exactly once per run.

pub mod bar;
pub mod heatmap;
pub mod histogram;
pub mod pie;
pub mod scatter;

use crate::analysis::{
    top_channels_by_count, top_channels_by_views, top_songs, Analysis, PopularityTier,
    CORRELATION_COLUMNS,
};
use crate::Result;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentedCoord};
use plotters::coord::types::RangedCoordi32;
use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use ytm_common::config::ChartConfig;
use ytm_common::human_format::{format_count, truncate_label};
use ytm_common::stats::{self, HistogramBin};
use ytm_common::{LoadedDataset, SongRecord};

/// The followers chart needs more than this many rows with a follower count
pub const FOLLOWERS_CHART_MIN_ROWS: usize = 100;

/// Bars in the top songs chart
pub const TOP_SONGS_CHART: usize = 15;

/// Bars in each top channels chart
pub const TOP_CHANNELS_CHART: usize = 10;

pub const VIEW_HISTOGRAM_BINS: usize = 50;
pub const DURATION_HISTOGRAM_BINS: usize = 60;

/// Caption font for every chart
pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 36);
/// Axis description font
pub(crate) const AXIS_FONT: (&str, u32) = ("sans-serif", 24);
/// Tick label font
pub(crate) const LABEL_FONT: (&str, u32) = ("sans-serif", 18);

/// One chart of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    TopSongs,
    TopChannels,
    ViewDistribution,
    DurationVsViews,
    DurationDistribution,
    FollowersVsViews,
    PopularityDistribution,
    TopChannelsByCount,
    CorrelationHeatmap,
}

impl ChartKind {
    /// Every chart, in output order
    pub const ALL: [ChartKind; 9] = [
        ChartKind::TopSongs,
        ChartKind::TopChannels,
        ChartKind::ViewDistribution,
        ChartKind::DurationVsViews,
        ChartKind::DurationDistribution,
        ChartKind::FollowersVsViews,
        ChartKind::PopularityDistribution,
        ChartKind::TopChannelsByCount,
        ChartKind::CorrelationHeatmap,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::TopSongs => "01_top_15_songs.png",
            ChartKind::TopChannels => "02_top_10_channels.png",
            ChartKind::ViewDistribution => "03_view_distribution.png",
            ChartKind::DurationVsViews => "04_duration_vs_views.png",
            ChartKind::DurationDistribution => "05_duration_distribution.png",
            ChartKind::FollowersVsViews => "06_followers_vs_views.png",
            ChartKind::PopularityDistribution => "07_popularity_distribution.png",
            ChartKind::TopChannelsByCount => "08_top_channels_by_count.png",
            ChartKind::CorrelationHeatmap => "09_correlation_heatmap.png",
        }
    }

    /// Short description used in progress output
    pub fn description(&self) -> &'static str {
        match self {
            ChartKind::TopSongs => "Top 15 Most Viewed Songs",
            ChartKind::TopChannels => "Top 10 Channels",
            ChartKind::ViewDistribution => "View Count Distribution",
            ChartKind::DurationVsViews => "Duration vs Views",
            ChartKind::DurationDistribution => "Duration Distribution",
            ChartKind::FollowersVsViews => "Followers vs Views",
            ChartKind::PopularityDistribution => "Popularity Distribution",
            ChartKind::TopChannelsByCount => "Top Channels by Song Count",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::TopSongs => "Top 15 Most Viewed Songs on YouTube",
            ChartKind::TopChannels => "Top 10 Channels by Total Views",
            ChartKind::ViewDistribution => "Distribution of Video Views",
            ChartKind::DurationVsViews => "Song Duration vs View Count",
            ChartKind::DurationDistribution => "Distribution of Song Durations",
            ChartKind::FollowersVsViews => "Channel Followers vs Video Views",
            ChartKind::PopularityDistribution => "Song Popularity Distribution",
            ChartKind::TopChannelsByCount => "Top 10 Channels by Number of Songs",
            ChartKind::CorrelationHeatmap => "Correlation Matrix: Views, Duration & Followers",
        }
    }
}

/// A chart written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub path: PathBuf,
}

/// Charts declared for this dataset, in output order
///
/// The followers chart is only declared when more than
/// [`FOLLOWERS_CHART_MIN_ROWS`] songs carry a follower count.
pub fn planned_charts(songs: &[SongRecord]) -> Vec<ChartKind> {
    let with_followers = songs
        .iter()
        .filter(|s| s.channel_follower_count.is_some())
        .count();

    ChartKind::ALL
        .into_iter()
        .filter(|kind| {
            *kind != ChartKind::FollowersVsViews || with_followers > FOLLOWERS_CHART_MIN_ROWS
        })
        .collect()
}

/// Pick `min(sample_size, len)` distinct indices with a seeded RNG, ascending
pub fn sample_indices(len: usize, sample_size: usize, seed: u64) -> Vec<usize> {
    if sample_size >= len {
        return (0..len).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices = rand::seq::index::sample(&mut rng, len, sample_size).into_vec();
    indices.sort_unstable();
    indices
}

/// Labels and views (billions) for the top songs bar chart, largest first
pub fn top_songs_data(songs: &[SongRecord]) -> (Vec<String>, Vec<f64>) {
    top_songs(songs, TOP_SONGS_CHART)
        .into_iter()
        .map(|s| (truncate_label(&s.title, 40), s.views_in_billions()))
        .unzip()
}

/// Labels and summed views (billions) for the top channels bar chart
pub fn top_channels_data(songs: &[SongRecord]) -> (Vec<String>, Vec<f64>) {
    top_channels_by_views(songs, TOP_CHANNELS_CHART)
        .into_iter()
        .map(|c| (truncate_label(&c.channel, 35), c.views_in_billions()))
        .unzip()
}

/// Labels and song counts for the channels-by-count bar chart
pub fn channel_counts_data(songs: &[SongRecord]) -> (Vec<String>, Vec<f64>) {
    top_channels_by_count(songs, TOP_CHANNELS_CHART)
        .into_iter()
        .map(|c| (truncate_label(&c.channel, 35), c.song_count as f64))
        .unzip()
}

pub fn view_histogram_data(songs: &[SongRecord]) -> Vec<HistogramBin> {
    let millions: Vec<f64> = songs.iter().map(SongRecord::views_in_millions).collect();
    stats::histogram(&millions, VIEW_HISTOGRAM_BINS)
}

pub fn duration_histogram_data(songs: &[SongRecord]) -> Vec<HistogramBin> {
    let minutes: Vec<f64> = songs.iter().map(SongRecord::duration_minutes).collect();
    stats::histogram(&minutes, DURATION_HISTOGRAM_BINS)
}

/// Sampled (duration minutes, views millions) points
pub fn duration_vs_views_data(songs: &[SongRecord], config: &ChartConfig) -> Vec<(f64, f64)> {
    sample_indices(songs.len(), config.scatter_sample_size, config.sample_seed)
        .into_iter()
        .map(|i| (songs[i].duration_minutes(), songs[i].views_in_millions()))
        .collect()
}

/// Sampled (followers millions, views millions) points over rows with followers
pub fn followers_vs_views_data(songs: &[SongRecord], config: &ChartConfig) -> Vec<(f64, f64)> {
    let with_followers: Vec<(f64, f64)> = songs
        .iter()
        .filter_map(|s| s.followers_in_millions().map(|f| (f, s.views_in_millions())))
        .collect();

    sample_indices(with_followers.len(), config.scatter_sample_size, config.sample_seed)
        .into_iter()
        .map(|i| with_followers[i])
        .collect()
}

/// Pie slices for the popularity tiers
pub fn popularity_slices(analysis: &Analysis) -> Vec<pie::PieSlice> {
    const COLORS: [RGBColor; 3] = [
        RGBColor(0xFF, 0x6B, 0x6B),
        RGBColor(0x4E, 0xCD, 0xC4),
        RGBColor(0x95, 0xE1, 0xD3),
    ];
    const EXPLODE: [f64; 3] = [0.1, 0.05, 0.0];

    analysis
        .popularity
        .tiers()
        .into_iter()
        .enumerate()
        .map(|(i, (tier, count)): (usize, (PopularityTier, usize))| pie::PieSlice {
            label_lines: vec![
                tier.label().to_string(),
                format!("({})", tier.range_label()),
                format!("{} songs", format_count(count as u64)),
            ],
            value: count as f64,
            color: COLORS[i],
            explode: EXPLODE[i],
        })
        .collect()
}

/// Renders charts into one output directory
pub struct ChartRenderer<'a> {
    output_dir: &'a Path,
    config: ChartConfig,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(output_dir: &'a Path, config: ChartConfig) -> Self {
        Self { output_dir, config }
    }

    /// Render every planned chart, logging progress as each one is written
    pub fn render_all(
        &self,
        dataset: &LoadedDataset,
        analysis: &Analysis,
    ) -> Result<Vec<RenderedChart>> {
        let plan = planned_charts(&dataset.songs);
        let mut rendered = Vec::with_capacity(plan.len());

        for kind in plan {
            let chart = self.render(kind, dataset, analysis)?;
            rendered.push(chart);
            info!(
                "✓ Created visualization {}: {}",
                rendered.len(),
                kind.description()
            );
        }

        Ok(rendered)
    }

    /// Render a single chart
    pub fn render(
        &self,
        kind: ChartKind,
        dataset: &LoadedDataset,
        analysis: &Analysis,
    ) -> Result<RenderedChart> {
        let songs = &dataset.songs;
        let path = self.output_dir.join(kind.file_name());
        let size = (self.config.width, self.config.height);

        match kind {
            ChartKind::TopSongs => {
                let (labels, values) = top_songs_data(songs);
                bar::horizontal_bar_chart(
                    &path,
                    size,
                    kind.title(),
                    "Views (Billions)",
                    &labels,
                    &values,
                    RGBColor(0xFF, 0x00, 0x00),
                )?;
            }
            ChartKind::TopChannels => {
                let (labels, values) = top_channels_data(songs);
                bar::horizontal_bar_chart(
                    &path,
                    size,
                    kind.title(),
                    "Total Views (Billions)",
                    &labels,
                    &values,
                    RGBColor(0x1D, 0xB9, 0x54),
                )?;
            }
            ChartKind::ViewDistribution => {
                histogram::histogram_chart(
                    &path,
                    size,
                    kind.title(),
                    "Views (Millions)",
                    &view_histogram_data(songs),
                    RGBColor(0x42, 0x85, 0xF4),
                    &[],
                )?;
            }
            ChartKind::DurationVsViews => {
                let points = duration_vs_views_data(songs, &self.config);
                let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
                scatter::scatter_chart(
                    &path,
                    size,
                    kind.title(),
                    ("Duration (Minutes)", "Views (Millions)"),
                    &points,
                    RGBColor(0xFF, 0x6B, 0x6B),
                    stats::linear_fit(&xs, &ys),
                )?;
            }
            ChartKind::DurationDistribution => {
                let minutes = &analysis.distribution.duration_minutes;
                let markers = [
                    histogram::Marker {
                        value: minutes.mean,
                        label: format!("Mean: {:.2} min", minutes.mean),
                        color: RGBColor(0xFF, 0x00, 0x00),
                    },
                    histogram::Marker {
                        value: minutes.median,
                        label: format!("Median: {:.2} min", minutes.median),
                        color: RGBColor(0x00, 0x80, 0x00),
                    },
                ];
                histogram::histogram_chart(
                    &path,
                    size,
                    kind.title(),
                    "Duration (Minutes)",
                    &duration_histogram_data(songs),
                    RGBColor(0x9C, 0x27, 0xB0),
                    &markers,
                )?;
            }
            ChartKind::FollowersVsViews => {
                scatter::scatter_chart(
                    &path,
                    size,
                    kind.title(),
                    ("Channel Followers (Millions)", "Video Views (Millions)"),
                    &followers_vs_views_data(songs, &self.config),
                    RGBColor(0xFF, 0xA7, 0x26),
                    None,
                )?;
            }
            ChartKind::PopularityDistribution => {
                let side = self.config.width.min(self.config.height);
                pie::pie_chart(&path, (side, side), kind.title(), &popularity_slices(analysis))?;
            }
            ChartKind::TopChannelsByCount => {
                let (labels, values) = channel_counts_data(songs);
                bar::horizontal_bar_chart(
                    &path,
                    size,
                    kind.title(),
                    "Number of Songs",
                    &labels,
                    &values,
                    RGBColor(0x00, 0xBC, 0xD4),
                )?;
            }
            ChartKind::CorrelationHeatmap => {
                let side = self.config.width.min(self.config.height);
                heatmap::heatmap_chart(
                    &path,
                    (side, side),
                    kind.title(),
                    &CORRELATION_COLUMNS,
                    &analysis.distribution.correlation.values,
                )?;
            }
        }

        Ok(RenderedChart { kind, path })
    }
}

/// Segmented axis with one slot per row, `0..count`
///
/// The segmented coordinate covers its range inclusively, so `count` slots
/// need the range `0..count - 1`. A single row gets a spare second slot, since
/// a zero-width range has no scale.
pub(crate) fn slot_axis(count: usize) -> SegmentedCoord<RangedCoordi32> {
    let last = (count.max(2) - 1) as i32;
    (0..last).into_segmented()
}

/// File name used to tag chart errors
pub(crate) fn chart_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs_with_followers(n: usize, with_followers: usize) -> Vec<SongRecord> {
        (0..n)
            .map(|i| {
                let song = SongRecord::new(
                    &format!("Song {}", i),
                    &format!("Channel {}", i % 7),
                    (i as u64 + 1) * 10_000_000,
                    120 + i as u64,
                );
                if i < with_followers {
                    song.with_followers(1_000_000 + i as u64)
                } else {
                    song
                }
            })
            .collect()
    }

    #[test]
    fn test_slot_axis_has_one_segment_per_row() {
        use plotters::coord::ranged1d::DiscreteRanged;

        assert_eq!(slot_axis(TOP_SONGS_CHART).size(), 15);
        assert_eq!(slot_axis(TOP_CHANNELS_CHART).size(), 10);
        assert_eq!(slot_axis(CORRELATION_COLUMNS.len()).size(), 3);
        assert_eq!(slot_axis(1).size(), 2);
    }

    #[test]
    fn test_file_names_unique() {
        let mut names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ChartKind::ALL.len());
    }

    #[test]
    fn test_followers_chart_requires_more_than_100_rows() {
        let plan = planned_charts(&songs_with_followers(150, 100));
        assert_eq!(plan.len(), 8);
        assert!(!plan.contains(&ChartKind::FollowersVsViews));

        let plan = planned_charts(&songs_with_followers(150, 101));
        assert_eq!(plan, ChartKind::ALL.to_vec());
    }

    #[test]
    fn test_sample_indices() {
        assert_eq!(sample_indices(5, 10, 42), vec![0, 1, 2, 3, 4]);

        let sample = sample_indices(5000, 2000, 42);
        assert_eq!(sample.len(), 2000);
        assert!(sample.windows(2).all(|w| w[0] < w[1]));
        assert!(sample.iter().all(|&i| i < 5000));
        // Seeded: repeatable
        assert_eq!(sample, sample_indices(5000, 2000, 42));
    }

    #[test]
    fn test_top_songs_data_sorted_and_truncated() {
        let mut songs = songs_with_followers(20, 0);
        songs[3].title = "A very long song title that keeps going and going".to_string();
        songs[3].view_count = 9_000_000_000;

        let (labels, values) = top_songs_data(&songs);

        assert_eq!(labels.len(), TOP_SONGS_CHART);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(labels[0], "A very long song title that keeps going ...");
        assert_eq!(values[0], 9.0);
    }

    #[test]
    fn test_channel_data() {
        let songs = songs_with_followers(20, 0);
        let (labels, values) = top_channels_data(&songs);
        assert_eq!(labels.len(), 7);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));

        let (labels, counts) = channel_counts_data(&songs);
        assert_eq!(labels.len(), 7);
        assert_eq!(counts.iter().sum::<f64>(), 20.0);
    }

    #[test]
    fn test_histogram_data_covers_all_songs() {
        let songs = songs_with_followers(37, 0);
        let views = view_histogram_data(&songs);
        let durations = duration_histogram_data(&songs);

        assert_eq!(views.len(), VIEW_HISTOGRAM_BINS);
        assert_eq!(durations.len(), DURATION_HISTOGRAM_BINS);
        assert_eq!(views.iter().map(|b| b.count).sum::<usize>(), 37);
        assert_eq!(durations.iter().map(|b| b.count).sum::<usize>(), 37);
    }

    #[test]
    fn test_scatter_data_respects_sample_size() {
        let songs = songs_with_followers(50, 20);
        let config = ChartConfig {
            scatter_sample_size: 10,
            ..ChartConfig::default()
        };

        assert_eq!(duration_vs_views_data(&songs, &config).len(), 10);
        assert_eq!(followers_vs_views_data(&songs, &config).len(), 10);

        let config = ChartConfig::default();
        assert_eq!(duration_vs_views_data(&songs, &config).len(), 50);
        assert_eq!(followers_vs_views_data(&songs, &config).len(), 20);
    }

    #[test]
    fn test_chart_name() {
        assert_eq!(
            chart_name(Path::new("/tmp/out/01_top_15_songs.png")),
            "01_top_15_songs.png"
        );
    }
}
