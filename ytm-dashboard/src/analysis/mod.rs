//! # Song Dataset Analysis
//!
//! Aggregates computed once per run from the cleaned dataset:
//! - [`overview`]: totals, top songs, channel rankings
//! - [`distribution`]: view/duration summaries and correlations
//! - [`popularity`]: mega hit / popular / moderate tiers
//!
//! [`Analysis::compute`] bundles all three plus the ordered insight sentences
//! that end up in the report.

pub mod distribution;
pub mod overview;
pub mod popularity;

pub use distribution::{CorrelationMatrix, DistributionStats, CORRELATION_COLUMNS};
pub use overview::{
    channel_totals, top_channels_by_count, top_channels_by_views, top_songs, ChannelTotal,
    Overview,
};
pub use popularity::{PopularityBreakdown, PopularityTier};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use ytm_common::LoadedDataset;

/// All aggregates for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub overview: Overview,
    pub distribution: DistributionStats,
    pub popularity: PopularityBreakdown,
    /// Key insights, in the order they were discovered
    pub insights: Vec<String>,
}

impl Analysis {
    /// Run every aggregate over the dataset
    ///
    /// Fails with [`Error::EmptyDataset`] when cleaning left no rows.
    pub fn compute(dataset: &LoadedDataset) -> Result<Self> {
        let songs = &dataset.songs;
        let empty = || Error::EmptyDataset(dataset.source.display().to_string());

        let overview = Overview::compute(songs).ok_or_else(empty)?;
        let distribution = DistributionStats::compute(songs).ok_or_else(empty)?;
        let popularity = PopularityBreakdown::compute(songs);
        let insights = collect_insights(&overview, &distribution, &popularity);

        Ok(Self {
            overview,
            distribution,
            popularity,
            insights,
        })
    }
}

fn collect_insights(
    overview: &Overview,
    distribution: &DistributionStats,
    popularity: &PopularityBreakdown,
) -> Vec<String> {
    use ytm_common::human_format::format_count;

    vec![
        format!(
            "Dataset contains {} songs from {} channels",
            format_count(overview.total_songs as u64),
            format_count(overview.unique_channels as u64)
        ),
        format!(
            "Total combined views: {:.2} billion",
            overview.total_views_in_billions()
        ),
        format!("Most viewed song: {}", overview.most_viewed_song),
        format!(
            "{} songs have achieved 'mega hit' status with over 1 billion views",
            popularity.mega_hits
        ),
        format!(
            "Average song duration is {:.2} minutes",
            distribution.duration_minutes.mean
        ),
    ]
}
