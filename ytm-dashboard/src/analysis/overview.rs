//! Exploratory analysis: dataset totals, top songs and channel rankings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ytm_common::stats;
use ytm_common::SongRecord;

/// Summed views and song count for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTotal {
    pub channel: String,
    pub total_views: u64,
    pub song_count: usize,
}

impl ChannelTotal {
    pub fn views_in_billions(&self) -> f64 {
        self.total_views as f64 / ytm_common::dataset::record::BILLION
    }
}

/// Headline numbers for the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_songs: usize,
    pub unique_channels: usize,
    /// Sum of `view_count` over all cleaned rows, saturating at `u64::MAX`
    pub total_views: u64,
    pub mean_views: f64,
    pub median_views: f64,
    pub mean_duration_minutes: f64,
    pub most_popular_channel: String,
    pub most_popular_channel_views: u64,
    pub most_viewed_song: String,
    pub most_viewed_song_views: u64,
    pub most_viewed_song_channel: String,
}

impl Overview {
    /// Compute the overview; `None` for an empty dataset
    pub fn compute(songs: &[SongRecord]) -> Option<Self> {
        let views: Vec<f64> = songs.iter().map(|s| s.view_count as f64).collect();
        let minutes: Vec<f64> = songs.iter().map(SongRecord::duration_minutes).collect();

        let channels = channel_totals(songs);
        let top_channel = channels.first()?;
        let top_song = *top_songs(songs, 1).first()?;

        Some(Self {
            total_songs: songs.len(),
            unique_channels: channels.len(),
            total_views: songs
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.view_count)),
            mean_views: stats::mean(&views)?,
            median_views: stats::median(&views)?,
            mean_duration_minutes: stats::mean(&minutes)?,
            most_popular_channel: top_channel.channel.clone(),
            most_popular_channel_views: top_channel.total_views,
            most_viewed_song: top_song.title.clone(),
            most_viewed_song_views: top_song.view_count,
            most_viewed_song_channel: top_song.channel.clone(),
        })
    }

    pub fn total_views_in_billions(&self) -> f64 {
        self.total_views as f64 / ytm_common::dataset::record::BILLION
    }
}

/// The `min(n, len)` most viewed songs, highest first
///
/// Ties keep their input order.
pub fn top_songs(songs: &[SongRecord], n: usize) -> Vec<&SongRecord> {
    let mut ranked: Vec<&SongRecord> = songs.iter().collect();
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ranked.truncate(n);
    ranked
}

/// Per-channel totals sorted by summed views (descending), then channel name
///
/// Sums saturate at `u64::MAX` instead of overflowing.
pub fn channel_totals(songs: &[SongRecord]) -> Vec<ChannelTotal> {
    let mut by_channel: HashMap<&str, ChannelTotal> = HashMap::new();
    for song in songs {
        let entry = by_channel
            .entry(song.channel.as_str())
            .or_insert_with(|| ChannelTotal {
                channel: song.channel.clone(),
                total_views: 0,
                song_count: 0,
            });
        entry.total_views = entry.total_views.saturating_add(song.view_count);
        entry.song_count += 1;
    }

    let mut totals: Vec<ChannelTotal> = by_channel.into_values().collect();
    totals.sort_by(|a, b| {
        b.total_views
            .cmp(&a.total_views)
            .then_with(|| a.channel.cmp(&b.channel))
    });
    totals
}

/// Top `n` channels by summed views
pub fn top_channels_by_views(songs: &[SongRecord], n: usize) -> Vec<ChannelTotal> {
    let mut totals = channel_totals(songs);
    totals.truncate(n);
    totals
}

/// Top `n` channels by number of songs, ties broken by channel name
pub fn top_channels_by_count(songs: &[SongRecord], n: usize) -> Vec<ChannelTotal> {
    let mut totals = channel_totals(songs);
    totals.sort_by(|a, b| {
        b.song_count
            .cmp(&a.song_count)
            .then_with(|| a.channel.cmp(&b.channel))
    });
    totals.truncate(n);
    totals
}
