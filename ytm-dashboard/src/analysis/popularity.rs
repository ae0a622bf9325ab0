//! Popularity tiers by view count
//!
//! Thresholds:
//! - Mega hit: at least 1 billion views
//! - Popular: 100 million up to (not including) 1 billion
//! - Moderate: under 100 million

use serde::{Deserialize, Serialize};
use ytm_common::SongRecord;

/// Views needed for a mega hit
pub const MEGA_HIT_THRESHOLD: u64 = 1_000_000_000;

/// Views needed for a popular song
pub const POPULAR_THRESHOLD: u64 = 100_000_000;

/// Songs shorter than this many minutes count as short
pub const SHORT_SONG_MINUTES: f64 = 3.0;

/// Popularity tier of a single song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopularityTier {
    /// ≥ 1B views
    MegaHit,
    /// 100M–1B views
    Popular,
    /// < 100M views
    Moderate,
}

impl PopularityTier {
    /// Classify a view count
    pub fn from_views(view_count: u64) -> Self {
        if view_count >= MEGA_HIT_THRESHOLD {
            PopularityTier::MegaHit
        } else if view_count >= POPULAR_THRESHOLD {
            PopularityTier::Popular
        } else {
            PopularityTier::Moderate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PopularityTier::MegaHit => "Mega Hits",
            PopularityTier::Popular => "Popular",
            PopularityTier::Moderate => "Moderate",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            PopularityTier::MegaHit => "≥1B views",
            PopularityTier::Popular => "100M-1B views",
            PopularityTier::Moderate => "<100M views",
        }
    }
}

/// Song counts per tier, plus the short-song count used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityBreakdown {
    pub total: usize,
    pub mega_hits: usize,
    pub popular: usize,
    pub moderate: usize,
    /// Songs under three minutes long
    pub short_songs: usize,
}

impl PopularityBreakdown {
    pub fn compute(songs: &[SongRecord]) -> Self {
        let mut breakdown = Self {
            total: songs.len(),
            mega_hits: 0,
            popular: 0,
            moderate: 0,
            short_songs: 0,
        };

        for song in songs {
            match PopularityTier::from_views(song.view_count) {
                PopularityTier::MegaHit => breakdown.mega_hits += 1,
                PopularityTier::Popular => breakdown.popular += 1,
                PopularityTier::Moderate => breakdown.moderate += 1,
            }
            if song.duration_minutes() < SHORT_SONG_MINUTES {
                breakdown.short_songs += 1;
            }
        }

        breakdown
    }

    pub fn count(&self, tier: PopularityTier) -> usize {
        match tier {
            PopularityTier::MegaHit => self.mega_hits,
            PopularityTier::Popular => self.popular,
            PopularityTier::Moderate => self.moderate,
        }
    }

    /// `count` as a percentage of all songs (0 for an empty dataset)
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// Tiers in display order with their counts
    pub fn tiers(&self) -> [(PopularityTier, usize); 3] {
        [
            (PopularityTier::MegaHit, self.mega_hits),
            (PopularityTier::Popular, self.popular),
            (PopularityTier::Moderate, self.moderate),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PopularityTier::from_views(0), PopularityTier::Moderate);
        assert_eq!(PopularityTier::from_views(99_999_999), PopularityTier::Moderate);
        assert_eq!(PopularityTier::from_views(100_000_000), PopularityTier::Popular);
        assert_eq!(PopularityTier::from_views(999_999_999), PopularityTier::Popular);
        assert_eq!(PopularityTier::from_views(1_000_000_000), PopularityTier::MegaHit);
    }

    #[test]
    fn test_breakdown_partitions_rows() {
        let songs = vec![
            SongRecord::new("a", "c", 2_000_000_000, 150),
            SongRecord::new("b", "c", 1_000_000_000, 200),
            SongRecord::new("c", "c", 500_000_000, 179),
            SongRecord::new("d", "c", 5_000, 180),
        ];
        let breakdown = PopularityBreakdown::compute(&songs);

        assert_eq!(breakdown.mega_hits, 2);
        assert_eq!(breakdown.popular, 1);
        assert_eq!(breakdown.moderate, 1);
        assert_eq!(
            breakdown.mega_hits + breakdown.popular + breakdown.moderate,
            breakdown.total
        );
        assert_eq!(breakdown.short_songs, 2);
        assert_eq!(breakdown.percent(breakdown.mega_hits), 50.0);
        assert_eq!(breakdown.count(PopularityTier::Popular), 1);
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = PopularityBreakdown::compute(&[]);
        assert_eq!(breakdown.total, 0);
        assert_eq!(breakdown.percent(0), 0.0);
    }
}
