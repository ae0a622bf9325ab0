//! Statistical analysis: view and duration distributions, correlations

use serde::{Deserialize, Serialize};
use ytm_common::stats::{self, Summary};
use ytm_common::SongRecord;

/// Columns of the correlation matrix, in order
pub const CORRELATION_COLUMNS: [&str; 3] = ["view_count", "duration", "channel_follower_count"];

/// Pearson correlation matrix over rows that carry all three columns
///
/// A cell is `None` when the correlation is undefined (fewer than two
/// complete rows, or a column without variance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub values: [[Option<f64>; 3]; 3],
    /// Rows with view count, duration and follower count all present
    pub sample_size: usize,
}

impl CorrelationMatrix {
    pub fn compute(songs: &[SongRecord]) -> Self {
        let complete: Vec<[f64; 3]> = songs
            .iter()
            .filter_map(|s| {
                s.channel_follower_count
                    .map(|f| [s.view_count as f64, s.duration as f64, f as f64])
            })
            .collect();

        let columns: Vec<Vec<f64>> = (0..3)
            .map(|c| complete.iter().map(|row| row[c]).collect())
            .collect();

        let mut values = [[None; 3]; 3];
        for (i, row) in values.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = stats::pearson(&columns[i], &columns[j]);
            }
        }

        Self {
            values,
            sample_size: complete.len(),
        }
    }

    pub fn duration_vs_views(&self) -> Option<f64> {
        self.values[1][0]
    }

    pub fn followers_vs_views(&self) -> Option<f64> {
        self.values[2][0]
    }
}

/// Distribution statistics for views and durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub views: Summary,
    pub duration_minutes: Summary,
    pub correlation: CorrelationMatrix,
}

impl DistributionStats {
    /// Compute distributions; `None` for an empty dataset
    pub fn compute(songs: &[SongRecord]) -> Option<Self> {
        let views: Vec<f64> = songs.iter().map(|s| s.view_count as f64).collect();
        let minutes: Vec<f64> = songs.iter().map(SongRecord::duration_minutes).collect();

        Some(Self {
            views: Summary::from_values(&views)?,
            duration_minutes: Summary::from_values(&minutes)?,
            correlation: CorrelationMatrix::compute(songs),
        })
    }
}
