//! CSV loading and cleaning
//!
//! Columns are matched by header name. Numeric columns are coerced with
//! [`coerce_count`]; rows missing a view count, a duration or a channel are
//! dropped, as are rows the CSV reader cannot decode.

use super::record::{coerce_count, SongRecord};
use crate::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of loading and cleaning the song CSV
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Path the data was read from
    pub source: PathBuf,
    /// Cleaned records, in file order
    pub songs: Vec<SongRecord>,
    /// Records read from the file, before cleaning
    pub total_rows: usize,
    /// Number of columns in the header row
    pub column_count: usize,
    /// Records dropped during cleaning
    pub removed_rows: usize,
}

impl LoadedDataset {
    /// Wrap already-clean records (used by tests and callers that build data in memory)
    pub fn from_records(source: impl Into<PathBuf>, songs: Vec<SongRecord>) -> Self {
        let total_rows = songs.len();
        Self {
            source: source.into(),
            songs,
            total_rows,
            column_count: 13,
            removed_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Raw CSV row. Every cell is read as text so coercion happens in one place.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSongRow {
    title: String,
    fulltitle: String,
    description: String,
    view_count: String,
    duration: String,
    duration_string: String,
    channel: String,
    channel_url: String,
    channel_follower_count: String,
    categories: String,
    tags: String,
    live_status: String,
    thumbnail: String,
}

impl RawSongRow {
    /// Coerce types and apply the drop rule
    fn into_record(self) -> Option<SongRecord> {
        let view_count = coerce_count(&self.view_count)?;
        let duration = coerce_count(&self.duration)?;
        if self.channel.trim().is_empty() {
            return None;
        }

        Some(SongRecord {
            title: self.title,
            fulltitle: self.fulltitle,
            description: self.description,
            view_count,
            duration,
            duration_string: self.duration_string,
            channel: self.channel,
            channel_url: self.channel_url,
            channel_follower_count: coerce_count(&self.channel_follower_count),
            categories: self.categories,
            tags: self.tags,
            live_status: self.live_status,
            thumbnail: self.thumbnail,
        })
    }
}

/// Load and clean the song CSV at `path`
pub fn load_songs<P: AsRef<Path>>(path: P) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    load_songs_from_reader(file, path)
}

/// Load and clean song CSV data from any reader
///
/// `source` is recorded in the result for reporting only.
pub fn load_songs_from_reader<R: Read>(reader: R, source: &Path) -> Result<LoadedDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let column_count = csv_reader.headers()?.len();

    let mut songs = Vec::new();
    let mut total_rows = 0usize;
    let mut unreadable = 0usize;

    for row in csv_reader.deserialize::<RawSongRow>() {
        total_rows += 1;
        match row {
            Ok(raw) => {
                if let Some(song) = raw.into_record() {
                    songs.push(song);
                }
            }
            Err(e) => {
                unreadable += 1;
                debug!("Skipping unreadable row {}: {}", total_rows, e);
            }
        }
    }

    let removed_rows = total_rows - songs.len();

    info!("✓ Loaded {} records", crate::human_format::format_count(total_rows as u64));
    info!("✓ Dataset shape: {} rows × {} columns", total_rows, column_count);
    if unreadable > 0 {
        warn!("{} rows could not be parsed and were skipped", unreadable);
    }
    if removed_rows > 0 {
        info!("✓ Removed {} rows with missing critical data", removed_rows);
    }

    Ok(LoadedDataset {
        source: source.to_path_buf(),
        songs,
        total_rows,
        column_count,
        removed_rows,
    })
}
