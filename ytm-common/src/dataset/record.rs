//! Song record model
//!
//! Mirrors the 13 columns of the song metadata CSV. Numeric columns are typed;
//! everything else is kept verbatim.

use serde::{Deserialize, Serialize};

/// Views in one billion
pub const BILLION: f64 = 1_000_000_000.0;

/// Views in one million
pub const MILLION: f64 = 1_000_000.0;

/// One cleaned song row
///
/// `view_count` and `duration` are always present and non-negative once a
/// record has passed cleaning. `channel_follower_count` stays optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub fulltitle: String,
    pub description: String,
    pub view_count: u64,
    /// Duration in seconds
    pub duration: u64,
    pub duration_string: String,
    pub channel: String,
    pub channel_url: String,
    pub channel_follower_count: Option<u64>,
    pub categories: String,
    pub tags: String,
    pub live_status: String,
    pub thumbnail: String,
}

impl SongRecord {
    /// Create a record with the fields the analysis uses; the rest are empty
    pub fn new(title: &str, channel: &str, view_count: u64, duration: u64) -> Self {
        Self {
            title: title.to_string(),
            fulltitle: title.to_string(),
            description: String::new(),
            view_count,
            duration,
            duration_string: format_duration_string(duration),
            channel: channel.to_string(),
            channel_url: String::new(),
            channel_follower_count: None,
            categories: String::new(),
            tags: String::new(),
            live_status: String::new(),
            thumbnail: String::new(),
        }
    }

    /// Set the channel follower count
    pub fn with_followers(mut self, followers: u64) -> Self {
        self.channel_follower_count = Some(followers);
        self
    }

    /// Duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.duration as f64 / 60.0
    }

    /// View count in billions
    pub fn views_in_billions(&self) -> f64 {
        self.view_count as f64 / BILLION
    }

    /// View count in millions
    pub fn views_in_millions(&self) -> f64 {
        self.view_count as f64 / MILLION
    }

    /// Channel follower count in millions, if known
    pub fn followers_in_millions(&self) -> Option<f64> {
        self.channel_follower_count.map(|f| f as f64 / MILLION)
    }
}

/// Coerce a raw CSV cell into a non-negative count
///
/// Accepts plain integers and finite floats (`"215.0"`, `"1.2e9"`), truncating
/// toward zero. Empty, non-numeric, NaN, infinite and negative values are
/// treated as missing.
///
/// # Examples
///
/// ```
/// use ytm_common::dataset::coerce_count;
///
/// assert_eq!(coerce_count("1234"), Some(1234));
/// assert_eq!(coerce_count(" 215.0 "), Some(215));
/// assert_eq!(coerce_count("1.2e9"), Some(1_200_000_000));
/// assert_eq!(coerce_count("n/a"), None);
/// assert_eq!(coerce_count("-5"), None);
/// ```
pub fn coerce_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as u64)
}

/// Format seconds as `M:SS` (or `H:MM:SS` past one hour)
fn format_duration_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce_count("0"), Some(0));
        assert_eq!(coerce_count("16000000000"), Some(16_000_000_000));
    }

    #[test]
    fn test_coerce_float_truncates() {
        assert_eq!(coerce_count("215.9"), Some(215));
        assert_eq!(coerce_count("3.5e2"), Some(350));
    }

    #[test]
    fn test_coerce_rejects_malformed() {
        assert_eq!(coerce_count(""), None);
        assert_eq!(coerce_count("   "), None);
        assert_eq!(coerce_count("abc"), None);
        assert_eq!(coerce_count("NaN"), None);
        assert_eq!(coerce_count("inf"), None);
        assert_eq!(coerce_count("-1"), None);
        assert_eq!(coerce_count("-0.5"), None);
    }

    #[test]
    fn test_derived_values() {
        let song = SongRecord::new("Song", "Channel", 2_500_000_000, 270);
        assert!((song.duration_minutes() - 4.5).abs() < 1e-12);
        assert!((song.views_in_billions() - 2.5).abs() < 1e-12);
        assert!((song.views_in_millions() - 2500.0).abs() < 1e-9);
        assert_eq!(song.followers_in_millions(), None);

        let song = song.with_followers(3_000_000);
        assert_eq!(song.followers_in_millions(), Some(3.0));
    }

    #[test]
    fn test_duration_string() {
        assert_eq!(format_duration_string(0), "0:00");
        assert_eq!(format_duration_string(213), "3:33");
        assert_eq!(format_duration_string(3725), "1:02:05");
    }
}
