//! Song dataset model and CSV loading
//!
//! The dataset is read-only input: one row per song, loaded once per run and
//! borrowed by every analysis stage.

pub mod loader;
pub mod record;

pub use loader::{load_songs, load_songs_from_reader, LoadedDataset};
pub use record::{coerce_count, SongRecord};
