//! Integration tests for loading the song CSV from disk

use std::io::Write;
use ytm_common::{load_songs, Error};

const HEADER: &str = "title,fulltitle,description,view_count,duration,duration_string,channel,channel_url,channel_follower_count,categories,tags,live_status,thumbnail";

fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

#[test]
fn test_load_from_file() {
    let file = write_csv(&[
        "Song A,Song A (Official),desc,1500000000,213,3:33,Channel One,https://c/1,25000000,Music,pop,not_live,https://t/1",
        "Song B,Song B (Official),desc,250000000,180,3:00,Channel Two,https://c/2,,Music,rock,not_live,https://t/2",
        "Song C,Song C,desc,not-a-number,200,3:20,Channel One,https://c/1,25000000,Music,pop,not_live,https://t/3",
    ]);

    let dataset = load_songs(file.path()).unwrap();

    assert_eq!(dataset.source, file.path());
    assert_eq!(dataset.total_rows, 3);
    assert_eq!(dataset.column_count, 13);
    assert_eq!(dataset.removed_rows, 1);
    assert_eq!(dataset.len(), 2);

    let total: u64 = dataset.songs.iter().map(|s| s.view_count).sum();
    assert_eq!(total, 1_750_000_000);
}

#[test]
fn test_every_kept_row_has_critical_fields() {
    let file = write_csv(&[
        "A,A,d,10,60,1:00,Chan,u,,M,t,l,th",
        "B,B,d,20,,1:00,Chan,u,,M,t,l,th",
        "C,C,d,30,60,1:00,   ,u,,M,t,l,th",
        "D,D,d,40.0,61.5,1:01,Chan,u,7.0,M,t,l,th",
    ]);

    let dataset = load_songs(file.path()).unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(dataset.songs.iter().all(|s| !s.channel.trim().is_empty()));
    assert_eq!(dataset.songs[1].duration, 61);
    assert_eq!(dataset.songs[1].channel_follower_count, Some(7));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_songs("/nonexistent/songs.csv");
    assert!(matches!(result, Err(Error::Io(_))));
}
