use std::path::{Path, PathBuf};

use crate::format::LineFormat;
use crate::naming::build_file_name;
use crate::split::build_jobs;
use crate::tracklist::parse_track_list;

const TRACK_LIST: &str = "0:00 Intro\n1:30 Song One\n4:45 Song Two\n";

#[test]
fn parse_track_list_and_backfill_ends() {
    let format = LineFormat::compile("%from% %title%").unwrap();
    let records = parse_track_list(TRACK_LIST.as_bytes(), &format).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].end(), Some("1:30"));
    assert_eq!(records[0].end(), Some(records[1].start()));
    assert_eq!(records[1].end(), Some("4:45"));
    assert_eq!(records[1].end(), Some(records[2].start()));
    assert_eq!(records[2].end(), None);

    let titles: Vec<&str> = records.iter().filter_map(|r| r.get("title")).collect();
    assert_eq!(titles, ["Intro", "Song One", "Song Two"]);
}

#[test]
fn records_become_ffmpeg_jobs() {
    let format = LineFormat::compile("%from% %title%").unwrap();
    let records = parse_track_list(TRACK_LIST.as_bytes(), &format).unwrap();
    let jobs = build_jobs(&records, Path::new("out"), "%seq% - %title%.mp3", ':').unwrap();

    let ranges: Vec<(&str, Option<&str>)> = jobs
        .iter()
        .map(|job| (job.from.as_str(), job.to.as_deref()))
        .collect();
    assert_eq!(
        ranges,
        [
            ("00:00:00", Some("00:01:30")),
            ("00:01:30", Some("00:04:45")),
            ("00:04:45", None),
        ]
    );
    assert_eq!(jobs[1].output_path, PathBuf::from("out/2 - Song One.mp3"));
}

#[test]
fn custom_separator_and_explicit_ends() {
    let format = LineFormat::compile("%number%) %from% .. %to% %artist% - %title%").unwrap();
    let text = "1) 0.00 .. 3.10 Artist - First\n2) 3.10 .. 1.02.00 Artist - Second\n";
    let records = parse_track_list(text.as_bytes(), &format).unwrap();
    let jobs = build_jobs(&records, Path::new("out"), "%number%. %title%.mp3", '.').unwrap();

    assert_eq!(jobs[0].from, "00:00:00");
    assert_eq!(jobs[0].to.as_deref(), Some("00:03:10"));
    assert_eq!(jobs[1].to.as_deref(), Some("01:02:00"));
    assert_eq!(jobs[1].output_path, PathBuf::from("out/2. Second.mp3"));
}

#[test]
fn seq_is_always_available_to_output_names() {
    let format = LineFormat::compile("%from%").unwrap();
    let text: String = (0..10).map(|i| format!("{}:00\n", i)).collect();
    let records = parse_track_list(text.as_bytes(), &format).unwrap();
    let names: Vec<String> = records
        .iter()
        .map(|record| build_file_name("%seq%.mp3", record))
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("01.mp3"));
    assert_eq!(names.last().map(String::as_str), Some("10.mp3"));
}
