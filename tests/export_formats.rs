use std::path::PathBuf;

use yt_transcript_scraper::export::{export_records, ExportFormat};
use yt_transcript_scraper::record::Record;

fn sample_records() -> Vec<Record> {
    vec![
        Record::from_iter([("id", "a"), ("text", "x")]),
        Record::from_iter([("id", "b")]),
    ]
}

#[test]
fn export_appends_extension_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transcripts");

    let written = export_records(&sample_records(), &path, ExportFormat::Csv).unwrap();
    assert_eq!(written, dir.path().join("transcripts.csv"));
    assert!(written.exists());
}

#[test]
fn export_keeps_existing_extension_even_when_mismatched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transcripts.txt");

    let written = export_records(&sample_records(), &path, ExportFormat::Csv).unwrap();
    assert_eq!(written, path);

    let content = std::fs::read_to_string(&written).unwrap();
    assert!(content.starts_with("id,text"));
}

#[test]
fn export_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("out");

    let written = export_records(&sample_records(), &path, ExportFormat::Json).unwrap();
    assert!(written.exists());
}

#[test]
fn export_all_formats_from_one_batch() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();

    for format in [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Excel,
        ExportFormat::Html,
        ExportFormat::Xml,
    ] {
        let path = dir.path().join("batch");
        let written = export_records(&records, &path, format).unwrap();
        assert_eq!(
            written.extension().unwrap().to_str().unwrap(),
            format.extension()
        );
        assert!(std::fs::metadata(&written).unwrap().len() > 0);
    }
}

#[test]
fn export_empty_batch_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let records: Vec<Record> = Vec::new();

    let json = export_records(&records, &dir.path().join("e1"), ExportFormat::Json).unwrap();
    assert_eq!(std::fs::read_to_string(json).unwrap(), "[]");

    let csv = export_records(&records, &dir.path().join("e2"), ExportFormat::Csv).unwrap();
    assert_eq!(std::fs::metadata(csv).unwrap().len(), 0);

    let html = export_records(&records, &dir.path().join("e3"), ExportFormat::Html).unwrap();
    assert!(std::fs::read_to_string(html)
        .unwrap()
        .contains("<p>No data available.</p>"));

    let xml = export_records(&records, &dir.path().join("e4"), ExportFormat::Xml).unwrap();
    assert!(std::fs::read_to_string(xml).unwrap().contains("<transcripts/>"));

    let xlsx = export_records(&records, &dir.path().join("e5"), ExportFormat::Excel).unwrap();
    let bytes = std::fs::read(xlsx).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn export_is_idempotent_for_text_formats() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();

    for format in [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Html,
        ExportFormat::Xml,
    ] {
        let path = dir.path().join("again");
        let first: PathBuf = export_records(&records, &path, format).unwrap();
        let first_bytes = std::fs::read(&first).unwrap();

        let second = export_records(&records, &path, format).unwrap();
        let second_bytes = std::fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }
}

#[test]
fn json_export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        Record::from_iter([("video_id", "abc"), ("transcript", "héllo wörld")]),
        Record::from_iter([("transcript", "reversed order"), ("video_id", "def")]),
    ];

    let written = export_records(&records, &dir.path().join("round"), ExportFormat::Json).unwrap();
    let content = std::fs::read_to_string(written).unwrap();
    let parsed: Vec<Record> = serde_json::from_str(&content).unwrap();

    // Same keys, same values, each record's own key order preserved
    assert_eq!(parsed, records);
}
