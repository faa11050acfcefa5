use std::fs;
use std::path::Path;

use dupfolders_report::{ReportError, ReportReader, summarize};
use tempfile::TempDir;

fn write_report(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.join("test_duplicates.csv");
    let mut content = String::from("Group,Shared Folder,File,Size(Byte),Modified Time\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_read_report_file() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        temp.path(),
        &[
            "1,photos,/volume1/photos/vacation/img1.jpg,1000,2024/01/01 12:00:00",
            "1,backup,/volume1/backup/pictures/img1.jpg,1000,2024/01/01 12:00:00",
        ],
    );

    let records = ReportReader::new().unwrap().read(&path).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].group_id, "1");
    assert_eq!(records[0].folder, "photos");
    assert_eq!(records[0].size, 1000);
}

#[test]
fn test_read_missing_file() {
    let err = ReportReader::new()
        .unwrap()
        .read(Path::new("nonexistent.csv"))
        .unwrap_err();
    assert!(matches!(err, ReportError::NotFound { .. }));
}

#[test]
fn test_read_invalid_header() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.csv");
    fs::write(&path, "Invalid,Header,Format\n1,photos,/volume1/photos/img.jpg\n").unwrap();

    let err = ReportReader::new().unwrap().read(&path).unwrap_err();
    match err {
        ReportError::HeaderMismatch { expected, found } => {
            assert_eq!(expected.len(), 5);
            assert_eq!(found, vec!["Invalid", "Header", "Format"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_unicode_paths() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        temp.path(),
        &[
            "1,photos,/volume1/photos/휴가/이미지.jpg,1000,2024/01/01 12:00:00",
            "1,backup,/volume1/backup/휴가/이미지.jpg,1000,2024/01/01 12:00:00",
        ],
    );

    let records = ReportReader::new().unwrap().read(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].path.contains("휴가"));
}

#[test]
fn test_read_quoted_fields() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        temp.path(),
        &["7,\"my photos\",\"/volume1/my photos/a,b.jpg\",42,\"2024/01/01 12:00:00\""],
    );

    let records = ReportReader::new().unwrap().read(&path).unwrap();
    assert_eq!(records[0].folder, "my photos");
    assert_eq!(records[0].path, "/volume1/my photos/a,b.jpg");
}

#[test]
fn test_read_empty_report() {
    let temp = TempDir::new().unwrap();
    let path = write_report(temp.path(), &[]);

    let records = ReportReader::new().unwrap().read(&path).unwrap();
    assert!(records.is_empty());
    assert_eq!(summarize(&records).records, 0);
}

#[test]
fn test_read_non_numeric_size() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        temp.path(),
        &["1,photos,/volume1/photos/a.jpg,big,2024/01/01 12:00:00"],
    );

    let err = ReportReader::new().unwrap().read(&path).unwrap_err();
    match err {
        ReportError::InvalidSize { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "big");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_empty_group_id() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        temp.path(),
        &[",photos,/volume1/photos/a.jpg,10,2024/01/01 12:00:00"],
    );

    let err = ReportReader::new().unwrap().read(&path).unwrap_err();
    assert!(matches!(err, ReportError::EmptyField { field: "group", line: 2 }));
}
