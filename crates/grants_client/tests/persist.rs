use std::fs;
use std::sync::Once;

use grants_client::{download_filename, ensure_download_dir, DownloadWriter, PersistError};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grants_logging::initialize_for_tests);
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn creates_missing_download_dir() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let downloads = temp.path().join("downloads").join("reports");
    assert!(!downloads.exists());
    ensure_download_dir(&downloads).unwrap();
    assert!(downloads.is_dir());
}

#[test]
fn repeated_download_replaces_previous_file() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let writer = DownloadWriter::new(temp.path().to_path_buf());
    let name = download_filename("grant_summary.pdf", 4);

    let first = writer.save(&name, b"%PDF-1.4 first").unwrap();
    assert_eq!(first.file_name().unwrap(), "grant_summary.pdf");

    let second = writer.save(&name, b"%PDF-1.4 second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF-1.4 second");
    assert_eq!(entries(temp.path()), vec!["grant_summary.pdf"]);
}

#[test]
fn empty_download_writes_nothing() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let downloads = temp.path().join("downloads");
    let writer = DownloadWriter::new(downloads.clone());

    let err = writer.save("report.pdf", b"").unwrap_err();
    assert!(matches!(err, PersistError::EmptyDownload));
    assert!(!downloads.exists());
}

#[test]
fn download_dir_that_is_a_file_fails_cleanly() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("downloads");
    fs::write(&blocker, "x").unwrap();

    let writer = DownloadWriter::new(blocker.clone());
    assert!(matches!(
        writer.save("report.pdf", b"data"),
        Err(PersistError::DownloadDir(_))
    ));
    assert_eq!(entries(temp.path()), vec!["downloads"]);
}
