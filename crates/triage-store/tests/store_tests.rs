use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;
use triage_store::{IncidentLogStore, IncidentRecord, StoreError, DEFAULT_LOG_FILE, SEPARATOR};

fn record(n: u32, role: &str) -> IncidentRecord {
    let timestamp = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, n)
        .unwrap();
    IncidentRecord::new(
        timestamp,
        role,
        format!("incident #{}", n),
        format!("resolution #{}", n),
    )
}

#[test]
fn test_read_all_missing_file_is_distinct() {
    let dir = TempDir::new().unwrap();
    let store = IncidentLogStore::in_dir(dir.path());

    let err = store.read_all().unwrap_err();

    assert!(matches!(err, StoreError::Missing(ref p) if p == &dir.path().join(DEFAULT_LOG_FILE)));
}

#[test]
fn test_append_creates_file() {
    let dir = TempDir::new().unwrap();
    let store = IncidentLogStore::in_dir(dir.path());

    store.append(&record(1, "SRE Expert")).unwrap();

    let content = store.read_all().unwrap();
    assert_eq!(content, record(1, "SRE Expert").to_block());
}

#[test]
fn test_append_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = IncidentLogStore::new(dir.path().join("logs").join("nested").join("incidents.txt"));

    store.append(&record(1, "DevOps Mentor")).unwrap();

    assert!(store.path().exists());
}

#[test]
fn test_n_appends_yield_n_separators_in_order() {
    let dir = TempDir::new().unwrap();
    let store = IncidentLogStore::in_dir(dir.path());

    for n in 0..5 {
        store.append(&record(n, "Cloud Engineer")).unwrap();
    }

    let content = store.read_all().unwrap();
    assert_eq!(content.matches(SEPARATOR).count(), 5);

    let positions: Vec<usize> = (0..5)
        .map(|n| content.find(&format!("[User Input]: incident #{}\n", n)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_append_preserves_existing_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_LOG_FILE);
    fs::write(&path, "legacy entry written by an older deployment\n").unwrap();
    let store = IncidentLogStore::new(&path);

    store.append(&record(7, "Linux Troubleshooter")).unwrap();

    let content = store.read_all().unwrap();
    assert!(content.starts_with("legacy entry written by an older deployment\n"));
    assert!(content.ends_with(&record(7, "Linux Troubleshooter").to_block()));
}

#[test]
fn test_read_all_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = IncidentLogStore::in_dir(dir.path());
    store.append(&record(1, "SRE Expert")).unwrap();
    store.append(&record(2, "SRE Expert")).unwrap();

    let first = store.read_all().unwrap();
    let second = store.read_all().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_two_stores_share_one_file() {
    let dir = TempDir::new().unwrap();
    let a = IncidentLogStore::in_dir(dir.path());
    let b = IncidentLogStore::in_dir(dir.path());

    a.append(&record(1, "SRE Expert")).unwrap();
    b.append(&record(2, "DevOps Mentor")).unwrap();

    assert_eq!(a.read_all().unwrap(), b.read_all().unwrap());
    assert_eq!(a.read_all().unwrap().matches(SEPARATOR).count(), 2);
}

#[test]
fn test_append_into_directory_path_fails_with_write_error() {
    let dir = TempDir::new().unwrap();
    // The target path is an existing directory, so opening it for append fails.
    let store = IncidentLogStore::new(dir.path());

    let err = store.append(&record(1, "SRE Expert")).unwrap_err();

    assert!(matches!(err, StoreError::Write { .. }));
}
