//! End-to-end tests of the report pipeline over a real data file

use chrono::NaiveDate;
use tempfile::TempDir;
use weight_watcher::{
    commands,
    config::OutputFormat,
    db::Database,
    error::ReportError,
    report::{self, ReportRow},
};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn sample_db(dir: &TempDir) -> Database {
    let db = Database::create(&dir.path().join("weights.db")).unwrap();
    // Inserted out of order on purpose
    db.insert(day("2024-05-04"), 13.0).unwrap();
    db.insert(day("2024-05-01"), 10.0).unwrap();
    db.insert(day("2024-05-05"), 9.0).unwrap();
    db.insert(day("2024-05-02"), 12.0).unwrap();
    db.insert(day("2024-05-03"), 11.0).unwrap();
    db
}

#[test]
fn test_history_follows_day_order() {
    let dir = TempDir::new().unwrap();
    let db = sample_db(&dir);
    let rows = report::history(&db, 3).unwrap();
    let days: Vec<String> = rows.iter().map(|r| r.day.to_string()).collect();
    assert_eq!(days, vec!["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04", "2024-05-05"]);
    let averages: Vec<f64> = rows.iter().map(|r| r.average).collect();
    assert_eq!(averages, vec![10.0, 11.0, 11.0, 12.0, 11.0]);
}

#[test]
fn test_summary_is_last_history_row() {
    let dir = TempDir::new().unwrap();
    let db = sample_db(&dir);
    let row = report::summary(&db, 3).unwrap().unwrap();
    assert_eq!(row, ReportRow { day: day("2024-05-05"), value: 9.0, average: 11.0 });
}

#[test]
fn test_summary_of_empty_store() {
    let db = Database::open_in_memory().unwrap();
    assert!(report::summary(&db, 7).unwrap().is_none());
    let text = report::render_summary(None, OutputFormat::Text).unwrap();
    assert_eq!(text, "No measurements recorded yet.\n");
    assert_eq!(report::render_summary(None, OutputFormat::Json).unwrap(), "null");
}

#[test]
fn test_invalid_window_fails_before_output() {
    let dir = TempDir::new().unwrap();
    let db = sample_db(&dir);
    assert!(matches!(report::history(&db, 0), Err(ReportError::InvalidParameter(0))));
    assert!(matches!(report::summary(&db, -2), Err(ReportError::InvalidParameter(-2))));
}

#[test]
fn test_render_history_text() {
    let rows = vec![
        ReportRow { day: day("2024-05-01"), value: 10.0, average: 10.0 },
        ReportRow { day: day("2024-05-02"), value: 12.0, average: 11.0 },
    ];
    let text = report::render_history(&rows, OutputFormat::Text).unwrap();
    assert_eq!(text, "2024-05-01     10.0     10.0\n2024-05-02     12.0     11.0\n");
}

#[test]
fn test_render_history_json() {
    let rows = vec![ReportRow { day: day("2024-05-01"), value: 80.5, average: 80.5 }];
    let json = report::render_history(&rows, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["day"], "2024-05-01");
    assert_eq!(parsed[0]["value"], 80.5);
    assert_eq!(parsed[0]["average"], 80.5);
}

#[test]
fn test_history_with_huge_window() {
    let dir = TempDir::new().unwrap();
    let db = sample_db(&dir);
    let rows = report::history(&db, 1 << 62).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4].average, 11.0);
}

#[test]
fn test_init_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.db");
    commands::init(&path).unwrap();
    commands::add(&path, day("2024-05-01"), 80.0).unwrap();

    assert!(commands::init(&path).is_err());
    assert_eq!(commands::list(&path).unwrap().len(), 1);
}

#[test]
fn test_commands_need_existing_data_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.db");

    assert!(commands::open_existing(&path).is_err());
    assert!(commands::add(&path, day("2024-05-01"), 80.0).is_err());
    assert!(commands::edit(&path, 1, None, Some(79.0)).is_err());
    assert!(commands::remove(&path, 1).is_err());
    assert!(commands::list(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_edit_without_changes_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.db");
    commands::init(&path).unwrap();
    let id = commands::add(&path, day("2024-05-01"), 80.0).unwrap();

    let err = commands::edit(&path, id, None, None).unwrap_err();
    assert!(err.to_string().contains("nothing to change"));

    commands::edit(&path, id, None, Some(79.5)).unwrap();
    assert_eq!(commands::list(&path).unwrap()[0].value, 79.5);
}

#[test]
fn test_edit_and_remove_unknown_id_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.db");
    commands::init(&path).unwrap();

    assert!(commands::edit(&path, 42, Some(day("2024-05-01")), None).is_err());
    assert!(commands::remove(&path, 42).is_err());
}
