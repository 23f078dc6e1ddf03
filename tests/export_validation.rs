//! Integration tests for export: pre-flight validation and round trips
//! through the files an export writes.

use logsleuth::core::ingest;
use logsleuth::core::query::{FilterState, SortDirective};
use logsleuth::core::state::ViewerState;
use logsleuth::export::csv_export::{export_csv, validate_export_path};
use logsleuth::export::json_export::export_json;
use std::path::PathBuf;

const SAMPLE: &str = r#"[
  {"level": "ERROR", "message": "boom", "thread": "main", "loggerName": "app.Core",
   "instant": {"epochSecond": 100, "nanoOfSecond": 0},
   "thrown": {"name": "java.lang.IllegalStateException", "message": "bad state"}},
  {"level": "INFO", "message": "started, ok", "thread": "worker-1"},
  {"Level": "Warning", "MessageTemplate": "disk \"low\"", "Timestamp": "2024-06-15T14:30:00Z",
   "Exception": "IOException: quota"}
]"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("logsleuth_test_{}_{name}", std::process::id()))
}

fn sample_state() -> ViewerState {
    let outcome = ingest::ingest("sample.json", SAMPLE).unwrap();
    ViewerState::default().loaded("sample.json", outcome.records)
}

#[test]
fn validate_export_path_valid_directory() {
    let path = std::env::temp_dir().join("logsleuth_test_export.csv");
    let result = validate_export_path(&path);
    assert!(result.is_ok(), "Temp dir should be writable: {result:?}");
}

#[test]
fn validate_export_path_bare_file_name_uses_working_directory() {
    let result = validate_export_path(std::path::Path::new("logsleuth_export.csv"));
    assert!(result.is_ok(), "Bare name should resolve against the working directory: {result:?}");
}

#[test]
fn validate_export_path_nonexistent_directory() {
    let path = std::env::temp_dir()
        .join("logsleuth_no_such_dir_12345")
        .join("output.csv");
    let result = validate_export_path(&path);
    assert!(result.is_err(), "Non-existent dir should fail");
    let msg = result.unwrap_err().to_string();
    assert!(
        msg.contains("does not exist"),
        "Should indicate dir missing: {msg}"
    );
}

#[test]
fn validate_export_path_parent_is_a_file() {
    let file = temp_path("plain_file.txt");
    std::fs::write(&file, "x").unwrap();
    let result = validate_export_path(&file.join("output.csv"));
    let _ = std::fs::remove_file(&file);
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("not a directory"), "Unexpected message: {msg}");
}

#[test]
fn json_export_can_be_loaded_again() {
    let state = sample_state();
    let records: Vec<_> = state.records().to_vec();
    let path = temp_path("roundtrip.json");

    export_json(&records, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let reloaded = ingest::ingest_bytes("roundtrip.json", &bytes).unwrap();
    assert!(reloaded.diagnostics.is_empty());
    assert_eq!(reloaded.records, records);
}

#[test]
fn json_export_writes_only_the_filtered_view() {
    let state = sample_state().with_filter(FilterState::new("boom"));
    let visible: Vec<_> = state
        .view()
        .into_iter()
        .map(|i| state.records()[i].clone())
        .collect();
    assert_eq!(visible.len(), 1);

    let path = temp_path("filtered.json");
    export_json(&visible, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["message"], "boom");
}

#[test]
fn csv_export_has_header_and_one_row_per_record() {
    let state = sample_state().with_sort(SortDirective::default());
    let path = temp_path("records.csv");

    export_csv(state.records(), &path).unwrap();
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    let _ = std::fs::remove_file(&path);

    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Timestamp", "Level", "Thread", "Logger", "Message", "Exception"]
    );
    assert_eq!(rows.len(), 3);

    // Commas and quotes in values survive CSV quoting.
    assert_eq!(&rows[1][4], "started, ok");
    assert_eq!(&rows[2][4], "disk \"low\"");

    // Missing fields use the placeholder; exceptions come from either dialect.
    assert_eq!(&rows[0][3], "app.Core");
    assert_eq!(&rows[1][3], "N/A");
    assert_eq!(&rows[0][5], "bad state");
    assert_eq!(&rows[2][5], "IOException: quota");
    assert_eq!(&rows[1][5], "");
}
