//! Integration tests for the query engine and the viewer state built on it.

use logsleuth::core::ingest;
use logsleuth::core::log_record::LogRecord;
use logsleuth::core::query::{derive_view, FilterState, SortDirection, SortDirective};
use logsleuth::core::state::{ViewCache, ViewerState};

/// A mixed file: both dialects, nested values, missing fields.
const MIXED_LOG: &str = r#"{"instant":{"epochSecond":300},"level":"ERROR","thread":"main","message":"Connection refused"}
{"instant":{"epochSecond":100},"level":"INFO","thread":"worker-2","message":"Server started"}
{"Timestamp":"2024-06-15T14:30:00Z","Level":"Warning","MessageTemplate":"Disk low","Properties":{"Drive":"C:","FreeMb":120}}
{"instant":{"epochSecond":200},"level":"DEBUG","thread":"worker-1","message":"Cache warmed"}
{"Timestamp":"2024-06-15T14:31:00Z","Level":"Error","MessageTemplate":"Write failed","Exception":"IOException: error 28"}
{"message":"bare entry"}
"#;

fn records() -> Vec<LogRecord> {
    ingest::ingest("mixed.log", MIXED_LOG).unwrap().records
}

fn messages(records: &[LogRecord], view: &[usize]) -> Vec<String> {
    view.iter()
        .map(|&i| records[i].display_message().to_string())
        .collect()
}

const QUERIES: &[&str] = &["error", "ERROR", "worker", "c:", "120", "x", "", "e"];

#[test]
fn filtering_is_idempotent() {
    let records = records();
    for q in QUERIES {
        let filter = FilterState::new(*q);
        let once = derive_view(&records, &filter, &SortDirective::default());
        let survivors: Vec<LogRecord> = once.iter().map(|&i| records[i].clone()).collect();
        let twice = derive_view(&survivors, &filter, &SortDirective::default());
        assert_eq!(twice.len(), once.len(), "query {q:?}");
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>(), "query {q:?}");
    }
}

#[test]
fn filtering_is_monotonic() {
    let records = records();
    let all = derive_view(&records, &FilterState::default(), &SortDirective::default());
    assert_eq!(all.len(), records.len());
    for q in QUERIES {
        let view = derive_view(&records, &FilterState::new(*q), &SortDirective::default());
        assert!(view.iter().all(|i| all.contains(i)), "query {q:?}");
    }
}

#[test]
fn sorting_is_idempotent() {
    let records = records();
    for key in ["timestamp", "level", "thread", "message", "Level", "missing"] {
        for dir in [SortDirection::Ascending, SortDirection::Descending] {
            let sort = SortDirective::new(key, dir);
            let once = derive_view(&records, &FilterState::default(), &sort);
            let resorted: Vec<LogRecord> = once.iter().map(|&i| records[i].clone()).collect();
            let twice = derive_view(&resorted, &FilterState::default(), &sort);
            assert_eq!(twice, (0..once.len()).collect::<Vec<_>>(), "{key} {dir:?}");
        }
    }
}

#[test]
fn toggling_reverses_a_duplicate_free_key() {
    let records = records();
    // Every record has a distinct message.
    let state = ViewerState::default().loaded("mixed.log", records.clone());
    let asc = state.clone().with_sort_toggled("message");
    let desc = asc.clone().with_sort_toggled("message");
    assert_eq!(desc.sort().direction, SortDirection::Descending);

    let mut reversed = asc.view();
    reversed.reverse();
    assert_eq!(desc.view(), reversed);
}

#[test]
fn search_for_error_keeps_only_the_error_level() {
    let records = [
        r#"{"level":"ERROR","message":"a"}"#,
        r#"{"level":"INFO","message":"b"}"#,
    ]
    .join("\n");
    let records = ingest::ingest("two.log", &records).unwrap().records;
    let view = derive_view(&records, &FilterState::new("error"), &SortDirective::default());
    assert_eq!(view, vec![0]);
}

#[test]
fn clicking_level_twice_flips_and_reverses() {
    let records = [
        r#"{"level":"WARN"}"#,
        r#"{"level":"ERROR"}"#,
        r#"{"level":"INFO"}"#,
    ]
    .join("\n");
    let records = ingest::ingest("levels.log", &records).unwrap().records;
    let state = ViewerState::default().loaded("levels.log", records);

    let asc = state.with_sort_toggled("level");
    assert_eq!(asc.sort().direction, SortDirection::Ascending);
    assert_eq!(asc.view(), vec![1, 2, 0]);

    let desc = asc.with_sort_toggled("level");
    assert_eq!(desc.sort().direction, SortDirection::Descending);
    assert_eq!(desc.view(), vec![0, 2, 1]);
}

#[test]
fn timestamp_column_orders_both_dialects_chronologically() {
    let records = records();
    let sort = SortDirective::new("timestamp", SortDirection::Ascending);
    let view = derive_view(&records, &FilterState::default(), &sort);
    assert_eq!(
        messages(&records, &view),
        vec![
            "Server started",
            "Cache warmed",
            "Connection refused",
            "Disk low",
            "Write failed",
            "bare entry",
        ]
    );

    // The record without a timestamp stays last when descending too.
    let sort = SortDirective::new("timestamp", SortDirection::Descending);
    let view = derive_view(&records, &FilterState::default(), &sort);
    assert_eq!(messages(&records, &view).last().map(String::as_str), Some("bare entry"));
}

#[test]
fn nested_property_values_are_searchable() {
    let records = records();
    let view = derive_view(&records, &FilterState::new("c:"), &SortDirective::default());
    assert_eq!(messages(&records, &view), vec!["Disk low"]);
}

#[test]
fn filter_and_sort_compose_through_the_cache() {
    let state = ViewerState::default().loaded("mixed.log", records());
    let mut cache = ViewCache::default();

    let state = state
        .with_filter(FilterState::new("error"))
        .with_sort_toggled("timestamp");
    let visible: Vec<usize> = cache.get(&state).to_vec();
    assert_eq!(
        messages(state.records(), &visible),
        vec!["Connection refused", "Write failed"]
    );

    // Selection refers to records, so it survives a re-sort.
    let state = state.selected(visible[1]).with_sort_toggled("timestamp");
    assert_eq!(
        state.selected_record().map(|r| r.display_message()),
        Some("Write failed")
    );
    assert_eq!(cache.get(&state), &[4, 0]);
}
