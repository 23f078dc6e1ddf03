//! Validates that compile-time constants are internally consistent.
#![allow(clippy::assertions_on_constants)]

use logsleuth::util::constants::*;

#[test]
fn copy_ack_lasts_two_seconds() {
    assert_eq!(COPY_ACK_SECS, 2);
}

#[test]
fn export_message_outlives_copy_ack() {
    assert!(EXPORT_MESSAGE_SECS >= COPY_ACK_SECS);
}

#[test]
fn supported_extensions_are_lowercase_without_dot() {
    assert_eq!(SUPPORTED_EXTENSIONS, &["json", "log"]);
    for ext in SUPPORTED_EXTENSIONS {
        assert!(!ext.starts_with('.'), "{ext} must not start with a dot");
        assert_eq!(*ext, ext.to_ascii_lowercase());
    }
}

#[test]
fn max_diagnostics_is_bounded() {
    assert!(MAX_DIAGNOSTICS > 0, "MAX_DIAGNOSTICS must be > 0");
    assert!(MAX_DIAGNOSTICS <= 10_000, "MAX_DIAGNOSTICS should be bounded");
}

#[test]
fn filter_debounce_is_reasonable() {
    assert!(FILTER_DEBOUNCE_MS >= 50, "Debounce too short");
    assert!(FILTER_DEBOUNCE_MS <= 1000, "Debounce too long for interactive use");
}

#[test]
fn table_layout_constants_are_positive() {
    assert!(TABLE_ROW_HEIGHT > 0.0);
    assert!(MESSAGE_TRUNCATE_CHARS > 0);
    assert!(PAGE_JUMP_ROWS > 1);
}

#[test]
fn log_file_size_is_reasonable() {
    assert!(
        MAX_LOG_FILE_SIZE >= 1024 * 1024,
        "Log file limit should be at least 1 MB"
    );
    assert!(
        MAX_LOG_FILE_SIZE <= 100 * 1024 * 1024,
        "Log file limit should not exceed 100 MB"
    );
}

#[test]
fn app_name_and_placeholder_are_set() {
    assert_eq!(APP_NAME, "LogSleuth");
    assert_eq!(PLACEHOLDER, "N/A");
    assert!(!APP_VERSION.is_empty());
    assert!(LOG_FILE_NAME.ends_with(".log"));
}
