//! Application-wide constants for LogSleuth.
//!
//! Centralising magic numbers and configuration defaults here keeps the rest
//! of the codebase clean and makes tuning straightforward.

/// Application display name used in titles, dialogs, etc.
pub const APP_NAME: &str = "LogSleuth";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File suffixes accepted by the open dialog and by ingestion.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "log"];

/// Placeholder rendered wherever a record lacks a field.
pub const PLACEHOLDER: &str = "N/A";

/// How long the "Copied!" acknowledgment stays visible (seconds).
pub const COPY_ACK_SECS: u64 = 2;

/// How long export result messages stay visible (seconds).
pub const EXPORT_MESSAGE_SECS: u64 = 4;

/// Maximum number of diagnostics retained in memory.
///
/// A `.log` file with millions of malformed lines would otherwise grow the
/// list without bound; the excess is still logged via `tracing`.
pub const MAX_DIAGNOSTICS: usize = 200;

/// Debounce delay for the search box (milliseconds).
/// Prevents excessive re-filtering while the user is still typing.
pub const FILTER_DEBOUNCE_MS: u64 = 150;

/// Row height in the virtual-scrolled log table (in logical pixels).
pub const TABLE_ROW_HEIGHT: f32 = 24.0;

/// Number of characters shown in the table's message column before
/// truncation with an ellipsis.
pub const MESSAGE_TRUNCATE_CHARS: usize = 200;

/// Rows skipped by Page Up / Page Down.
pub const PAGE_JUMP_ROWS: usize = 20;

/// Application data subdirectory name for logs.
pub const APP_DATA_DIR: &str = "LogSleuth";

/// Log subdirectory name under the app data directory.
pub const LOG_DIR: &str = "logs";

/// Log file name for persistent diagnostic logging.
pub const LOG_FILE_NAME: &str = "logsleuth.log";

/// Maximum log file size in bytes before rotation (5 MB).
pub const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;
