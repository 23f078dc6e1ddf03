//! Text renderings of records for the clipboard and the detail panel.

use serde_json::Value;

use crate::core::log_record::{Dialect, LogRecord, StackFrame, ThrownError};
use crate::util::constants::PLACEHOLDER;

/// One-line summary of a record, as copied by the row "Copy" action.
///
/// Event-log records list timestamp, level and message template; every
/// other record lists timestamp, level, thread and message.
pub fn row_summary(record: &LogRecord) -> String {
    match record.dialect {
        Dialect::Event => format!(
            "Timestamp: {}, Level: {}, Message: {}",
            record.timestamp_text(),
            record.level_text(),
            record.message_text()
        ),
        Dialect::Application | Dialect::Unknown => format!(
            "Timestamp: {}, Level: {}, Thread: {}, Message: {}",
            record.timestamp_text(),
            record.level_text(),
            record.thread_text(),
            record.message_text()
        ),
    }
}

/// Render one frame as `Class.method(file:line)`.
pub fn format_frame(frame: &StackFrame) -> String {
    let class = frame.class.as_deref().unwrap_or("<unknown>");
    let method = frame.method.as_deref().unwrap_or("<unknown>");
    let file = frame.file.as_deref().unwrap_or("Unknown Source");
    match frame.line {
        Some(line) => format!("{class}.{method}({file}:{line})"),
        None => format!("{class}.{method}({file})"),
    }
}

/// All frames of a thrown error, one per line.
pub fn stack_trace_text(thrown: &ThrownError) -> String {
    thrown
        .frames
        .iter()
        .map(format_frame)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON for nested values such as event-log `Properties`.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
}
