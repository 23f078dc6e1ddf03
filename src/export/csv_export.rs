//! CSV export for the visible log records.
//!
//! Writes the current view list to a CSV file with one row per record.

use crate::core::log_record::LogRecord;
use crate::util::error::LogSleuthError;
use crate::util::time::format_detail_timestamp;
use std::path::Path;

/// Check that `path` can be written before a background export starts.
///
/// # Errors
/// Returns [`LogSleuthError::Export`] if the parent directory is missing or
/// is not a directory, and [`LogSleuthError::Io`] if a bare file name is
/// given and the working directory cannot be determined.
pub fn validate_export_path(path: &Path) -> Result<(), LogSleuthError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    if !parent.exists() {
        return Err(LogSleuthError::Export(format!(
            "Directory does not exist: {}",
            parent.display()
        )));
    }
    if !parent.is_dir() {
        return Err(LogSleuthError::Export(format!(
            "Export parent is not a directory: {}",
            parent.display()
        )));
    }
    Ok(())
}

/// Export the given records to a CSV file at `path`.
///
/// Columns: Timestamp, Level, Thread, Logger, Message, Exception. The
/// timestamp column uses the full detail format when the record's timestamp
/// was understood, else its raw text.
///
/// # Errors
/// Returns [`LogSleuthError::Export`] if the file cannot be created or written.
pub fn export_csv(records: &[LogRecord], path: &Path) -> Result<(), LogSleuthError> {
    validate_export_path(path)?;
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| LogSleuthError::Export(format!("Failed to create CSV file: {e}")))?;

    writer
        .write_record(["Timestamp", "Level", "Thread", "Logger", "Message", "Exception"])
        .map_err(|e| LogSleuthError::Export(format!("Failed to write CSV header: {e}")))?;

    for record in records {
        let timestamp = match &record.timestamp_utc {
            Some(ts) => format_detail_timestamp(ts),
            None => record.timestamp_text().into_owned(),
        };
        let exception = exception_text(record);
        writer
            .write_record([
                timestamp.as_str(),
                record.level_text(),
                record.thread_text(),
                record.logger_text(),
                record.message_text(),
                exception.as_str(),
            ])
            .map_err(|e| LogSleuthError::Export(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| LogSleuthError::Export(format!("Failed to flush CSV: {e}")))?;

    tracing::info!(
        "Exported {} records to CSV: {}",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Event-log `Exception` text, or the thrown message, or empty.
fn exception_text(record: &LogRecord) -> String {
    if let Some(text) = &record.exception {
        return text.clone();
    }
    record
        .thrown
        .as_ref()
        .and_then(|t| t.message.clone())
        .unwrap_or_default()
}
