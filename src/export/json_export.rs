//! JSON export for the visible log records.
//!
//! Serialises the original objects as a pretty-printed JSON array, so an
//! export can be opened again as a `.json` file.

use crate::core::log_record::LogRecord;
use crate::util::error::LogSleuthError;
use std::path::Path;

/// Export the given records to a JSON file at `path`.
///
/// # Errors
/// Returns [`LogSleuthError::Export`] if the file cannot be created or written.
pub fn export_json(records: &[LogRecord], path: &Path) -> Result<(), LogSleuthError> {
    crate::export::csv_export::validate_export_path(path)?;
    let file = std::fs::File::create(path)
        .map_err(|e| LogSleuthError::Export(format!("Failed to create JSON file: {e}")))?;

    let objects: Vec<&serde_json::Map<String, serde_json::Value>> =
        records.iter().map(|r| &r.fields).collect();

    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &objects)
        .map_err(|e| LogSleuthError::Export(format!("Failed to write JSON: {e}")))?;

    // Explicit flush so I/O errors are not silently swallowed by BufWriter::drop.
    use std::io::Write;
    writer
        .flush()
        .map_err(|e| LogSleuthError::Export(format!("Failed to flush JSON output: {e}")))?;

    tracing::info!(
        "Exported {} records to JSON: {}",
        records.len(),
        path.display()
    );
    Ok(())
}
