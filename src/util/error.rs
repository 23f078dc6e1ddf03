//! Unified error types for LogSleuth.
//!
//! All fallible operations throughout the codebase return `Result<T, LogSleuthError>`.
//! Failures are contained at the ingestion boundary and never reach the
//! rendering layer.

use std::path::PathBuf;

/// Unified error type used throughout LogSleuth.
///
/// Each variant captures enough context to produce an actionable message for
/// the error banner or for log output.
#[derive(Debug, thiserror::Error)]
pub enum LogSleuthError {
    /// The file name does not end in a recognised suffix (`.json`, `.log`).
    #[error("Unsupported file type: {name} (expected .json or .log)")]
    UnsupportedFileType {
        /// The file name as selected by the user.
        name: String,
    },

    /// A `.json` file could not be parsed as an array, an object or JSON
    /// Lines. The whole load is aborted; no partial record list is produced.
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// Reading the selected file failed at the file-access layer.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to the system clipboard failed.
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// Export (CSV or JSON) failed, typically an I/O error.
    #[error("Export failed: {0}")]
    Export(String),

    /// Catch-all for I/O errors (file writes, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogSleuthError>;

/// Build a [`LogSleuthError::Read`] for the given path.
pub fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> LogSleuthError {
    LogSleuthError::Read {
        path: path.into(),
        source,
    }
}
