//! Log file ingestion: suffix dispatch, record boundaries, and parsing.
//!
//! [`ingest`] turns the full text of one file into an [`IngestOutcome`]:
//! the normalised records plus one [`Diagnostic`] for every unit that was
//! dropped. Per-line failures never abort a batch; only an unsupported
//! suffix or a `.json` file with nothing parseable in it does.
//!
//! Ingestion is synchronous and all-or-nothing from the caller's point of
//! view: the outcome replaces the previous record list wholesale.

use std::path::Path;

use serde_json::Value;

use crate::core::log_record::LogRecord;
use crate::core::source::FileSource;
use crate::util::error::{LogSleuthError, Result};

/// How a file's content is split into records, chosen by file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.json`: one JSON array (or object), falling back to JSON Lines.
    Json,
    /// `.log`: always JSON Lines.
    Log,
}

impl FileKind {
    /// Dispatch on the file-name suffix (ASCII case-insensitive).
    ///
    /// # Errors
    /// Returns [`LogSleuthError::UnsupportedFileType`] for any other suffix.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(FileKind::Json),
            Some("log") => Ok(FileKind::Log),
            _ => Err(LogSleuthError::UnsupportedFileType {
                name: name.to_owned(),
            }),
        }
    }
}

/// Why a unit of input was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line is not valid JSON.
    MalformedLine,
    /// The unit parsed, but is not a JSON object.
    NotAnObject,
}

/// A non-fatal, per-unit ingestion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number for line-delimited input; `None` for elements
    /// of a top-level array.
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of ingesting one file.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    /// Records in input order.
    pub records: Vec<LogRecord>,
    /// One entry per dropped unit, in input order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Ingest the text of a file named `name`.
///
/// # Errors
/// - [`LogSleuthError::UnsupportedFileType`] if the suffix is not `.json`
///   or `.log`.
/// - [`LogSleuthError::MalformedJson`] if a `.json` file starting with `[`
///   is not a valid array, or if it is neither one JSON value nor yields a
///   single record as JSON Lines.
pub fn ingest(name: &str, content: &str) -> Result<IngestOutcome> {
    let kind = FileKind::from_name(name)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let outcome = match kind {
        FileKind::Json => ingest_json(content)?,
        FileKind::Log => ingest_lines(content),
    };

    tracing::info!(
        "Ingested {}: {} records, {} dropped",
        name,
        outcome.records.len(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

/// Ingest raw bytes, decoding them as UTF-8.
///
/// Invalid sequences are replaced with U+FFFD rather than rejected, the way
/// a text file reader would.
pub fn ingest_bytes(name: &str, bytes: &[u8]) -> Result<IngestOutcome> {
    let text = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = text {
        tracing::warn!("{} is not valid UTF-8; invalid bytes were replaced", name);
    }
    ingest(name, &text)
}

/// Read `path` through `source` and ingest it.
///
/// The suffix is checked before anything is read, so an unsupported file is
/// never opened.
///
/// # Errors
/// Anything [`ingest`] returns, plus [`LogSleuthError::Read`] when the
/// source fails.
pub fn load_file(source: &dyn FileSource, path: &Path) -> Result<IngestOutcome> {
    let bytes = read_checked(source, path)?;
    ingest_bytes(&display_name(path), &bytes)
}

/// Check the suffix of `path`, then read it through `source`.
///
/// # Errors
/// [`LogSleuthError::UnsupportedFileType`] without touching `source`, or
/// whatever the source returns.
pub fn read_checked(source: &dyn FileSource, path: &Path) -> Result<Vec<u8>> {
    FileKind::from_name(&display_name(path))?;
    source.read(path)
}

/// File name component of `path`, for dispatch and display.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `.json` content: a whole JSON value if it parses as one, else JSON Lines.
fn ingest_json(content: &str) -> Result<IngestOutcome> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(IngestOutcome::default());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => Ok(from_array(items)),
        Ok(Value::Object(map)) => Ok(IngestOutcome {
            records: vec![LogRecord::from_object(map)],
            diagnostics: Vec::new(),
        }),
        Ok(other) => {
            let diag = not_an_object(None, &other);
            tracing::warn!("{}", diag);
            Ok(IngestOutcome {
                records: Vec::new(),
                diagnostics: vec![diag],
            })
        }
        Err(e) if trimmed.starts_with('[') => {
            tracing::error!("Failed to parse JSON array: {}", e);
            Err(LogSleuthError::MalformedJson(e.to_string()))
        }
        Err(e) => {
            let outcome = ingest_lines(content);
            // Not a single value and not one record per line either.
            if outcome.records.is_empty() && !outcome.diagnostics.is_empty() {
                tracing::error!("Failed to parse JSON document: {}", e);
                return Err(LogSleuthError::MalformedJson(e.to_string()));
            }
            Ok(outcome)
        }
    }
}

fn from_array(items: Vec<Value>) -> IngestOutcome {
    let mut outcome = IngestOutcome {
        records: Vec::with_capacity(items.len()),
        diagnostics: Vec::new(),
    };
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => outcome.records.push(LogRecord::from_object(map)),
            other => {
                let mut diag = not_an_object(None, &other);
                diag.message = format!("array element {idx}: {}", diag.message);
                tracing::warn!("{}", diag);
                outcome.diagnostics.push(diag);
            }
        }
    }
    outcome
}

/// JSON Lines: every non-blank line is parsed on its own; failures are
/// recorded and skipped.
fn ingest_lines(content: &str) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => outcome.records.push(LogRecord::from_object(map)),
            Ok(other) => {
                let diag = not_an_object(Some(line_no), &other);
                tracing::warn!("{}", diag);
                outcome.diagnostics.push(diag);
            }
            Err(e) => {
                let diag = Diagnostic {
                    line: Some(line_no),
                    kind: DiagnosticKind::MalformedLine,
                    message: format!("malformed JSON: {e}"),
                };
                tracing::warn!("{}", diag);
                outcome.diagnostics.push(diag);
            }
        }
    }

    outcome
}

fn not_an_object(line: Option<usize>, value: &Value) -> Diagnostic {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Diagnostic {
        line,
        kind: DiagnosticKind::NotAnObject,
        message: format!("expected a JSON object, found {kind}"),
    }
}
