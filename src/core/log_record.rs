//! Canonical data structure for a single structured log entry.
//!
//! Every parsed JSON object is normalised into a [`LogRecord`] once, at
//! ingestion. The record keeps the original top-level object (an open shape:
//! filtering and arbitrary-key sorting work on it) alongside canonical
//! optional fields that the UI reads without caring which dialect the entry
//! was written in.
//!
//! Two dialects are recognised:
//! - **Application** (log4j2-style JSON layout): `instant.epochSecond`,
//!   `level`, `thread`, `message`, `loggerName`, `thrown`.
//! - **Event** (Serilog-style): `Timestamp`, `Level`, `MessageTemplate`,
//!   `Properties`, `Exception`.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::util::constants::PLACEHOLDER;
use crate::util::time;

/// Keys whose presence marks an application-log entry.
const APPLICATION_KEYS: &[&str] = &["instant", "loggerName", "thrown", "level", "thread"];

/// Keys whose presence marks an event-log entry.
const EVENT_KEYS: &[&str] = &["Timestamp", "Level", "MessageTemplate", "Properties", "Exception"];

/// Which input schema a record was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Structured application log (`instant`, `level`, `thread`, ...).
    Application,
    /// Event log (`Timestamp`, `Level`, `MessageTemplate`, ...).
    Event,
    /// Neither schema's keys are present.
    Unknown,
}

impl Dialect {
    /// Detect the dialect from the top-level keys of a parsed object.
    pub fn detect(fields: &Map<String, Value>) -> Self {
        if APPLICATION_KEYS.iter().any(|k| fields.contains_key(*k)) {
            Dialect::Application
        } else if EVENT_KEYS.iter().any(|k| fields.contains_key(*k)) {
            Dialect::Event
        } else {
            Dialect::Unknown
        }
    }
}

/// Severity bucket derived from a record's free-text level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    Unknown,
}

impl Severity {
    /// Map a level string onto a severity bucket (case-insensitive).
    ///
    /// Covers the log4j2 names (`ERROR`, `WARN`, ...) and the Serilog names
    /// (`Error`, `Warning`, `Information`, `Verbose`, ...).
    pub fn from_level(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "fatal" | "critical" | "crit" => Severity::Fatal,
            "error" | "err" => Severity::Error,
            "warn" | "warning" => Severity::Warning,
            "info" | "information" => Severity::Info,
            "debug" => Severity::Debug,
            "trace" | "verbose" => Severity::Trace,
            _ => Severity::Unknown,
        }
    }

    /// `true` for the buckets that get error-row styling.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Fatal | Severity::Error)
    }
}

/// One frame of an application-log stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub class: Option<String>,
    pub method: Option<String>,
    pub file: Option<String>,
    pub line: Option<i64>,
}

impl StackFrame {
    fn from_value(value: &Value) -> Self {
        let line = match value.get("line") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        Self {
            class: text_field(value, "class"),
            method: text_field(value, "method"),
            file: text_field(value, "file"),
            line,
        }
    }
}

/// The `thrown` block of an application-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrownError {
    /// Exception class name (`name` in the log4j2 layout), if present.
    pub name: Option<String>,
    pub message: Option<String>,
    /// Frames of `extendedStackTrace`, in order. Empty when absent.
    pub frames: Vec<StackFrame>,
}

impl ThrownError {
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let frames = value
            .get("extendedStackTrace")
            .and_then(Value::as_array)
            .map(|frames| frames.iter().map(StackFrame::from_value).collect())
            .unwrap_or_default();
        Some(Self {
            name: text_field(value, "name"),
            message: text_field(value, "message"),
            frames,
        })
    }
}

/// A single normalised log entry.
///
/// `fields` is the original object exactly as parsed; everything else is
/// derived from it by [`LogRecord::from_object`] and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Original top-level fields, as parsed.
    pub fields: Map<String, Value>,

    /// Dialect detected from the top-level keys.
    pub dialect: Dialect,

    /// Raw timestamp value: `instant.epochSecond` or `Timestamp`.
    pub timestamp: Option<Value>,

    /// The timestamp converted to UTC, when it could be interpreted.
    pub timestamp_utc: Option<DateTime<Utc>>,

    /// Free-text level (`level` or `Level`).
    pub level: Option<String>,

    /// Severity bucket derived from `level`.
    pub severity: Severity,

    pub thread: Option<String>,

    /// `message`, or `MessageTemplate` for event logs.
    pub message: Option<String>,

    /// `loggerName`.
    pub logger: Option<String>,

    /// Parsed `thrown` block.
    pub thrown: Option<ThrownError>,

    /// Event-log `Properties`, kept as an arbitrary nested value.
    pub properties: Option<Value>,

    /// Event-log `Exception` text.
    pub exception: Option<String>,
}

impl LogRecord {
    /// Normalise one parsed JSON object.
    ///
    /// Canonical fields are looked up under both dialects' key names, so a
    /// record that mixes the two still gets every field it carries.
    pub fn from_object(fields: Map<String, Value>) -> Self {
        let dialect = Dialect::detect(&fields);

        let (timestamp, timestamp_utc) = normalise_timestamp(&fields);
        let level = first_text(&fields, &["level", "Level"]);
        let severity = level
            .as_deref()
            .map(Severity::from_level)
            .unwrap_or(Severity::Unknown);

        Self {
            dialect,
            timestamp,
            timestamp_utc,
            severity,
            level,
            thread: first_text(&fields, &["thread"]),
            message: first_text(&fields, &["message", "MessageTemplate"]),
            logger: first_text(&fields, &["loggerName"]),
            thrown: fields.get("thrown").and_then(ThrownError::from_value),
            properties: fields.get("Properties").filter(|v| !v.is_null()).cloned(),
            exception: first_text(&fields, &["Exception"]),
            fields,
        }
    }

    /// Raw timestamp as text (`100` for an epochSecond of 100), or the
    /// placeholder.
    pub fn timestamp_text(&self) -> Cow<'_, str> {
        match &self.timestamp {
            Some(v) => value_text(v),
            None => Cow::Borrowed(PLACEHOLDER),
        }
    }

    pub fn level_text(&self) -> &str {
        self.level.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn thread_text(&self) -> &str {
        self.thread.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn logger_text(&self) -> &str {
        self.logger.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Text for the table's message column.
    ///
    /// Falls back to the exception text, then to the thrown message, then
    /// to the placeholder.
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.exception.as_deref())
            .or_else(|| self.thrown.as_ref().and_then(|t| t.message.as_deref()))
            .unwrap_or(PLACEHOLDER)
    }

    /// Whether the row gets error styling.
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Value used when sorting by `key`.
    ///
    /// A top-level field named exactly `key` wins. Otherwise the canonical
    /// names `timestamp`, `level`, `thread`, `message` and `logger` resolve
    /// to the normalised fields, so one column sorts records of both
    /// dialects together. `timestamp` resolves to epoch milliseconds when the
    /// timestamp was understood.
    pub fn sort_value(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Some(v) = self.fields.get(key) {
            return Some(Cow::Borrowed(v));
        }
        let text = |s: &Option<String>| s.clone().map(|s| Cow::Owned(Value::String(s)));
        match key {
            "timestamp" => match (self.timestamp_utc, &self.timestamp) {
                (Some(ts), _) => Some(Cow::Owned(Value::from(ts.timestamp_millis()))),
                (None, Some(raw)) => Some(Cow::Borrowed(raw)),
                (None, None) => None,
            },
            "level" => text(&self.level),
            "thread" => text(&self.thread),
            "message" => text(&self.message),
            "logger" => text(&self.logger),
            _ => None,
        }
    }

    /// The original object as a JSON value (for export and raw copy).
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Default textual form of a JSON value.
///
/// Strings are returned without quotes; everything else (numbers, bools,
/// null, nested arrays and objects) uses its compact JSON text.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Extract the first non-null field among `keys` as text.
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| fields.get(*k))
        .find(|v| !v.is_null())
        .map(|v| value_text(v).into_owned())
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .filter(|v| !v.is_null())
        .map(|v| value_text(v).into_owned())
}

/// Find the raw timestamp value and its UTC interpretation.
fn normalise_timestamp(fields: &Map<String, Value>) -> (Option<Value>, Option<DateTime<Utc>>) {
    if let Some(instant) = fields.get("instant").filter(|v| v.is_object()) {
        let Some(epoch) = instant.get("epochSecond").filter(|v| !v.is_null()) else {
            return (None, None);
        };
        let nanos = instant
            .get("nanoOfSecond")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        let utc = match epoch.as_i64() {
            Some(secs) => time::from_epoch(secs, nanos),
            None => epoch.as_f64().and_then(time::from_epoch_number),
        };
        return (Some(epoch.clone()), utc);
    }

    match fields.get("Timestamp") {
        Some(v @ Value::String(s)) => (Some(v.clone()), time::parse_timestamp_text(s)),
        Some(v @ Value::Number(n)) => (Some(v.clone()), n.as_f64().and_then(time::from_epoch_number)),
        Some(Value::Null) | None => (None, None),
        Some(other) => (Some(other.clone()), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> LogRecord {
        match value {
            Value::Object(map) => LogRecord::from_object(map),
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_application_dialect_fields() {
        let r = record(json!({
            "instant": {"epochSecond": 100, "nanoOfSecond": 250000000},
            "level": "ERROR",
            "thread": "main",
            "message": "boom",
            "loggerName": "com.example.App",
            "thrown": {
                "message": "bad state",
                "extendedStackTrace": [
                    {"class": "com.example.App", "method": "run", "file": "App.java", "line": 42}
                ]
            }
        }));
        assert_eq!(r.dialect, Dialect::Application);
        assert_eq!(r.timestamp_text(), "100");
        assert_eq!(r.timestamp_utc.unwrap().timestamp_subsec_millis(), 250);
        assert_eq!(r.severity, Severity::Error);
        assert!(r.is_error());
        assert_eq!(r.logger_text(), "com.example.App");
        let thrown = r.thrown.unwrap();
        assert_eq!(thrown.message.as_deref(), Some("bad state"));
        assert_eq!(thrown.frames[0].line, Some(42));
    }

    #[test]
    fn test_event_dialect_fields() {
        let r = record(json!({
            "Timestamp": "2024-06-15T12:00:00Z",
            "Level": "Information",
            "MessageTemplate": "User {Id} logged in",
            "Properties": {"Id": 7}
        }));
        assert_eq!(r.dialect, Dialect::Event);
        assert_eq!(r.level_text(), "Information");
        assert_eq!(r.severity, Severity::Info);
        assert_eq!(r.message_text(), "User {Id} logged in");
        assert!(r.timestamp_utc.is_some());
        assert_eq!(r.properties, Some(json!({"Id": 7})));
        assert_eq!(r.thread_text(), PLACEHOLDER);
    }

    #[test]
    fn test_unknown_dialect_uses_placeholders() {
        let r = record(json!({"foo": 1}));
        assert_eq!(r.dialect, Dialect::Unknown);
        assert_eq!(r.timestamp_text(), PLACEHOLDER);
        assert_eq!(r.display_message(), PLACEHOLDER);
        assert_eq!(r.severity, Severity::Unknown);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let r = record(json!({"level": null, "message": "m"}));
        assert_eq!(r.level, None);
        assert_eq!(r.level_text(), PLACEHOLDER);
    }

    #[test]
    fn test_sort_value_prefers_raw_field() {
        let r = record(json!({"Level": "Warning", "level": "WARN"}));
        assert_eq!(r.sort_value("Level").unwrap().as_ref(), &json!("Warning"));
        assert_eq!(r.sort_value("level").unwrap().as_ref(), &json!("WARN"));
    }

    #[test]
    fn test_sort_value_canonical_fallback() {
        let r = record(json!({"Level": "Error", "MessageTemplate": "x", "Timestamp": 1_700_000_000}));
        assert_eq!(r.sort_value("level").unwrap().as_ref(), &json!("Error"));
        assert_eq!(r.sort_value("message").unwrap().as_ref(), &json!("x"));
        assert_eq!(
            r.sort_value("timestamp").unwrap().as_ref(),
            &json!(1_700_000_000_000i64)
        );
        assert!(r.sort_value("thread").is_none());
    }

    #[test]
    fn test_value_text_forms() {
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(12)), "12");
        assert_eq!(value_text(&json!(null)), "null");
        assert_eq!(value_text(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(Severity::from_level("WARN"), Severity::Warning);
        assert_eq!(Severity::from_level("Verbose"), Severity::Trace);
        assert_eq!(Severity::from_level("Critical"), Severity::Fatal);
        assert_eq!(Severity::from_level("custom"), Severity::Unknown);
    }
}
