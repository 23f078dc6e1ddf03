//! Core domain modules for LogSleuth.
//!
//! Contains the record model, ingestion, the query engine (filter + sort),
//! the viewer state, text formatting helpers, and the file/clipboard
//! capabilities the GUI injects.

pub mod clipboard;
pub mod format;
pub mod ingest;
pub mod log_record;
pub mod query;
pub mod source;
pub mod state;
