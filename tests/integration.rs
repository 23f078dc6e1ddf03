//! Integration tests for LogSleuth.
//!
//! These tests exercise the library through its public API only: ingestion,
//! the query engine, the viewer state and export working together on
//! realistic log content.

mod constants_validation;
mod export_validation;
mod query_properties;
