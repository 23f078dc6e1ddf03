//! UI sub-modules for LogSleuth.
//!
//! Each sub-module adds rendering methods to [`crate::app::LogSleuthApp`]
//! via `impl` blocks, keeping UI code separate from state management.

pub mod detail_panel;
pub mod filter_bar;
pub mod log_table;
pub mod status_bar;
pub mod theme;
pub mod toolbar;
