//! Export of the current view list to CSV or JSON.

pub mod csv_export;
pub mod json_export;
