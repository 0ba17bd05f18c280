//! Output module for exporting the harvested dataset
//!
//! The only output format is quoted, comma-separated tabular text written to
//! a single file. Export failure is the one error allowed to fail the whole
//! run, since all recoverable work is already done by then.

mod csv;

pub use csv::{export_buildings, format_csv, ExportError, ExportResult};
