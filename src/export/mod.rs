//! Export of the current view to CSV or JSON.
//!
//! Shaping ([`format`]) is pure and runs on the plugin thread; delivery
//! ([`sink`]) touches the filesystem and runs on the background worker.

pub mod format;
pub mod sink;

pub use format::{
    build_export, select_records, to_csv, to_json, EmptyExportPolicy, ExportFile, ExportFormat,
    CSV_HEADER,
};
pub use sink::{ExportSink, FileSink};
