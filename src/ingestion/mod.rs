//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`read_frame_from_path`] (from [`frame_reader`])
//! which:
//!
//! - opens the CSV source and resolves the reserved columns (configurable via
//!   [`FrameReadOptions`])
//! - performs ingestion into an in-memory [`crate::frame::DataFrame`] of
//!   [`crate::grid::TimeVaryingGrid`]s
//! - optionally reports success/failure/alerts to an [`IngestObserver`]
//!
//! The pieces are also available individually:
//! - [`csv`] for the tabular source
//! - [`columns`] for column-role resolution
//! - [`frame_reader`] for reader-based ingestion without a path

pub mod columns;
pub mod csv;
pub mod frame_reader;
pub mod observability;

pub use columns::{ColumnLayout, ColumnSelection};
pub use csv::{CsvTable, CsvTableOptions};
pub use frame_reader::{decode_cell, read_frame, read_frame_from_path, FrameReadOptions};
pub use observability::{
    CompositeObserver, FileObserver, IngestContext, IngestObserver, IngestSeverity, IngestStats,
    StdErrObserver,
};
