//! `gridframe` is a small library for ingesting time- and position-tagged CSV
//! data into an in-memory [`frame::DataFrame`] of queryable
//! [`grid::TimeVaryingGrid`]s.
//!
//! The primary entrypoint is [`ingestion::read_frame_from_path`], which opens
//! a CSV source, splits its columns into reserved roles (time plus three
//! coordinates) and data fields, and builds one time-varying grid per data
//! field (configurable via [`ingestion::FrameReadOptions`]).
//!
//! ## What a source looks like
//!
//! Every row tags one observation per data column with a timestamp and a
//! position:
//!
//! ```text
//! t,x,y,z,temperature,wind_speed
//! 0.0,0.0,0.0,0.0,20.5,1.0
//! 0.0,1.0,0.0,0.0,20.8,1.2
//! 1.0,0.0,0.0,0.0,21.1,0.9
//! ```
//!
//! - The reserved columns are found by name or by position
//!   ([`ingestion::ColumnSelection`]); by default time is the first column
//!   and the coordinates are the next three.
//! - Every other column becomes one field in the frame, keyed by its header
//!   name (or `var<index>` for headerless sources).
//! - Rows sharing a timestamp form one session of the field's grid; queries
//!   step to the session at or before the query time and answer with the
//!   nearest sample.
//!
//! Keys, times, and values all decode through [`std::str::FromStr`], so their
//! concrete types are caller-chosen (see [`ingestion::decode_cell`]).
//!
//! ## Quick example: read a frame
//!
//! ```
//! use std::io::Cursor;
//!
//! use gridframe::frame::DataFrame;
//! use gridframe::grid::{TimeVaryingGrid, Vec3};
//! use gridframe::ingestion::{read_frame, ColumnSelection, CsvTable, CsvTableOptions};
//!
//! # fn main() -> Result<(), gridframe::IngestError> {
//! let csv = "\
//! t,x,y,z,temperature
//! 0.0,0.0,0.0,0.0,20.5
//! 0.0,1.0,0.0,0.0,20.8
//! 1.0,0.0,0.0,0.0,21.1
//! ";
//! let table = CsvTable::from_reader(Cursor::new(csv), "readings.csv", &CsvTableOptions::default())?;
//! let frame: DataFrame<String, TimeVaryingGrid<f64, f64>> =
//!     read_frame(table, &ColumnSelection::by_name("t", ["x", "y", "z"]))?;
//!
//! let temperature = frame.get(&"temperature".to_string())?;
//! assert_eq!(temperature.session_count(), 2);
//! assert_eq!(
//!     temperature.value_at(&0.5, Vec3::new(0.9, 0.0, 0.0)),
//!     Some(&20.8)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV source, column-role resolution, and frame reading
//! - [`frame`]: the keyed field container
//! - [`grid`]: time-varying volumetric grids and their builder
//! - [`sampling`]: parallel read-side sampling of built grids
//! - [`error`]: error types used across ingestion and lookup
//!
//! ## Sampling example
//!
//! ```
//! use gridframe::grid::{GridBuilder, Vec3};
//! use gridframe::sampling::{GridSampler, Lattice, SamplerOptions};
//!
//! let mut builder = GridBuilder::new();
//! builder.add_point(0.0, Vec3::new(0.0, 0.0, 0.0), 1.0);
//! builder.add_point(0.0, Vec3::new(1.0, 0.0, 0.0), 2.0);
//! let grid = builder.build();
//!
//! let sampler = GridSampler::new(SamplerOptions::default());
//! let lattice = Lattice::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), [2, 1, 1]);
//! let swept = sampler.sample_lattice(&grid, &0.0, &lattice);
//! assert_eq!(swept, vec![Some(1.0), Some(2.0)]);
//! ```

pub mod error;
pub mod frame;
pub mod grid;
pub mod ingestion;
pub mod sampling;

pub use error::{IngestError, IngestResult};
