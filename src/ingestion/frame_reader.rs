//! The ingestion pipeline: CSV rows into a frame of time-varying grids.
//!
//! - [`read_frame`] drives an open [`CsvTable`] through column resolution,
//!   typed decoding, and per-field grid building in a single pass over the
//!   rows.
//! - [`read_frame_from_path`] wraps it with file opening and, when an
//!   [`IngestObserver`] is configured, success/failure/alert reporting.
//!
//! A read either produces a complete frame or fails on the first bad row;
//! no partial frame is ever returned.

use std::fmt;
use std::hash::Hash;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{IngestError, IngestResult};
use crate::frame::DataFrame;
use crate::grid::{GridBuilder, TimeVaryingGrid, Vec3};

use super::columns::ColumnSelection;
use super::csv::{CsvTable, CsvTableOptions};
use super::observability::{IngestContext, IngestObserver, IngestSeverity, IngestStats};

/// Decode one cell into any [`FromStr`] type, with source context on failure.
///
/// Surrounding whitespace is trimmed before parsing; the untrimmed text is
/// preserved in the error. `row` is the 1-based line in the source, counting
/// the header line if there is one.
pub fn decode_cell<X>(path: &str, row: usize, column: &str, raw: &str) -> IngestResult<X>
where
    X: FromStr,
    X::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: X::Err| IngestError::ParseError {
            path: path.to_string(),
            row,
            column: column.to_string(),
            raw: raw.to_string(),
            message: e.to_string(),
        })
}

/// Read every row of `table` into a frame of per-field time-varying grids.
///
/// `selection` names the reserved time and coordinate columns; every other
/// column becomes one field in the frame, keyed by its header name (or
/// `var<index>` when the source has no header). Duplicate header names
/// collapse to a single field holding the rightmost column. Rows feed the
/// field grids in source order, so duplicate timestamps and positions resolve
/// by arrival. Keys parse into `K` only after every row has decoded, so a
/// malformed cell is reported ahead of a malformed key.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use gridframe::frame::DataFrame;
/// use gridframe::grid::{TimeVaryingGrid, Vec3};
/// use gridframe::ingestion::{read_frame, ColumnSelection, CsvTable, CsvTableOptions};
///
/// # fn main() -> Result<(), gridframe::IngestError> {
/// let csv = "t,x,y,z,temp\n0.0,0.0,0.0,0.0,20.5\n1.0,0.0,0.0,0.0,21.0\n";
/// let table = CsvTable::from_reader(Cursor::new(csv), "readings.csv", &CsvTableOptions::default())?;
///
/// let frame: DataFrame<String, TimeVaryingGrid<f64, f64>> =
///     read_frame(table, &ColumnSelection::by_name("t", ["x", "y", "z"]))?;
///
/// let temp = frame.get(&"temp".to_string())?;
/// assert_eq!(temp.value_at(&1.0, Vec3::new(0.0, 0.0, 0.0)), Some(&21.0));
/// # Ok(())
/// # }
/// ```
pub fn read_frame<K, T, V, R>(
    table: CsvTable<R>,
    selection: &ColumnSelection,
) -> IngestResult<DataFrame<K, TimeVaryingGrid<T, V>>>
where
    K: FromStr + Eq + Hash,
    K::Err: fmt::Display,
    T: FromStr + PartialOrd + Clone,
    T::Err: fmt::Display,
    V: FromStr,
    V::Err: fmt::Display,
    R: io::Read,
{
    read_frame_counted(table, selection).map(|(frame, _)| frame)
}

/// Like [`read_frame`], but also reports how many data rows were consumed.
fn read_frame_counted<K, T, V, R>(
    table: CsvTable<R>,
    selection: &ColumnSelection,
) -> IngestResult<(DataFrame<K, TimeVaryingGrid<T, V>>, usize)>
where
    K: FromStr + Eq + Hash,
    K::Err: fmt::Display,
    T: FromStr + PartialOrd + Clone,
    T::Err: fmt::Display,
    V: FromStr,
    V::Err: fmt::Display,
    R: io::Read,
{
    let path = table.path().to_string();
    let layout = selection.resolve(table.header(), table.num_columns(), &path)?;

    // Key text is fixed by the header up front; parsing into K waits until
    // every row has decoded.
    let key_texts: Vec<String> = layout
        .data
        .iter()
        .map(|&index| match table.header().get(index) {
            Some(name) => name.clone(),
            None => format!("var{index}"),
        })
        .collect();

    let time_label = column_label(table.header(), layout.time);
    let coordinate_labels = layout
        .coordinates
        .map(|index| column_label(table.header(), index));
    let data_labels: Vec<String> = layout
        .data
        .iter()
        .map(|&index| column_label(table.header(), index))
        .collect();

    let mut builders: Vec<GridBuilder<T, V>> =
        (0..layout.data.len()).map(|_| GridBuilder::new()).collect();

    let first_line = table.first_data_line();
    let mut rows = 0usize;
    for (offset, record) in table.rows().enumerate() {
        let record = record?;
        let line = first_line + offset;

        let time: T = decode_cell(
            &path,
            line,
            &time_label,
            record.get(layout.time).unwrap_or(""),
        )?;
        let x = decode_cell(
            &path,
            line,
            &coordinate_labels[0],
            record.get(layout.coordinates[0]).unwrap_or(""),
        )?;
        let y = decode_cell(
            &path,
            line,
            &coordinate_labels[1],
            record.get(layout.coordinates[1]).unwrap_or(""),
        )?;
        let z = decode_cell(
            &path,
            line,
            &coordinate_labels[2],
            record.get(layout.coordinates[2]).unwrap_or(""),
        )?;
        let position = Vec3::new(x, y, z);

        for ((builder, &index), label) in builders.iter_mut().zip(&layout.data).zip(&data_labels) {
            let value: V = decode_cell(&path, line, label, record.get(index).unwrap_or(""))?;
            builder.add_point(time.clone(), position, value);
        }
        rows += 1;
    }

    let keys = key_texts
        .iter()
        .map(|text| field_key::<K>(text, &path))
        .collect::<IngestResult<Vec<K>>>()?;

    let mut frame = DataFrame::new();
    for (key, builder) in keys.into_iter().zip(builders) {
        *frame.get_or_insert(key) = builder.build();
    }

    Ok((frame, rows))
}

fn field_key<K>(text: &str, path: &str) -> IngestResult<K>
where
    K: FromStr,
    K::Err: fmt::Display,
{
    K::from_str(text).map_err(|e| IngestError::InvalidKey {
        path: path.to_string(),
        key: text.to_string(),
        message: e.to_string(),
    })
}

fn column_label(header: &[String], index: usize) -> String {
    match header.get(index) {
        Some(name) => name.clone(),
        None => index.to_string(),
    }
}

/// Options for path-based frame reading.
///
/// Use [`Default`] for common cases: header row expected, comma-delimited,
/// time in the first column and coordinates in the next three, no observer.
#[derive(Clone)]
pub struct FrameReadOptions {
    /// CSV parsing options.
    pub csv: CsvTableOptions,
    /// Which columns play the time and coordinate roles.
    pub columns: ColumnSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestSeverity,
}

impl fmt::Debug for FrameReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameReadOptions")
            .field("csv", &self.csv)
            .field("columns", &self.columns)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for FrameReadOptions {
    fn default() -> Self {
        Self {
            csv: CsvTableOptions::default(),
            columns: ColumnSelection::default(),
            observer: None,
            alert_at_or_above: IngestSeverity::Critical,
        }
    }
}

/// Path-based frame reading entry point.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and field count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use gridframe::frame::DataFrame;
/// use gridframe::grid::TimeVaryingGrid;
/// use gridframe::ingestion::{
///     read_frame_from_path, ColumnSelection, FrameReadOptions, StdErrObserver,
/// };
///
/// # fn main() -> Result<(), gridframe::IngestError> {
/// let options = FrameReadOptions {
///     columns: ColumnSelection::by_name("t", ["x", "y", "z"]),
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
///
/// let frame: DataFrame<String, TimeVaryingGrid<f64, f64>> =
///     read_frame_from_path("readings.csv", &options)?;
/// println!("fields={}", frame.len());
/// # Ok(())
/// # }
/// ```
pub fn read_frame_from_path<K, T, V>(
    path: impl AsRef<Path>,
    options: &FrameReadOptions,
) -> IngestResult<DataFrame<K, TimeVaryingGrid<T, V>>>
where
    K: FromStr + Eq + Hash,
    K::Err: fmt::Display,
    T: FromStr + PartialOrd + Clone,
    T::Err: fmt::Display,
    V: FromStr,
    V::Err: fmt::Display,
{
    let path = path.as_ref();
    let ctx = IngestContext {
        path: path.to_path_buf(),
    };

    let result = CsvTable::open_with(path, &options.csv)
        .and_then(|table| read_frame_counted(table, &options.columns));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((frame, rows)) => obs.on_success(
                &ctx,
                IngestStats {
                    rows: *rows,
                    fields: frame.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(frame, _)| frame)
}

fn severity_for_error(e: &IngestError) -> IngestSeverity {
    match e {
        IngestError::Io(_) => IngestSeverity::Critical,
        IngestError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => IngestSeverity::Critical,
            _ => IngestSeverity::Error,
        },
        _ => IngestSeverity::Error,
    }
}
