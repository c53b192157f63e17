//! CSV tabular sources.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::IngestResult;

/// Options controlling how a [`CsvTable`] reads its input.
///
/// Use [`Default`] for comma-separated files with a header row.
#[derive(Debug, Clone)]
pub struct CsvTableOptions {
    /// Whether the first row is a header of column names.
    pub has_header: bool,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for CsvTableOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

/// A delimited text source with an optional header row.
///
/// The table exposes what ingestion needs up front (path label, header,
/// column count) and hands out its rows exactly once: [`CsvTable::rows`]
/// consumes the table, so re-ingesting a file means opening it again.
pub struct CsvTable<R> {
    path: String,
    header: Vec<String>,
    num_columns: usize,
    reader: csv::Reader<R>,
}

impl<R> fmt::Debug for CsvTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvTable")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("num_columns", &self.num_columns)
            .finish()
    }
}

impl CsvTable<File> {
    /// Open a CSV file with default options (header row expected).
    pub fn open(path: impl AsRef<Path>) -> IngestResult<Self> {
        Self::open_with(path, &CsvTableOptions::default())
    }

    /// Open a CSV file.
    ///
    /// A file that cannot be opened surfaces as an I/O error.
    pub fn open_with(path: impl AsRef<Path>, options: &CsvTableOptions) -> IngestResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file, path.display().to_string(), options)
    }
}

impl<R: io::Read> CsvTable<R> {
    /// Wrap an in-memory or streaming CSV reader.
    ///
    /// `source` is the diagnostic label carried into every error raised from
    /// this table; [`CsvTable::open`] uses the file path for it.
    pub fn from_reader(
        reader: R,
        source: impl Into<String>,
        options: &CsvTableOptions,
    ) -> IngestResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(options.has_header)
            .delimiter(options.delimiter)
            .from_reader(reader);
        Self::from_parts(reader, source.into(), options.has_header)
    }

    fn from_parts(
        mut reader: csv::Reader<R>,
        path: String,
        has_header: bool,
    ) -> IngestResult<Self> {
        // The csv crate hands the first row back here whether or not it is a
        // header; with `has_header` off it is re-yielded as data by `rows()`.
        let first = reader.headers()?.clone();
        let num_columns = first.len();
        let header = if has_header {
            first.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            header,
            num_columns,
            reader,
        })
    }

    /// Diagnostic identifier for this source.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Ordered column names; empty when the source has no header row.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of columns, taken from the first row.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// 1-based line number of the first data row (a header row counts as
    /// line 1).
    pub fn first_data_line(&self) -> usize {
        if self.header.is_empty() { 1 } else { 2 }
    }

    /// Consume the table into its single-pass row iterator.
    pub fn rows(self) -> Rows<R> {
        Rows {
            inner: self.reader.into_records(),
        }
    }
}

/// Single-pass iterator over a table's data rows.
pub struct Rows<R> {
    inner: csv::StringRecordsIntoIter<R>,
}

impl<R: io::Read> Iterator for Rows<R> {
    type Item = IngestResult<csv::StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|record| record.map_err(Into::into))
    }
}
