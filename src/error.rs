use thiserror::Error;

/// Convenience result type for ingestion and frame access.
pub type IngestResult<T> = Result<T, IngestError>;

/// Error type returned by ingestion functions and frame reads.
///
/// This is a single error enum shared across column resolution, row decoding,
/// and read-only [`crate::frame::DataFrame`] access. Variants raised during
/// ingestion carry the source's path so a bad file can be identified directly.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (malformed quoting, unequal row lengths, wrapped I/O).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// By-name column resolution was requested but the source has no header row.
    #[error("{path} has no header")]
    NoHeader { path: String },

    /// A requested named column does not exist in the header.
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    /// A reserved column index is not within the source's column range.
    #[error("column index {index} is out of range for {path} ({columns} columns)")]
    ColumnOutOfRange {
        path: String,
        index: usize,
        columns: usize,
    },

    /// The same column index was assigned to more than one reserved role.
    #[error("column index {index} is assigned to more than one role for {path}")]
    OverlappingColumns { path: String, index: usize },

    /// A cell's text could not be decoded into the target type.
    #[error("{path}: failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        path: String,
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A field key could not be decoded into the frame's key type.
    #[error("{path}: failed to parse field key '{key}': {message}")]
    InvalidKey {
        path: String,
        key: String,
        message: String,
    },

    /// Read-only access to a field absent from an already-built frame.
    #[error("no field named '{key}' in frame")]
    FieldNotFound { key: String },
}
