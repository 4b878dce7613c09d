//! Error types for sheetcmp-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetcmp-core
#[derive(Debug, Error)]
pub enum Error {
    /// No excluded-rows config existed; a default one was written
    #[error("no config found. A default '{path}' has been created, please review it and run again")]
    ConfigMissing { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file extension is not one we can load
    #[error("unsupported input format '{extension}' for '{path}' (expected xlsx, xlsm or csv)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to open or read a workbook
    #[error("failed to read workbook '{path}': {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Input could not be interpreted as tabular data
    #[error("failed to parse '{path}' as a table: {message}")]
    TableParse { path: PathBuf, message: String },

    /// Input contained no data rows
    #[error("'{path}' contains no data rows")]
    EmptyTable { path: PathBuf },

    /// Row label lookup failed
    #[error("row '{label}' not found")]
    RowNotFound { label: String },

    /// Positional column access outside the table width
    #[error("column {index} out of range for row '{label}' ({width} columns)")]
    ColumnOutOfRange {
        label: String,
        index: usize,
        width: usize,
    },

    /// Tables handed to the diff engine with unequal widths
    #[error("tables have unequal column counts ({left} vs {right}); reconcile before diffing")]
    ShapeMismatch { left: usize, right: usize },

    /// Failed to write the output workbook
    #[error("failed to write workbook '{path}': {source}")]
    WorkbookWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
