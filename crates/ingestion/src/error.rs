//! Error types for the ingestion crate.

use thiserror::Error;

/// Errors that abort ingestion entirely.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Header-level problems: the table cannot produce any layer.
///
/// The caller is expected to report these and still render the base map
/// with zero layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("No complete date{{N}}/value{{N}} column pair found")]
    NoTimeSlices,
}

/// A non-fatal row- or cell-level drop.
///
/// Collected and reported alongside the survey; never returned as `Err`.
/// `row` is the 1-based data row number, header excluded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("row {row}: bad coordinate in '{column}': {raw:?} (row dropped)")]
    BadCoordinate {
        row: usize,
        column: String,
        raw: String,
    },

    #[error("row {row}: bad date in '{column}': {raw:?} (observation dropped)")]
    BadDate {
        row: usize,
        column: String,
        raw: String,
    },

    #[error("row {row}: bad value in '{column}': {raw:?} (observation dropped)")]
    BadValue {
        row: usize,
        column: String,
        raw: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
