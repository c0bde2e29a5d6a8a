//! Error types for the ypbank-ledger library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading and cleaning a statement.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV data.
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Invalid date format.
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid amount format.
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    /// General parsing error.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The file extension is not one the loader knows how to read.
    #[error("Unsupported file type: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    /// No sheet contained a recognizable transaction table.
    #[error("No valid transaction table found in {0}")]
    NoTableFound(String),

    /// A table was recognized but a required column could not be resolved.
    #[error("Malformed transaction table in {sheet}: missing {column} column")]
    MalformedTable { sheet: String, column: &'static str },
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
