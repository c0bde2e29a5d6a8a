//! YP Bank Ledger Library
//!
//! Extracts a normalized transaction ledger from bank statement exports
//! whose layout is not known in advance.
//!
//! # Pipeline
//!
//! - **Header location**: find the header row among title blocks and blanks
//! - **Classification**: keyword heuristics accept or reject the table
//! - **Column normalization**: bank labels mapped to canonical roles
//! - **Amount unification**: signed, debit/credit or withdrawal/deposit
//!   amounts turned into one signed value
//! - **Row cleaning**: bad dates, amounts and descriptions dropped, footer
//!   rows trimmed, type derived from the sign
//!
//! # Supported Formats
//!
//! - **CSV**: a single headerless table
//! - **Spreadsheets**: `.xlsx` and `.xls`; the first sheet that yields a
//!   table wins
//!
//! # Examples
//!
//! ## Cleaning a statement next to the original
//!
//! ```no_run
//! let output = ypbank_ledger::parse_and_save("SampleData/statement.xls")?;
//! println!("Saved cleaned file to: {}", output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Parsing an in-memory CSV
//!
//! ```
//! use ypbank_ledger::{DebitCredit, StatementLoader};
//!
//! let data = "Date,Description,Amount\n2023-05-01,Coffee shop,-4.50\n";
//! let ledger = StatementLoader::new().load_csv(data.as_bytes())?;
//! assert_eq!(ledger.transactions[0].debit_credit, DebitCredit::Debit);
//! # Ok::<(), ypbank_ledger::Error>(())
//! ```

pub mod amount;
pub mod classify;
pub mod cleaner;
pub mod columns;
pub mod config;
pub mod csv_format;
pub mod diagnostics;
pub mod error;
pub mod header;
pub mod loader;
pub mod types;

use std::path::{Path, PathBuf};
use std::str::FromStr;

// Re-export commonly used types
pub use config::ParseOptions;
pub use diagnostics::{ScanObserver, SilentObserver, TracingObserver};
pub use error::{Error, Result};
pub use loader::{SheetSource, StatementLoader};
pub use types::{Cell, DebitCredit, Grid, Ledger, Transaction};

/// Supported statement file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values
    Csv,
    /// Office Open XML workbook
    Xlsx,
    /// Legacy Excel 97-2003 workbook
    Xls,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" => Ok(Format::Xlsx),
            "xls" => Ok(Format::Xls),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .parse()
    }

    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
            Format::Xls => "xls",
        }
    }

    /// Whether the format is a (possibly multi-sheet) workbook.
    pub fn is_spreadsheet(&self) -> bool {
        !matches!(self, Format::Csv)
    }
}

/// Load and clean a statement with default options.
pub fn load_statement<P: AsRef<Path>>(path: P) -> Result<Ledger> {
    StatementLoader::new().load_path(path)
}

/// Load and clean a statement, then write `<basename>_cleaned.csv` beside it.
///
/// Returns the path of the written file. Nothing is written on failure.
pub fn parse_and_save<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let ledger = load_statement(path)?;
    let output = csv_format::cleaned_output_path(path);
    csv_format::save_ledger(&ledger, &output)?;
    tracing::info!(output = %output.display(), "saved cleaned file");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("XLSX".parse::<Format>().unwrap(), Format::Xlsx);
        assert_eq!(".xls".parse::<Format>().unwrap(), Format::Xls);
        assert!(matches!(
            "pdf".parse::<Format>(),
            Err(Error::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[test]
    fn test_other_workbook_extensions_unsupported() {
        for ext in ["ods", "xlsm", "xlsb"] {
            assert!(
                matches!(ext.parse::<Format>(), Err(Error::UnsupportedFormat(ref e)) if e == ext),
                "{}",
                ext
            );
        }
        assert!(matches!(
            Format::from_path(Path::new("x.ods")),
            Err(Error::UnsupportedFormat(ref e)) if e == "ods"
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.Csv")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("ss2.xls")).unwrap(), Format::Xls);
        assert!(Format::from_path(Path::new("statement")).is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(Format::Csv.extension(), "csv");
        assert_eq!(Format::Xlsx.extension(), "xlsx");
        assert!(Format::Xls.is_spreadsheet());
        assert!(!Format::Csv.is_spreadsheet());
    }
}
