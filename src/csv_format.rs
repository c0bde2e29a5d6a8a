//! Cleaned-ledger CSV serializer.
//!
//! The output has the fixed header `Date,Description,Amount,Type`, dates in
//! `YYYY-MM-DD` form, non-negative amounts and `Debit`/`Credit` types.

use crate::error::{Error, Result};
use crate::types::{DebitCredit, Ledger, Transaction};
use chrono::NaiveDate;
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Suffix appended to the input file stem for the cleaned output.
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// A cleaned transaction list in CSV form.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedCsv {
    pub transactions: Vec<Transaction>,
}

/// CSV transaction record structure.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Type")]
    kind: String,
}

impl From<&Ledger> for CleanedCsv {
    fn from(ledger: &Ledger) -> Self {
        Self {
            transactions: ledger.transactions.clone(),
        }
    }
}

impl CleanedCsv {
    /// Write the ledger to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use ypbank_ledger::csv_format::CleanedCsv;
    ///
    /// let csv = CleanedCsv { transactions: Vec::new() };
    /// let mut file = File::create("statement_cleaned.csv")?;
    /// csv.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        if self.transactions.is_empty() {
            csv_writer.write_record(["Date", "Description", "Amount", "Type"])?;
        }

        for transaction in &self.transactions {
            csv_writer.serialize(CsvRecord {
                date: transaction.date.format("%Y-%m-%d").to_string(),
                description: transaction.description.clone(),
                amount: transaction.amount.to_string(),
                kind: transaction.debit_credit.as_str().to_string(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Read a previously written cleaned ledger back into transactions.
    ///
    /// Lets callers reload `_cleaned.csv` output without re-running
    /// extraction. Dates must be `YYYY-MM-DD` and the type column `Debit` or
    /// `Credit` (`D`/`DR`/`C`/`CR` are also taken).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDate`], [`Error::InvalidAmount`] or
    /// [`Error::ParseError`] for the first bad field, and
    /// [`Error::CsvError`] for malformed CSV.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut csv_reader = Reader::from_reader(reader);
        let mut transactions = Vec::new();

        for result in csv_reader.deserialize() {
            let record: CsvRecord = result?;
            let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
                .map_err(|_| Error::InvalidDate(record.date.clone()))?;
            let amount = Decimal::from_str(record.amount.trim())
                .map_err(|_| Error::InvalidAmount(record.amount.clone()))?;
            let debit_credit =
                DebitCredit::from_str(&record.kind).map_err(Error::ParseError)?;

            transactions.push(Transaction {
                date,
                description: record.description,
                amount,
                debit_credit,
            });
        }

        Ok(CleanedCsv { transactions })
    }
}

/// `<dir>/<stem>_cleaned.csv` next to `input`.
pub fn cleaned_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.csv", stem, CLEANED_SUFFIX))
}

/// Write `ledger` to `output`, replacing any existing file.
pub fn save_ledger(ledger: &Ledger, output: &Path) -> Result<()> {
    let mut file = File::create(output)?;
    CleanedCsv::from(ledger).write_to(&mut file)
}
