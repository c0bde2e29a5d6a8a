//! Common types shared by the extraction pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A raw, untyped cell as produced by a tabular-file reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Blank or missing cell.
    #[default]
    Empty,
    /// Free text.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Boolean cell.
    Bool(bool),
    /// Native date or date-time cell.
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Build a cell from CSV text; blank fields become [`Cell::Empty`].
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    /// Stringified, trimmed form used for header labels and descriptions.
    pub fn trimmed(&self) -> String {
        self.to_string().trim().to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A headerless 2-D grid of cells; row 0 is the first row of the sheet.
pub type Grid = Vec<Vec<Cell>>;

/// Debit/Credit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitCredit {
    /// Debit transaction (outgoing).
    Debit,
    /// Credit transaction (incoming).
    Credit,
}

impl FromStr for DebitCredit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "D" | "DR" | "DEBIT" => Ok(DebitCredit::Debit),
            "C" | "CR" | "CREDIT" => Ok(DebitCredit::Credit),
            _ => Err(format!("Invalid debit/credit indicator: {}", s)),
        }
    }
}

impl DebitCredit {
    /// Classify a signed amount: negative values are debits.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            DebitCredit::Debit
        } else {
            DebitCredit::Credit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebitCredit::Debit => "Debit",
            DebitCredit::Credit => "Credit",
        }
    }
}

impl fmt::Display for DebitCredit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Date of the transaction.
    pub date: NaiveDate,

    /// Trimmed, non-empty description.
    pub description: String,

    /// Absolute transaction amount, never negative.
    pub amount: Decimal,

    /// Direction of the transaction.
    pub debit_credit: DebitCredit,
}

impl Transaction {
    /// Build a transaction from a signed amount, deriving the type from the sign.
    pub fn from_signed(date: NaiveDate, description: String, signed: Decimal) -> Self {
        Self {
            date,
            description,
            amount: signed.abs(),
            debit_credit: DebitCredit::from_signed(signed),
        }
    }

    /// The amount with its sign restored (debits negative).
    pub fn signed_amount(&self) -> Decimal {
        match self.debit_credit {
            DebitCredit::Debit => -self.amount,
            DebitCredit::Credit => self.amount,
        }
    }
}

/// The cleaned transaction table of one statement file.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Name of the sheet the table was found in ("CSV" for CSV files).
    pub sheet: String,

    /// Zero-based index of the header row within the sheet.
    pub header_row: usize,

    /// Transactions in source row order.
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
