//! Row-level validation, noise removal and footer trimming.

use crate::columns::{ColumnRole, NormalizedTable};
use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::header::cell_at;
use crate::types::{Cell, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// Descriptions that are really stringified missing values.
const PLACEHOLDER_DESCRIPTIONS: [&str; 4] = ["", "nan", "none", "null"];

/// Words marking aggregate rows at the bottom of a statement.
const FOOTER_KEYWORDS: [&str; 5] = ["total", "closing", "balance", "summary", "opening"];

/// Day-first/month-first layouts ending in a four-digit year.
/// Month-first readings are tried before day-first ones.
const LONG_YEAR_FORMATS: [&str; 14] = [
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d/%b/%Y",
    "%d-%B-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

const SHORT_YEAR_FORMATS: [&str; 9] = [
    "%m/%d/%y",
    "%d/%m/%y",
    "%m-%d-%y",
    "%d-%m-%y",
    "%m.%d.%y",
    "%d.%m.%y",
    "%d-%b-%y",
    "%d %b %y",
    "%d/%b/%y",
];

const YEAR_FIRST_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// One data row reduced to the three columns the cleaner needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: Cell,
    pub description: Cell,
    /// Signed amount; `None` when the source value was unparseable.
    pub amount: Option<Decimal>,
}

impl From<&Transaction> for RawRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: Cell::Text(tx.date.format("%Y-%m-%d").to_string()),
            description: Cell::Text(tx.description.clone()),
            amount: Some(tx.signed_amount()),
        }
    }
}

/// Pair the date and description cells of every row with its signed amount.
///
/// Fails with [`Error::MalformedTable`] if the table has no date or
/// description column.
pub fn extract_records(
    table: &NormalizedTable,
    amounts: Vec<Option<Decimal>>,
    sheet: &str,
) -> Result<Vec<RawRecord>> {
    let required = |role: ColumnRole| {
        table.roles.get(role).ok_or_else(|| Error::MalformedTable {
            sheet: sheet.to_string(),
            column: role.name(),
        })
    };
    let date_col = required(ColumnRole::Date)?;
    let desc_col = required(ColumnRole::Description)?;

    Ok(table
        .rows
        .iter()
        .zip(amounts)
        .map(|(row, amount)| RawRecord {
            date: cell_at(row, date_col).clone(),
            description: cell_at(row, desc_col).clone(),
            amount,
        })
        .collect())
}

/// Turn raw records into transactions.
///
/// Rows without a plausible date, without a parseable amount, or with a
/// placeholder description are dropped; then the trailing footer block is
/// cut; finally the sign of each amount becomes its debit/credit type.
/// Source order is preserved.
pub fn clean_records(records: Vec<RawRecord>, options: &ParseOptions) -> Vec<Transaction> {
    let total = records.len();

    let mut rows: Vec<(NaiveDate, String, Decimal)> = records
        .into_iter()
        .filter_map(|record| {
            let date = parse_date(&record.date).filter(|d| *d >= options.earliest_date)?;
            let description = record.description.trimmed();
            let amount = record.amount?;
            Some((date, description, amount))
        })
        .filter(|(_, description, _)| is_meaningful_description(description))
        .collect();

    let valid = rows.len();
    let cutoff = footer_cutoff(rows.iter().map(|(_, description, _)| description.as_str()));
    rows.truncate(cutoff);

    debug!(
        total,
        dropped = total - valid,
        footer = valid - rows.len(),
        kept = rows.len(),
        "cleaned statement rows"
    );

    rows.into_iter()
        .map(|(date, description, amount)| Transaction::from_signed(date, description, amount))
        .collect()
}

/// Whether a description carries actual text rather than noise.
pub fn is_meaningful_description(description: &str) -> bool {
    let lowered = description.to_lowercase();
    if PLACEHOLDER_DESCRIPTIONS.contains(&lowered.as_str()) {
        return false;
    }
    if description.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    description.chars().count() > 2
}

/// Whether a description reads like a totals/balance footer line.
pub fn is_footer(description: &str) -> bool {
    let lowered = description.to_lowercase();
    FOOTER_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Number of rows to keep: everything before the last footer-like row.
pub fn footer_cutoff<'a, I>(descriptions: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator + ExactSizeIterator,
{
    let mut iter = descriptions.into_iter();
    let len = iter.len();
    iter.rposition(is_footer).unwrap_or(len)
}

/// Interpret a cell as a calendar date.
///
/// Native date cells are taken as-is and text is tried against the common
/// statement layouts. Bare numbers are never dates.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(text) => parse_date_text(text),
        Cell::Empty | Cell::Number(_) | Cell::Bool(_) => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(date) = parse_with_formats(text) {
        return Some(date);
    }

    // "2023-05-01 10:30:00", "2023-05-01T10:30", "01 May 2023 10:30"
    let split = text.rfind([' ', 'T'])?;
    let (head, tail) = (&text[..split], &text[split + 1..]);
    if tail.contains(':') {
        parse_with_formats(head.trim())
    } else {
        None
    }
}

fn parse_with_formats(text: &str) -> Option<NaiveDate> {
    let leading = text.chars().take_while(char::is_ascii_digit).count();
    let trailing = text.chars().rev().take_while(char::is_ascii_digit).count();

    let formats: &[&str] = if leading == 4 {
        &YEAR_FIRST_FORMATS
    } else if trailing == 2 {
        &SHORT_YEAR_FORMATS
    } else {
        &LONG_YEAR_FORMATS
    };

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
