//! Derivation of a single signed amount from the amount columns a bank uses.

use crate::columns::NormalizedTable;
use crate::header::cell_at;
use crate::types::Cell;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const DEBIT_LABELS: [&str; 4] = ["debit", "withdrawal", "withdrawal amt.", "withdrawal amount"];
const CREDIT_LABELS: [&str; 4] = ["credit", "deposit", "deposit amt.", "deposit amount"];

/// Where a table keeps its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    /// One amount column, optionally qualified by a debit/credit type column.
    Signed { amount: usize, kind: Option<usize> },
    /// Separate debit and credit columns; either side may be absent.
    Split { debit: Option<usize>, credit: Option<usize> },
}

impl AmountSource {
    /// Pick the amount representation of `table`, or `None` if it has none.
    pub fn resolve(table: &NormalizedTable) -> Option<Self> {
        if let Some(amount) = table.roles.amount {
            return Some(AmountSource::Signed {
                amount,
                kind: table.roles.kind,
            });
        }

        let debit = find_label(&table.labels, &DEBIT_LABELS);
        let credit = find_label(&table.labels, &CREDIT_LABELS);
        if debit.is_none() && credit.is_none() {
            return None;
        }
        Some(AmountSource::Split { debit, credit })
    }

    /// Signed amount of one row.
    ///
    /// `None` when a single amount column is unparseable or a debit/credit
    /// difference does not fit in a `Decimal`.
    pub fn signed_amount(&self, row: &[Cell]) -> Option<Decimal> {
        match *self {
            AmountSource::Signed { amount, kind } => {
                let value = parse_amount(cell_at(row, amount))?;
                // Anything not saying "debit" is taken as a credit.
                let is_debit = kind
                    .map(|col| cell_at(row, col).trimmed().to_lowercase().contains("debit"))
                    .unwrap_or(false);
                Some(if is_debit { -value } else { value })
            }
            AmountSource::Split { debit, credit } => {
                let side = |col: Option<usize>| {
                    col.and_then(|c| parse_amount(cell_at(row, c)))
                        .unwrap_or(Decimal::ZERO)
                };
                side(credit).checked_sub(side(debit))
            }
        }
    }
}

/// First column whose trimmed, lower-cased label is one of `candidates`.
fn find_label(labels: &[String], candidates: &[&str]) -> Option<usize> {
    labels
        .iter()
        .position(|label| candidates.contains(&label.trim().to_lowercase().as_str()))
}

/// Build the signed amount column of `table`, one entry per row.
///
/// Returns `None` if the table has neither an amount column nor a
/// debit/credit pair.
pub fn unify_amounts(table: &NormalizedTable) -> Option<Vec<Option<Decimal>>> {
    let source = AmountSource::resolve(table)?;
    Some(table.rows.iter().map(|row| source.signed_amount(row)).collect())
}

/// Coerce a cell to a decimal amount.
///
/// Text may carry surrounding whitespace, a sign, thousands separators or
/// scientific notation. Anything else is `None`, including decimal-comma
/// text such as `1.540,50`.
pub fn parse_amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::from_f64(*n),
        Cell::Text(text) => {
            let text = text.trim();
            if let Some(point) = text.find('.') {
                if text[point..].contains(',') {
                    return None;
                }
            }
            let cleaned = text.replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .ok()
        }
        Cell::Empty | Cell::Bool(_) | Cell::DateTime(_) => None,
    }
}
