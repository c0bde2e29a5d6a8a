//! Mapping of bank-specific column labels onto canonical roles.

use crate::header::CandidateTable;
use crate::types::Cell;
use std::fmt;

/// Canonical semantic role of a statement column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Date,
    Description,
    Amount,
    Debit,
    Credit,
    Type,
}

const DESCRIPTION_LABELS: [&str; 4] = ["description", "remarks", "narration", "particulars"];

impl ColumnRole {
    /// Classify a header label.
    ///
    /// Rules are checked top to bottom and the first match wins, so
    /// "Withdrawal Amount" is a debit rather than a signed amount, and a
    /// "Debit / Credit" label lands on the debit rule before the type rule.
    pub fn classify(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        let has = |kw: &str| label.contains(kw);

        if has("date") {
            Some(ColumnRole::Date)
        } else if DESCRIPTION_LABELS.iter().any(|&kw| has(kw)) {
            Some(ColumnRole::Description)
        } else if has("amount") && !has("withdrawal") && !has("deposit") {
            Some(ColumnRole::Amount)
        } else if has("withdrawal") || has("debit") {
            Some(ColumnRole::Debit)
        } else if has("deposit") || has("credit") {
            Some(ColumnRole::Credit)
        } else if has("debit / credit") || has("dr/cr") {
            Some(ColumnRole::Type)
        } else {
            None
        }
    }

    /// Canonical column name.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnRole::Date => "Date",
            ColumnRole::Description => "Description",
            ColumnRole::Amount => "Amount",
            ColumnRole::Debit => "Debit",
            ColumnRole::Credit => "Credit",
            ColumnRole::Type => "Type",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column index assigned to each role, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub kind: Option<usize>,
}

impl ColumnMap {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Date => self.date,
            ColumnRole::Description => self.description,
            ColumnRole::Amount => self.amount,
            ColumnRole::Debit => self.debit,
            ColumnRole::Credit => self.credit,
            ColumnRole::Type => self.kind,
        }
    }

    fn slot(&mut self, role: ColumnRole) -> &mut Option<usize> {
        match role {
            ColumnRole::Date => &mut self.date,
            ColumnRole::Description => &mut self.description,
            ColumnRole::Amount => &mut self.amount,
            ColumnRole::Debit => &mut self.debit,
            ColumnRole::Credit => &mut self.credit,
            ColumnRole::Type => &mut self.kind,
        }
    }

    /// Assign `col` to `role`, replacing any earlier column.
    pub fn assign(&mut self, role: ColumnRole, col: usize) {
        *self.slot(role) = Some(col);
    }
}

/// A candidate table whose columns have been relabelled by role.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub header_row: usize,

    /// Canonical names for recognized columns, original labels otherwise.
    pub labels: Vec<String>,

    /// Role assignment; later columns win when two share a role.
    pub roles: ColumnMap,

    pub rows: Vec<Vec<Cell>>,
}

/// Relabel the columns of `table` with their canonical roles.
pub fn normalize_columns(table: CandidateTable) -> NormalizedTable {
    let mut roles = ColumnMap::default();
    let labels: Vec<String> = table
        .labels
        .into_iter()
        .enumerate()
        .map(|(col, label)| match ColumnRole::classify(&label) {
            Some(role) => {
                roles.assign(role, col);
                role.name().to_string()
            }
            None => label,
        })
        .collect();

    NormalizedTable {
        header_row: table.header_row,
        labels,
        roles,
        rows: table.rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(labels: &[&str]) -> CandidateTable {
        CandidateTable {
            header_row: 0,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_classify_rule_order() {
        assert_eq!(ColumnRole::classify("Value Date"), Some(ColumnRole::Date));
        assert_eq!(ColumnRole::classify("Transaction Remarks"), Some(ColumnRole::Description));
        assert_eq!(ColumnRole::classify("Amount (INR)"), Some(ColumnRole::Amount));
        assert_eq!(ColumnRole::classify("Withdrawal Amount"), Some(ColumnRole::Debit));
        assert_eq!(ColumnRole::classify("Deposit Amount"), Some(ColumnRole::Credit));
        assert_eq!(ColumnRole::classify("Withdrawal Amt."), Some(ColumnRole::Debit));
        assert_eq!(ColumnRole::classify("CREDIT"), Some(ColumnRole::Credit));
        assert_eq!(ColumnRole::classify("Dr/Cr"), Some(ColumnRole::Type));
        assert_eq!(ColumnRole::classify("Balance"), None);
    }

    #[test]
    fn test_debit_slash_credit_is_claimed_by_debit_rule() {
        assert_eq!(ColumnRole::classify("Debit / Credit"), Some(ColumnRole::Debit));
    }

    #[test]
    fn test_date_rule_precedes_amount() {
        assert_eq!(ColumnRole::classify("Amount Date"), Some(ColumnRole::Date));
    }

    #[test]
    fn test_normalize_relabels_known_columns() {
        let table = normalize_columns(candidate(&[
            "",
            "Txn Date",
            "Narration",
            "Chq./Ref.No.",
            "Withdrawal Amt.",
            "Deposit Amt.",
        ]));
        assert_eq!(
            table.labels,
            vec!["", "Date", "Description", "Chq./Ref.No.", "Debit", "Credit"]
        );
        assert_eq!(table.roles.date, Some(1));
        assert_eq!(table.roles.description, Some(2));
        assert_eq!(table.roles.debit, Some(4));
        assert_eq!(table.roles.credit, Some(5));
        assert_eq!(table.roles.amount, None);
    }

    #[test]
    fn test_last_matching_column_wins_role() {
        let table = normalize_columns(candidate(&["Txn Date", "Value Date", "Description", "Amount"]));
        assert_eq!(table.roles.get(ColumnRole::Date), Some(1));
        assert_eq!(table.labels[0], "Date");
        assert_eq!(table.labels[1], "Date");
    }
}
