//! Keyword heuristics deciding whether a header describes a transaction table.

/// Keywords that count towards a header's score.
pub const REQUIRED_KEYWORDS: [&str; 8] = [
    "date",
    "description",
    "remarks",
    "narration",
    "particulars",
    "debit",
    "credit",
    "amount",
];

const AMOUNT_KEYWORDS: [&str; 3] = ["amount", "debit", "credit"];
const DESCRIPTION_KEYWORDS: [&str; 4] = ["description", "narration", "remarks", "particulars"];

/// Minimum number of distinct keywords an accepted header must contain.
pub const MIN_SCORE: usize = 2;

/// Minimum number of columns an accepted table must have.
pub const MIN_COLUMNS: usize = 3;

/// Keyword evidence gathered from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderScore {
    /// Number of distinct keywords found in any label.
    pub score: usize,
    pub has_date: bool,
    pub has_amount: bool,
    pub has_desc: bool,
    pub columns: usize,
}

impl HeaderScore {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let lowered: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();
        let any_contains = |kw: &str| lowered.iter().any(|label| label.contains(kw));

        Self {
            score: REQUIRED_KEYWORDS.iter().filter(|&&kw| any_contains(kw)).count(),
            has_date: any_contains("date"),
            has_amount: AMOUNT_KEYWORDS.iter().any(|&kw| any_contains(kw)),
            has_desc: DESCRIPTION_KEYWORDS.iter().any(|&kw| any_contains(kw)),
            columns: labels.len(),
        }
    }

    /// A date column is mandatory; amount or description evidence must back it up.
    pub fn is_transaction_table(&self) -> bool {
        self.has_date
            && (self.has_amount || self.has_desc)
            && self.score >= MIN_SCORE
            && self.columns >= MIN_COLUMNS
    }
}

/// Whether `labels` look like the header of a transaction table.
pub fn is_transaction_table<S: AsRef<str>>(labels: &[S]) -> bool {
    HeaderScore::from_labels(labels).is_transaction_table()
}
