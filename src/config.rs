//! Tunable limits of the table-discovery pipeline.

use chrono::NaiveDate;

/// Maximum number of leading rows searched for a header.
pub const DEFAULT_MAX_HEADER_ROWS: usize = 100;

/// Minimum number of non-empty cells a row needs to be considered a header.
pub const DEFAULT_MIN_HEADER_CELLS: usize = 3;

/// Options controlling header search and row cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Upper bound on rows scanned by the header locator.
    pub max_header_rows: usize,

    /// Rows with fewer non-empty cells are treated as titles or blanks.
    pub min_header_cells: usize,

    /// Transactions dated before this day are discarded.
    pub earliest_date: NaiveDate,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_header_rows: DEFAULT_MAX_HEADER_ROWS,
            min_header_cells: DEFAULT_MIN_HEADER_CELLS,
            earliest_date: default_earliest_date(),
        }
    }
}

impl ParseOptions {
    pub fn with_max_header_rows(mut self, rows: usize) -> Self {
        self.max_header_rows = rows;
        self
    }

    pub fn with_min_header_cells(mut self, cells: usize) -> Self {
        self.min_header_cells = cells;
        self
    }

    pub fn with_earliest_date(mut self, date: NaiveDate) -> Self {
        self.earliest_date = date;
        self
    }
}

fn default_earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1985, 1, 1).unwrap_or(NaiveDate::MIN)
}
