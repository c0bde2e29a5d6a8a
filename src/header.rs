//! Header row discovery in an untyped cell grid.

use crate::classify::is_transaction_table;
use crate::config::ParseOptions;
use crate::diagnostics::ScanObserver;
use crate::types::Cell;

/// A header row plus every row below it, proposed as a transaction table.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    /// Zero-based index of the header row in the source grid.
    pub header_row: usize,

    /// Trimmed header labels, one per column; blank headers are empty strings.
    pub labels: Vec<String>,

    /// Rows strictly below the header, in source order.
    pub rows: Vec<Vec<Cell>>,
}

impl CandidateTable {
    pub fn width(&self) -> usize {
        self.labels.len()
    }
}

/// Cell at `col` of `row`, treating ragged rows as padded with empties.
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    row.get(col).unwrap_or(EMPTY)
}

/// Build the stringified, trimmed header labels for `row`, padded to `width`.
pub fn header_labels(row: &[Cell], width: usize) -> Vec<String> {
    (0..width).map(|col| cell_at(row, col).trimmed()).collect()
}

/// Scan the first rows of `grid` for a header that classifies as a
/// transaction table.
///
/// Rows with too few non-empty cells are skipped as titles or blanks. The
/// earliest accepted row wins; `None` means the sheet has no table.
pub fn locate_table(
    grid: &[Vec<Cell>],
    sheet: &str,
    options: &ParseOptions,
    observer: &dyn ScanObserver,
) -> Option<CandidateTable> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let bound = options.max_header_rows.min(grid.len());

    for (index, row) in grid.iter().enumerate().take(bound) {
        let labels = header_labels(row, width);
        let non_empty = labels.iter().filter(|label| !label.is_empty()).count();
        if non_empty < options.min_header_cells {
            continue;
        }

        if is_transaction_table(&labels) {
            observer.table_found(sheet, index, &labels);
            return Some(CandidateTable {
                header_row: index,
                labels,
                rows: grid[index + 1..].to_vec(),
            });
        }
    }

    observer.table_not_found(sheet);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::recording::RecordingObserver;
    use crate::diagnostics::SilentObserver;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from_text(c)).collect()
    }

    #[test]
    fn test_skips_title_and_blank_rows() {
        let grid = vec![
            row(&["Statement of Account"]),
            row(&[]),
            row(&["", "Txn Date", "Narration", "Withdrawal Amt.", "Deposit Amt."]),
            row(&["", "2023-05-01", "Grocery Store", "500", "0"]),
        ];
        let table = locate_table(&grid, "CSV", &ParseOptions::default(), &SilentObserver).unwrap();
        assert_eq!(table.header_row, 2);
        assert_eq!(
            table.labels,
            vec!["", "Txn Date", "Narration", "Withdrawal Amt.", "Deposit Amt."]
        );
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_rows_with_two_cells_are_not_headers() {
        let grid = vec![row(&["Date", "Amount"]), row(&["2023-01-01", "5"])];
        assert!(locate_table(&grid, "CSV", &ParseOptions::default(), &SilentObserver).is_none());
    }

    #[test]
    fn test_first_accepted_row_wins() {
        let grid = vec![
            row(&["Date", "Description", "Amount"]),
            row(&["Txn Date", "Narration", "Debit"]),
            row(&["2023-01-01", "Coffee", "5"]),
        ];
        let table = locate_table(&grid, "CSV", &ParseOptions::default(), &SilentObserver).unwrap();
        assert_eq!(table.header_row, 0);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_search_bound_is_respected() {
        let mut grid: Vec<Vec<Cell>> = (0..5).map(|_| row(&["x"])).collect();
        grid.push(row(&["Date", "Description", "Amount"]));
        let options = ParseOptions::default().with_max_header_rows(5);
        assert!(locate_table(&grid, "CSV", &options, &SilentObserver).is_none());
        let options = ParseOptions::default().with_max_header_rows(6);
        assert!(locate_table(&grid, "CSV", &options, &SilentObserver).is_some());
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = vec![
            row(&["Date", "Description", "Amount", "Balance"]),
            row(&["2023-01-01", "Coffee"]),
        ];
        let table = locate_table(&grid, "CSV", &ParseOptions::default(), &SilentObserver).unwrap();
        assert_eq!(table.width(), 4);
        assert_eq!(cell_at(&table.rows[0], 3), &Cell::Empty);
    }

    #[test]
    fn test_numeric_header_cells_are_stringified() {
        let labels = header_labels(&[Cell::Number(2023.0), Cell::Text(" Date ".into())], 3);
        assert_eq!(labels, vec!["2023", "Date", ""]);
    }

    #[test]
    fn test_observer_is_notified() {
        let observer = RecordingObserver::default();
        let grid = vec![row(&["Date", "Description", "Amount"])];
        locate_table(&grid, "Sheet1", &ParseOptions::default(), &observer);
        locate_table(&[], "Sheet2", &ParseOptions::default(), &observer);
        assert_eq!(
            *observer.events.borrow(),
            vec!["found:Sheet1:0".to_string(), "not_found:Sheet2".to_string()]
        );
    }
}
