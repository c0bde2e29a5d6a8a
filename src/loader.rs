//! Statement loading: file readers and the per-sheet extraction pipeline.
//!
//! A grid goes through header location, column normalization, amount
//! unification and row cleaning. CSV files hold a single grid; workbooks
//! are tried sheet by sheet until one yields a table.

use crate::amount::unify_amounts;
use crate::cleaner::{clean_records, extract_records};
use crate::columns::{normalize_columns, ColumnRole};
use crate::config::ParseOptions;
use crate::diagnostics::{ScanObserver, TracingObserver};
use crate::error::{Error, Result};
use crate::header::locate_table;
use crate::types::{Cell, Grid, Ledger};
use crate::Format;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Sheet name reported for CSV input.
pub const CSV_SHEET: &str = "CSV";

/// A multi-sheet tabular source.
pub trait SheetSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read a whole sheet as a headerless grid.
    fn read_sheet(&mut self, name: &str) -> Result<Grid>;
}

/// Spreadsheet workbook (xlsx or xls) read through calamine.
pub struct CalamineWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let sheets = open_workbook_auto(path)?;
        Ok(Self { sheets })
    }
}

impl SheetSource for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Grid> {
        let range = self.sheets.worksheet_range(name)?;
        Ok(range_to_grid(&range))
    }
}

/// Lay a calamine range out at its absolute sheet position, so that row
/// indices match the sheet even when leading rows or columns are blank.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (top, left) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); top];
    grid.extend(range.rows().map(|row| {
        let mut cells = vec![Cell::Empty; left];
        cells.extend(row.iter().map(data_to_cell));
        cells
    }));
    grid
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt.as_datetime().map_or(Cell::Empty, Cell::DateTime),
    }
}

/// Read CSV data as a headerless grid.
///
/// Rows may differ in length and invalid UTF-8 is replaced rather than
/// rejected, since bank exports are rarely clean.
pub fn read_csv_grid<R: Read>(reader: R) -> Result<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| Cell::from_text(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }
    Ok(grid)
}

/// Runs the extraction pipeline over statement files.
///
/// # Examples
///
/// ```no_run
/// use ypbank_ledger::StatementLoader;
///
/// let ledger = StatementLoader::new().load_path("statement.xlsx")?;
/// println!("{} transactions from sheet {}", ledger.len(), ledger.sheet);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StatementLoader<O = TracingObserver> {
    options: ParseOptions,
    observer: O,
}

impl StatementLoader<TracingObserver> {
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
            observer: TracingObserver,
        }
    }
}

impl Default for StatementLoader<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ScanObserver> StatementLoader<O> {
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the observer receiving table-discovery events.
    pub fn with_observer<P: ScanObserver>(self, observer: P) -> StatementLoader<P> {
        StatementLoader {
            options: self.options,
            observer,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Load a statement file, choosing the reader from its extension.
    ///
    /// Unsupported extensions are rejected before the file is opened.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Ledger> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;

        let result = if format.is_spreadsheet() {
            let mut workbook = CalamineWorkbook::open(path)?;
            self.load_workbook(&mut workbook)
        } else {
            self.load_csv(File::open(path)?)
        };

        let ledger = result.map_err(|err| match err {
            Error::NoTableFound(_) => Error::NoTableFound(path.display().to_string()),
            other => other,
        })?;

        info!(
            path = %path.display(),
            sheet = %ledger.sheet,
            transactions = ledger.len(),
            "parsed statement"
        );
        Ok(ledger)
    }

    /// Load a CSV statement. CSV has a single table, so any failure is final.
    pub fn load_csv<R: Read>(&self, reader: R) -> Result<Ledger> {
        let grid = read_csv_grid(reader)?;
        self.parse_grid(&grid, CSV_SHEET)
    }

    /// Try each sheet in order and return the first that yields a table.
    ///
    /// Sheets without a table, or with a malformed one, are skipped. Errors
    /// reading a sheet abort the whole workbook.
    pub fn load_workbook<S: SheetSource>(&self, source: &mut S) -> Result<Ledger> {
        for name in source.sheet_names() {
            let grid = source.read_sheet(&name)?;
            match self.parse_grid(&grid, &name) {
                Ok(ledger) => return Ok(ledger),
                Err(Error::NoTableFound(_)) => {}
                Err(err @ Error::MalformedTable { .. }) => self.observer.sheet_rejected(&name, &err),
                Err(err) => return Err(err),
            }
        }
        Err(Error::NoTableFound("workbook".to_string()))
    }

    /// Run the full pipeline over one sheet's grid.
    pub fn parse_grid(&self, grid: &[Vec<Cell>], sheet: &str) -> Result<Ledger> {
        let candidate = locate_table(grid, sheet, &self.options, &self.observer)
            .ok_or_else(|| Error::NoTableFound(sheet.to_string()))?;
        let header_row = candidate.header_row;

        let table = normalize_columns(candidate);
        let amounts = unify_amounts(&table).ok_or_else(|| Error::MalformedTable {
            sheet: sheet.to_string(),
            column: ColumnRole::Amount.name(),
        })?;
        let records = extract_records(&table, amounts, sheet)?;

        Ok(Ledger {
            sheet: sheet.to_string(),
            header_row,
            transactions: clean_records(records, &self.options),
        })
    }
}
