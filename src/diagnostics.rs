//! Observer hooks for table-discovery events.
//!
//! The pipeline reports what it found through a [`ScanObserver`] instead of
//! printing. [`TracingObserver`] forwards events to `tracing`; tests and
//! embedding applications can supply their own implementation.

use crate::error::Error;
use tracing::{info, warn};

/// Receives table-discovery events from the loader.
pub trait ScanObserver {
    /// A transaction table was accepted in `sheet` at `header_row`.
    fn table_found(&self, _sheet: &str, _header_row: usize, _labels: &[String]) {}

    /// No header row in `sheet` produced an accepted table.
    fn table_not_found(&self, _sheet: &str) {}

    /// `sheet` was abandoned because of a sheet-level error.
    fn sheet_rejected(&self, _sheet: &str, _error: &Error) {}
}

/// Emits discovery events as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn table_found(&self, sheet: &str, header_row: usize, labels: &[String]) {
        info!(sheet, header_row, ?labels, "found transaction table");
    }

    fn table_not_found(&self, sheet: &str) {
        warn!(sheet, "no transaction table found");
    }

    fn sheet_rejected(&self, sheet: &str, error: &Error) {
        warn!(sheet, %error, "sheet rejected");
    }
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}
