//! Row-count and value-sanity checks applied after every scan.

use crate::{BenchError, Record, Result};

/// Fails unless a scan of `what` returned exactly `expected` rows.
pub fn check_count(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(BenchError::RowCount {
            what,
            expected,
            actual,
        })
    }
}

/// Fails on the first row whose values do not pass [`Record::is_sane`].
pub fn check_rows<R: Record>(rows: &[R]) -> Result<()> {
    match rows.iter().position(|row| !row.is_sane()) {
        Some(index) => Err(BenchError::InvalidRow {
            what: R::WHAT,
            index,
        }),
        None => Ok(()),
    }
}

/// Count check followed by the per-row sanity check.
pub fn check_scan<R: Record>(rows: &[R], expected: usize) -> Result<()> {
    check_count(R::WHAT, expected, rows.len())?;
    check_rows(rows)
}
