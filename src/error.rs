use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T, E = BenchError> = std::result::Result<T, E>;

/// Errors that terminate a benchmark run.
///
/// None of these are recovered from: the runner propagates the first one to
/// `main`, which logs it and exits with a non-zero status.
#[derive(Debug)]
pub enum BenchError {
    /// File system error while resetting or measuring the database file.
    Io(io::Error),
    /// Error reported by the rusqlite binding.
    Rusqlite(rusqlite::Error),
    /// Error reported by the sqlx binding.
    Sqlx(sqlx::Error),
    /// Error reported by the tokio-rusqlite binding.
    TokioRusqlite(tokio_rusqlite::Error),
    /// A column did not hold the type a record expected.
    Decode(String),
    /// A scan returned the wrong number of rows.
    RowCount {
        /// What was scanned.
        what: &'static str,
        /// Rows expected from the input counts.
        expected: usize,
        /// Rows actually returned.
        actual: usize,
    },
    /// A scanned row failed its sanity check.
    InvalidRow {
        /// What was scanned.
        what: &'static str,
        /// Zero-based position of the row in the scan.
        index: usize,
    },
    /// A reader in the concurrent scenario failed.
    Worker {
        /// Index of the failed worker.
        worker: usize,
        /// The worker's own error.
        source: Box<BenchError>,
    },
    /// The CPU profiler could not be started or its report written.
    Profiler(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Io(e) => write!(f, "I/O error: {e}"),
            BenchError::Rusqlite(e) => write!(f, "rusqlite error: {e}"),
            BenchError::Sqlx(e) => write!(f, "sqlx error: {e}"),
            BenchError::TokioRusqlite(e) => write!(f, "tokio-rusqlite error: {e}"),
            BenchError::Decode(msg) => write!(f, "decode error: {msg}"),
            BenchError::RowCount {
                what,
                expected,
                actual,
            } => write!(f, "{what}: expected {expected} rows but was {actual}"),
            BenchError::InvalidRow { what, index } => {
                write!(f, "{what}: wrong row values at row {index}")
            }
            BenchError::Worker { worker, source } => write!(f, "worker {worker}: {source}"),
            BenchError::Profiler(msg) => write!(f, "profiler error: {msg}"),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io(e) => Some(e),
            BenchError::Rusqlite(e) => Some(e),
            BenchError::Sqlx(e) => Some(e),
            BenchError::TokioRusqlite(e) => Some(e),
            BenchError::Worker { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for BenchError {
    fn from(err: io::Error) -> Self {
        BenchError::Io(err)
    }
}

impl From<rusqlite::Error> for BenchError {
    fn from(err: rusqlite::Error) -> Self {
        BenchError::Rusqlite(err)
    }
}

impl From<sqlx::Error> for BenchError {
    fn from(err: sqlx::Error) -> Self {
        BenchError::Sqlx(err)
    }
}

impl From<tokio_rusqlite::Error> for BenchError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        BenchError::TokioRusqlite(err)
    }
}
