//! Run configuration: what to benchmark and how much data to generate.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// Default number of rows for the `simple` and `concurrent` scenarios.
const DEFAULT_ROWS: usize = 1_000_000;

/// Everything a benchmark run needs, populated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database file; deleted and recreated at the start of each scenario.
    pub dbfile: PathBuf,
    /// Drivers to benchmark, in order.
    pub drivers: Vec<DriverKind>,
    /// Scenarios run for every driver, in order.
    pub scenarios: Vec<Scenario>,
    /// Rows in the flat `users` table.
    pub users: usize,
    /// Profiles in the complex scenario.
    pub profiles: usize,
    /// Devices per profile.
    pub devices: usize,
    /// Locations per device.
    pub locations: usize,
    /// Users in the relational scenario.
    pub rel_users: usize,
    /// Articles per user.
    pub articles: usize,
    /// Comments per article.
    pub comments: usize,
    /// Books inserted once and read by every concurrent worker.
    pub books: usize,
    /// Reader counts for the concurrent scenario, run one after another.
    pub workers: Vec<usize>,
    /// Where to write a CPU flamegraph, if anywhere.
    pub cpuprofile: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dbfile: PathBuf::from("bench.db"),
            drivers: DriverKind::value_variants().to_vec(),
            scenarios: Scenario::value_variants().to_vec(),
            users: DEFAULT_ROWS,
            profiles: 200,
            devices: 10,
            locations: 10,
            rel_users: 200,
            articles: 100,
            comments: 20,
            books: DEFAULT_ROWS,
            workers: vec![2, 4, 8],
            cpuprofile: None,
        }
    }
}

/// A benchmark workload.
#[derive(Clone, Copy, Debug, ValueEnum, Eq, PartialEq)]
#[value(rename_all = "kebab_case")]
pub enum Scenario {
    /// Flat `users` table.
    Simple,
    /// Profiles, devices and locations.
    Complex,
    /// Users, articles and comments.
    Relational,
    /// One insert, then parallel readers.
    Concurrent,
}

impl Scenario {
    /// Name used on the command line and in reports.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Simple => "simple",
            Scenario::Complex => "complex",
            Scenario::Relational => "relational",
            Scenario::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The SQLite bindings that can be benchmarked.
#[derive(Clone, Copy, Debug, ValueEnum, Eq, PartialEq)]
#[value(rename_all = "kebab_case")]
pub enum DriverKind {
    /// Synchronous `rusqlite`.
    Rusqlite,
    /// `sqlx` on a current-thread tokio runtime.
    Sqlx,
    /// `tokio-rusqlite`, a rusqlite connection on a background thread.
    TokioRusqlite,
}

impl DriverKind {
    /// Name used on the command line and in reports.
    pub fn label(self) -> &'static str {
        match self {
            DriverKind::Rusqlite => "rusqlite",
            DriverKind::Sqlx => "sqlx",
            DriverKind::TokioRusqlite => "tokio-rusqlite",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
