//! Benchmark results and their presentation.

use std::fmt;
use std::time::Duration;

use byte_unit::{Byte, UnitType};

/// Outcome of one scenario run against one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    /// Driver name, see [`crate::Db::NAME`].
    pub driver: &'static str,
    /// Scenario label, e.g. `simple` or `concurrent/4`.
    pub scenario: String,
    /// Time spent inserting the generated rows.
    pub insert: Duration,
    /// Time spent scanning and verifying.
    pub query: Duration,
    /// Size of the database file after the scenario, in bytes.
    pub file_size: u64,
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: insert {}, query {}, fsize {}",
            self.driver,
            self.scenario,
            format_duration(self.insert),
            format_duration(self.query),
            format_size(self.file_size)
        )
    }
}

/// Renders a duration in µs, ms or s, whichever reads best.
#[allow(clippy::cast_precision_loss)]
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Renders a byte count in binary units, e.g. `1.50 MiB`.
pub fn format_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.2}")
}

#[derive(Clone, Copy)]
enum Metric {
    Insert,
    Query,
    Size,
}

impl Metric {
    const ALL: [Metric; 3] = [Metric::Insert, Metric::Query, Metric::Size];

    fn label(self) -> &'static str {
        match self {
            Metric::Insert => "insert",
            Metric::Query => "query",
            Metric::Size => "fsize",
        }
    }

    /// Comparable magnitude; smaller is better.
    fn measure(self, result: &BenchResult) -> u128 {
        match self {
            Metric::Insert => result.insert.as_nanos(),
            Metric::Query => result.query.as_nanos(),
            Metric::Size => u128::from(result.file_size),
        }
    }

    fn render(self, result: &BenchResult) -> String {
        match self {
            Metric::Insert => format_duration(result.insert),
            Metric::Query => format_duration(result.query),
            Metric::Size => format_size(result.file_size),
        }
    }
}

/// One row per scenario and metric, one column per driver. The best entry of
/// each row is marked in bold.
pub fn render_table(results: &[BenchResult]) -> comfy_table::Table {
    let mut drivers: Vec<&'static str> = Vec::new();
    let mut scenarios: Vec<&str> = Vec::new();
    for result in results {
        if !drivers.contains(&result.driver) {
            drivers.push(result.driver);
        }
        if !scenarios.contains(&result.scenario.as_str()) {
            scenarios.push(&result.scenario);
        }
    }

    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::ASCII_MARKDOWN);
    table.set_width(100);
    let mut header = vec![String::new()];
    header.extend(drivers.iter().map(|d| (*d).to_string()));
    table.set_header(header);

    for scenario in scenarios {
        for metric in Metric::ALL {
            let cells: Vec<Option<&BenchResult>> = drivers
                .iter()
                .map(|driver| {
                    results
                        .iter()
                        .find(|r| r.driver == *driver && r.scenario == scenario)
                })
                .collect();
            let best = cells
                .iter()
                .flatten()
                .map(|r| metric.measure(r))
                .min();

            let mut row = vec![format!("{scenario} {}", metric.label())];
            for cell in cells {
                row.push(match cell {
                    Some(r) if drivers.len() > 1 && Some(metric.measure(r)) == best => {
                        format!("**{}**", metric.render(r))
                    }
                    Some(r) => metric.render(r),
                    None => String::new(),
                });
            }
            table.add_row(row);
        }
    }
    table
}
