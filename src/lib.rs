//! # sqlite-bench
//!
//! Insert and query micro-benchmarks for several SQLite driver bindings.
//!
//! Every driver implements the same [`Db`] trait, and the scenarios in
//! [`runner`] are written once against that trait:
//!
//! - **simple**: one flat `users` table
//! - **complex**: profiles, devices and locations joined three ways
//! - **relational**: users, articles and comments joined three ways
//! - **concurrent**: one bulk insert followed by N independent readers
//!
//! Each scenario drops the database file, creates the schema, inserts the
//! generated rows in one transaction per table, scans them back, verifies
//! the row count and the value sanity of every row, and reports elapsed
//! time and file size.
//!
//! ```rust,no_run
//! use sqlite_bench::{Config, DriverKind};
//!
//! # fn main() -> Result<(), sqlite_bench::BenchError> {
//! let config = Config::default();
//! let results = DriverKind::Rusqlite.run(&config)?;
//! for result in &results {
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod datagen;
pub mod driver;
mod error;
pub mod model;
pub mod profile;
pub mod report;
pub mod runner;
pub mod sql;
pub mod value;
pub mod verify;

pub use config::{Config, DriverKind, Scenario};
pub use driver::Db;
pub use error::{BenchError, Result};
pub use model::Record;
pub use report::BenchResult;
pub use value::Value;
