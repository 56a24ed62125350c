//! `cs-output` — report writers for the customs staffing tool.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                   |
//! |-----------|---------|-------------------------------------------------|
//! | *(none)*  | CSV     | `<kind>_models.csv`, `log.csv`                  |
//! | `sqlite`  | SQLite  | `output.db` (`hourly_reports`, `run_log`)       |
//!
//! Both implement [`ReportWriter`] and append rather than overwrite.  A
//! writer can be fed directly from a [`cs_sim::SimReport`] via
//! [`report_rows`], or attached to a run through [`ReportObserver`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvReportWriter, ReportKind, ReportObserver};
//!
//! let writer = CsvReportWriter::new(Path::new("./output"), ReportKind::Heuristic)?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { return Err(e.into()); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::{CsvReportWriter, write_staffing_csv};
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use row::{ReportKind, ReportRow, RunLogRow, report_rows};
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReportWriter;
