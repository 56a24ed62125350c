//! The `ReportWriter` trait implemented by all backend writers.

use crate::{OutputResult, ReportRow, RunLogRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Writers append: running the tool twice adds a second block of rows
/// rather than replacing the first.
pub trait ReportWriter {
    /// Append one simulation's hourly rows.
    fn write_report(&mut self, rows: &[ReportRow]) -> OutputResult<()>;

    /// Append one optimizer session to the run log.
    fn write_run_log(&mut self, row: &RunLogRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Calling it again after success is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: ReportWriter + ?Sized> ReportWriter for Box<W> {
    fn write_report(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        (**self).write_report(rows)
    }

    fn write_run_log(&mut self, row: &RunLogRow) -> OutputResult<()> {
        (**self).write_run_log(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// Fan-out: every row goes to every writer, in order.
impl<W: ReportWriter> ReportWriter for Vec<W> {
    fn write_report(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        self.iter_mut().try_for_each(|w| w.write_report(rows))
    }

    fn write_run_log(&mut self, row: &RunLogRow) -> OutputResult<()> {
        self.iter_mut().try_for_each(|w| w.write_run_log(row))
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.iter_mut().try_for_each(|w| w.finish())
    }
}
