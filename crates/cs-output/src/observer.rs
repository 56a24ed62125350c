//! `ReportObserver<W>` — bridges `SimObserver` to a `ReportWriter`.

use tracing::trace;

use cs_core::Tick;
use cs_sim::{SimObserver, SimReport};

use crate::row::report_rows;
use crate::writer::ReportWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes the final hourly report of a run to any
/// [`ReportWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SimObserver for ReportObserver<W> {
    fn on_hour_end(&mut self, hour: u32, served_so_far: usize) {
        trace!(hour, served_so_far, "hour simulated");
    }

    fn on_sim_end(&mut self, _final_tick: Tick, report: &SimReport) {
        let result = self.writer.write_report(&report_rows(report));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
