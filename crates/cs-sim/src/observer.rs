//! Simulation observer trait for progress reporting.

use cs_core::Tick;

use crate::SimReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — hour logger
///
/// ```rust,ignore
/// struct HourLogger;
///
/// impl SimObserver for HourLogger {
///     fn on_hour_end(&mut self, hour: u32, served_so_far: usize) {
///         tracing::trace!(hour, served_so_far, "hour simulated");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before booth status updates.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `completed` is the number of passengers whose service finished this
    /// tick.
    fn on_tick_end(&mut self, _tick: Tick, _completed: usize) {}

    /// Called after the last tick of each simulated hour.
    fn on_hour_end(&mut self, _hour: u32, _served_so_far: usize) {}

    /// Called once after the final tick, with the finished report.
    fn on_sim_end(&mut self, _final_tick: Tick, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
