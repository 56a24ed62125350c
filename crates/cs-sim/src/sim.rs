//! The `Sim` struct and its tick loop.

use tracing::debug;

use cs_core::{SimClock, SimConfig, Tick};
use cs_schedule::{ArrivalSource, ScheduleProvider};

use crate::stats::StatsCollector;
use crate::{Customs, Passenger, SimObserver, SimReport, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<A, P>` borrows its arrivals and staffing so the optimizer can run
/// thousands of simulations over one materialized table.  Each tick runs in a
/// fixed order:
///
/// 1. **Status**: every booth is set online or offline for the current hour.
/// 2. **Arrivals**: passengers arriving this tick join their subsection's
///    waiting line, in `PassengerId` order.
/// 3. **Assign + serve**: per subsection, the waiting line fills booth queues,
///    then every booth advances its state machine.
/// 4. **Ledger**: completions are moved to the ledger.
/// 5. **Advance** the clock.
///
/// The loop processes ticks `0..=end_tick`.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim<'a, A: ArrivalSource + ?Sized, P: ScheduleProvider + ?Sized> {
    pub config: SimConfig,
    pub clock:  SimClock,
    pub customs: Customs,
    pub(crate) arrivals: &'a A,
    pub(crate) schedule: &'a P,
    /// Every passenger whose service has completed, in completion order.
    pub ledger: Vec<Passenger>,
    pub(crate) stats: StatsCollector,
    pub(crate) report: Option<SimReport>,
}

impl<A: ArrivalSource + ?Sized, P: ScheduleProvider + ?Sized> Sim<'_, A, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run to the horizon and return the hourly report.
    ///
    /// A `Sim` runs once; calling `run` again returns the same report
    /// without simulating.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        let end = self.config.end_tick();
        let ticks_per_hour = self.config.ticks_per_hour();

        while self.clock.current_tick <= end {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let completed = self.process_tick(now)?;
            observer.on_tick_end(now, completed);
            if (now.0 + 1).is_multiple_of(ticks_per_hour) {
                observer.on_hour_end(self.config.hour_of(now), self.ledger.len());
            }
            self.clock.advance();
        }

        let report = self.finish();
        observer.on_sim_end(end, &report);
        self.report = Some(report.clone());
        Ok(report)
    }

    /// Run exactly `n` ticks from the current position (ignores the
    /// horizon).  No report is produced; use for stepping in tests.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let completed = self.process_tick(now)?;
            observer.on_tick_end(now, completed);
            self.clock.advance();
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<usize> {
        let hour = self.config.hour_of(now);
        self.customs.update_servers(self.schedule, hour);

        self.customs.handle_arrivals(self.arrivals.passengers_arriving(now))?;

        let before = self.ledger.len();
        self.customs.step(now, &mut self.ledger);
        self.stats.sample_tick(now, &self.customs);

        Ok(self.ledger.len() - before)
    }

    /// Fold every passenger's wait into the stats and build the report.
    ///
    /// Passengers still in a line or booth queue get a censored wait
    /// measured to the horizon.
    fn finish(&mut self) -> SimReport {
        let end = self.config.end_tick();
        let mut stats = self.stats.clone();

        for p in &self.ledger {
            stats.record_wait(p, p.wait_ticks().unwrap_or(0));
        }
        let mut in_service = 0;
        for p in self.customs.in_service() {
            stats.record_wait(p, p.wait_ticks().unwrap_or(0));
            in_service += 1;
        }
        let unstarted = self.customs.drain_unstarted();
        for p in &unstarted {
            stats.record_wait(p, end.0.saturating_sub(p.arrival_tick.0));
        }

        debug!(
            served = self.ledger.len(),
            in_service,
            stranded = unstarted.len(),
            ticks = end.0 + 1,
            "simulation finished"
        );

        SimReport {
            rows: stats.into_rows(),
            served: self.ledger.len(),
            in_service,
            stranded: unstarted.len(),
            ticks: end.0 + 1,
        }
    }
}
