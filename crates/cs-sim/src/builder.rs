//! Fluent builder for constructing a [`Sim`].

use cs_core::SimConfig;
use cs_schedule::{ArrivalSource, Roster, ScheduleProvider};

use crate::stats::StatsCollector;
use crate::{Customs, NoopObserver, Sim, SimError, SimReport, SimResult};

/// Fluent builder for [`Sim<A, P>`].
///
/// # Required inputs
///
/// - [`Roster`] — which booths exist, per subsection
/// - `A: ArrivalSource` — usually a [`cs_schedule::ArrivalTable`]
/// - `P: ScheduleProvider` — a `WindowSchedule` or a `StaffingPlan`
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                 |
/// |---------------|-------------------------|
/// | `.config(c)`  | `SimConfig::default()`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(&roster, &arrivals, &plan)
///     .config(config)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<'a, A: ArrivalSource + ?Sized, P: ScheduleProvider + ?Sized> {
    config:   SimConfig,
    roster:   &'a Roster,
    arrivals: &'a A,
    schedule: &'a P,
}

impl<'a, A: ArrivalSource + ?Sized, P: ScheduleProvider + ?Sized> SimBuilder<'a, A, P> {
    pub fn new(roster: &'a Roster, arrivals: &'a A, schedule: &'a P) -> Self {
        Self {
            config: SimConfig::default(),
            roster,
            arrivals,
            schedule,
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and lay out subsections from the roster.
    ///
    /// Fails with [`SimError::UnroutableCategory`] when any passenger in the
    /// arrivals has a category the roster does not serve.
    pub fn build(self) -> SimResult<Sim<'a, A, P>> {
        self.config.validate()?;
        if let Some(r) = self
            .arrivals
            .first_of_each_category()
            .into_iter()
            .find(|r| !self.roster.has(r.category))
        {
            return Err(SimError::UnroutableCategory { passenger: r.passenger, category: r.category });
        }

        let customs = Customs::new(self.roster, self.config.max_queue_size);
        let stats = StatsCollector::new(&self.config, self.roster.categories());

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            customs,
            arrivals: self.arrivals,
            schedule: self.schedule,
            ledger:   Vec::new(),
            stats,
            report:   None,
        })
    }
}

/// Build and run one simulation with no observer.
pub fn simulate<A, P>(
    config:   &SimConfig,
    roster:   &Roster,
    arrivals: &A,
    schedule: &P,
) -> SimResult<SimReport>
where
    A: ArrivalSource + ?Sized,
    P: ScheduleProvider + ?Sized,
{
    SimBuilder::new(roster, arrivals, schedule)
        .config(config.clone())
        .build()?
        .run(&mut NoopObserver)
}
