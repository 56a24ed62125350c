//! `Customs` — routes arrivals to subsections and steps them each tick.

use cs_core::{Category, Tick};
use cs_schedule::{ArrivalRecord, Roster, ScheduleProvider};

use crate::{Passenger, SimError, SimResult, Subsection};

#[derive(Clone, Debug)]
pub struct Customs {
    /// One subsection per roster category, in canonical category order.
    subsections: Vec<Subsection>,
}

impl Customs {
    pub fn new(roster: &Roster, max_queue: usize) -> Self {
        let subsections = roster
            .categories()
            .map(|c| Subsection::new(c, roster.servers_in(c), max_queue))
            .collect();
        Self { subsections }
    }

    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    pub fn subsection(&self, category: Category) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.category() == category)
    }

    /// Route arrivals into their subsection's waiting line, in the order
    /// given.
    ///
    /// A passenger whose category has no subsection is a configuration error.
    pub fn handle_arrivals(&mut self, arrivals: &[ArrivalRecord]) -> SimResult<()> {
        for record in arrivals {
            let sub = self
                .subsections
                .iter_mut()
                .find(|s| s.category() == record.category)
                .ok_or(SimError::UnroutableCategory {
                    passenger: record.passenger,
                    category:  record.category,
                })?;
            sub.admit(Passenger::new(record));
        }
        Ok(())
    }

    /// Set every booth online or offline for `hour`.
    pub fn update_servers<P: ScheduleProvider + ?Sized>(&mut self, schedule: &P, hour: u32) {
        for sub in &mut self.subsections {
            sub.pool_mut().update_status(schedule, hour);
        }
    }

    /// Assignment and service for every subsection.  Passengers completing
    /// at `now` are appended to `done` in subsection order.
    pub fn step(&mut self, now: Tick, done: &mut Vec<Passenger>) {
        for sub in &mut self.subsections {
            sub.step(now, done);
        }
    }

    /// Passengers still being served, with their completion ticks.
    pub fn in_service(&self) -> impl Iterator<Item = &Passenger> {
        self.subsections
            .iter()
            .flat_map(|s| s.pool().servers())
            .filter_map(|a| a.in_service().map(|(p, _)| p))
    }

    pub(crate) fn drain_unstarted(&mut self) -> Vec<Passenger> {
        self.subsections.iter_mut().flat_map(Subsection::drain_unstarted).collect()
    }
}
