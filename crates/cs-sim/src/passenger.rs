//! A passenger moving through the hall.

use cs_core::{Category, PassengerId, Tick};
use cs_schedule::ArrivalRecord;

/// One passenger, owned by exactly one container at a time: a subsection's
/// waiting line, a booth queue, a booth's service slot, or the ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub id:              PassengerId,
    pub flight:          u32,
    pub category:        Category,
    pub arrival_tick:    Tick,
    pub service_ticks:   u64,
    /// When the passenger left the waiting line for a booth queue.
    pub enqueue_tick:    Option<Tick>,
    pub start_tick:      Option<Tick>,
    pub completion_tick: Option<Tick>,
    pub processed:       bool,
}

impl Passenger {
    pub fn new(record: &ArrivalRecord) -> Self {
        Self {
            id:              record.passenger,
            flight:          record.flight,
            category:        record.category,
            arrival_tick:    record.arrival_tick,
            service_ticks:   record.service_ticks,
            enqueue_tick:    None,
            start_tick:      None,
            completion_tick: None,
            processed:       false,
        }
    }

    /// Stamp the service start and return the tick at which service ends.
    #[inline]
    pub(crate) fn begin_service(&mut self, now: Tick) -> Tick {
        debug_assert!(self.start_tick.is_none(), "{} served twice", self.id);
        let done = now + self.service_ticks;
        self.start_tick = Some(now);
        self.completion_tick = Some(done);
        done
    }

    #[inline]
    pub(crate) fn finish(&mut self) {
        debug_assert!(!self.processed, "{} processed twice", self.id);
        self.processed = true;
    }

    /// Ticks spent waiting before service started.
    pub fn wait_ticks(&self) -> Option<u64> {
        self.start_tick.map(|s| s.since(self.arrival_tick))
    }

    /// Ticks from arrival to departure.
    pub fn sojourn_ticks(&self) -> Option<u64> {
        self.completion_tick.map(|c| c.since(self.arrival_tick))
    }
}
