//! The arrivals table: which passengers reach the customs hall at each tick.
//!
//! # Lifecycle
//!
//! 1. The loader produces one [`ManifestEntry`] per passenger, in file order.
//! 2. [`ArrivalTable::build`] converts arrival times to ticks and fixes each
//!    passenger's service duration, sampling it once (in manifest order) when
//!    the manifest does not pin it.
//! 3. The simulator reads the table through [`ArrivalSource`] on every run.
//!    The table is never drained, so the optimizer replays the exact same
//!    passengers, with the exact same service times, on every re-run.
//!
//! Passengers arriving on the same tick are stored sorted by `PassengerId`;
//! that order is the FIFO tie-break for the whole hall.

use std::collections::{BTreeMap, HashMap, HashSet};

use cs_core::{Category, ClockTime, PassengerId, ServiceTimeSampler, SimConfig, SimRng, Tick};

use crate::{ScheduleError, ScheduleResult};

// ── Manifest ──────────────────────────────────────────────────────────────────

/// One passenger as listed in the arrivals manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub passenger:    PassengerId,
    pub flight:       String,
    pub category:     Category,
    pub arrival:      ClockTime,
    /// Fixed service duration; sampled at table build time when absent.
    pub service_secs: Option<u32>,
}

/// A passenger ready for simulation: arrival and service expressed in ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalRecord {
    pub passenger:     PassengerId,
    /// Index into [`ArrivalTable::flights`].
    pub flight:        u32,
    pub category:      Category,
    pub arrival_tick:  Tick,
    pub service_ticks: u64,
}

// ── ArrivalSource ─────────────────────────────────────────────────────────────

/// Read-only view of arrivals, queried once per tick.
pub trait ArrivalSource {
    /// Passengers arriving at exactly `tick`, ordered by `PassengerId`.
    /// Empty for ticks without arrivals.
    fn passengers_arriving(&self, tick: Tick) -> &[ArrivalRecord];

    /// The earliest passenger of each category present, in canonical
    /// category order.
    fn first_of_each_category(&self) -> Vec<&ArrivalRecord>;
}

// ── ArrivalTable ──────────────────────────────────────────────────────────────

/// Arrivals bucketed by tick.
#[derive(Clone, Debug, Default)]
pub struct ArrivalTable {
    by_tick: BTreeMap<Tick, Vec<ArrivalRecord>>,
    total:   usize,
    flights: Vec<String>,
}

impl ArrivalTable {
    /// Build the table, sampling missing service durations from `sampler`.
    ///
    /// Fails on a repeated passenger id.
    pub fn build(
        entries: Vec<ManifestEntry>,
        config:  &SimConfig,
        sampler: &dyn ServiceTimeSampler,
        rng:     &mut SimRng,
    ) -> ScheduleResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut flight_index: HashMap<String, u32> = HashMap::new();
        let mut table = Self::default();

        for entry in entries {
            if !seen.insert(entry.passenger) {
                return Err(ScheduleError::DuplicatePassenger(entry.passenger));
            }
            let secs = match entry.service_secs {
                Some(secs) => secs,
                None => sampler.sample_secs(entry.category, rng),
            };
            let flight = match flight_index.get(&entry.flight) {
                Some(&i) => i,
                None => {
                    let i = table.flights.len() as u32;
                    flight_index.insert(entry.flight.clone(), i);
                    table.flights.push(entry.flight);
                    i
                }
            };
            let record = ArrivalRecord {
                passenger:     entry.passenger,
                flight,
                category:      entry.category,
                arrival_tick:  config.tick_at(entry.arrival),
                service_ticks: config.ticks_for_secs(secs),
            };
            table.push(record);
        }

        for bucket in table.by_tick.values_mut() {
            bucket.sort_unstable_by_key(|r| r.passenger);
        }
        Ok(table)
    }

    /// Build directly from tick-level records.  Buckets are sorted by
    /// passenger id; flight names are not known.
    pub fn from_records(records: impl IntoIterator<Item = ArrivalRecord>) -> Self {
        let mut table = Self::default();
        for r in records {
            table.push(r);
        }
        for bucket in table.by_tick.values_mut() {
            bucket.sort_unstable_by_key(|r| r.passenger);
        }
        table
    }

    fn push(&mut self, record: ArrivalRecord) {
        self.by_tick.entry(record.arrival_tick).or_default().push(record);
        self.total += 1;
    }

    /// Total passengers in the table.
    pub fn passenger_count(&self) -> usize {
        self.total
    }

    /// Distinct flights in the manifest the table was built from.
    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    /// Flight names in first-seen manifest order.
    pub fn flights(&self) -> &[String] {
        &self.flights
    }

    /// Name of the flight a record arrived on.
    pub fn flight_of(&self, record: &ArrivalRecord) -> Option<&str> {
        self.flights.get(record.flight as usize).map(String::as_str)
    }

    /// Passengers per category.
    pub fn count_by_category(&self, category: Category) -> usize {
        self.records().filter(|r| r.category == category).count()
    }

    /// Passengers whose arrival falls after `end`; they never enter a run
    /// that stops at `end`.
    pub fn arriving_after(&self, end: Tick) -> usize {
        self.by_tick
            .range(Tick(end.0 + 1)..)
            .map(|(_, bucket)| bucket.len())
            .sum()
    }

    /// The earliest tick with at least one arrival.
    pub fn first_tick(&self) -> Option<Tick> {
        self.by_tick.keys().next().copied()
    }

    /// Every record, in tick order then passenger order.
    pub fn records(&self) -> impl Iterator<Item = &ArrivalRecord> {
        self.by_tick.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl ArrivalSource for ArrivalTable {
    fn passengers_arriving(&self, tick: Tick) -> &[ArrivalRecord] {
        self.by_tick.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    fn first_of_each_category(&self) -> Vec<&ArrivalRecord> {
        Category::ALL
            .iter()
            .filter_map(|&c| self.records().find(|r| r.category == c))
            .collect()
    }
}
