//! Per-hour, per-subsection statistics.
//!
//! # Bucketing
//!
//! | Column                        | Bucketed by            | Aggregation                         |
//! |-------------------------------|------------------------|-------------------------------------|
//! | `arrival_count`               | passenger arrival hour | count                               |
//! | `average_wait`, `max_wait`    | passenger arrival hour | mean / max of start − arrival (min) |
//! | `average_server_utilization`  | tick hour              | mean of serving ÷ online per tick   |
//! | `num_servers`                 | tick hour              | max online booths seen              |
//!
//! A passenger who has not started service when the run ends contributes a
//! censored wait of `end_tick − arrival_tick`, so an understaffed hour can
//! never look better than a staffed one by simply leaving people in line.

use std::collections::BTreeMap;

use cs_core::{Category, SimConfig, Tick};

use crate::{Customs, Passenger};

// ── HourlyRow ─────────────────────────────────────────────────────────────────

/// One line of the hourly report.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyRow {
    pub hour:                       u32,
    pub category:                   Category,
    pub arrival_count:              u32,
    /// Minutes.
    pub average_wait:               f64,
    /// Minutes.
    pub max_wait:                   f64,
    pub average_server_utilization: f64,
    pub num_servers:                u32,
}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Outcome of one full run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    /// Category-major, hour-minor.
    pub rows:        Vec<HourlyRow>,
    /// Passengers who completed service.
    pub served:      usize,
    /// Passengers in service when the run ended.
    pub in_service:  usize,
    /// Passengers who never reached a booth before the run ended.
    pub stranded:    usize,
    /// Ticks processed, including tick 0.
    pub ticks:       u64,
}

impl SimReport {
    pub fn row(&self, category: Category, hour: u32) -> Option<&HourlyRow> {
        self.rows.iter().find(|r| r.category == category && r.hour == hour)
    }

    pub fn rows_for(&self, category: Category) -> impl Iterator<Item = &HourlyRow> {
        self.rows.iter().filter(move |r| r.category == category)
    }

    /// Average wait in minutes; 0 for an hour without arrivals.
    pub fn average_wait(&self, category: Category, hour: u32) -> f64 {
        self.row(category, hour).map_or(0.0, |r| r.average_wait)
    }

    pub fn arrival_count(&self, category: Category, hour: u32) -> u32 {
        self.row(category, hour).map_or(0, |r| r.arrival_count)
    }

    /// Sum of `arrival_count` over all hours.
    pub fn total_arrivals(&self, category: Category) -> u32 {
        self.rows_for(category).map(|r| r.arrival_count).sum()
    }

    /// Sum of `num_servers` over all hours.
    pub fn server_hours(&self, category: Category) -> u32 {
        self.rows_for(category).map(|r| r.num_servers).sum()
    }

    /// Passengers the run accounted for.
    pub fn total_passengers(&self) -> usize {
        self.served + self.in_service + self.stranded
    }
}

// ── StatsCollector ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
struct Bucket {
    arrivals:     u32,
    wait_sum:     u64,
    wait_max:     u64,
    util_sum:     f64,
    util_samples: u64,
    max_online:   u32,
}

/// Accumulates buckets during a run and turns them into rows at the end.
#[derive(Clone, Debug)]
pub(crate) struct StatsCollector {
    config:  SimConfig,
    buckets: BTreeMap<Category, Vec<Bucket>>,
}

impl StatsCollector {
    pub(crate) fn new(config: &SimConfig, categories: impl Iterator<Item = Category>) -> Self {
        let hours = config.horizon_hours as usize;
        Self {
            config:  config.clone(),
            buckets: categories.map(|c| (c, vec![Bucket::default(); hours])).collect(),
        }
    }

    fn bucket(&mut self, category: Category, tick: Tick) -> Option<&mut Bucket> {
        let hour = self.config.hour_of(tick) as usize;
        self.buckets.get_mut(&category).and_then(|v| v.get_mut(hour))
    }

    /// Record end-of-tick booth state for every subsection.
    pub(crate) fn sample_tick(&mut self, now: Tick, customs: &Customs) {
        for sub in customs.subsections() {
            let pool = sub.pool();
            let online = pool.online_count();
            let util = pool.utilization();
            if let Some(b) = self.bucket(sub.category(), now) {
                b.util_sum += util;
                b.util_samples += 1;
                b.max_online = b.max_online.max(online);
            }
        }
    }

    /// Record one passenger's wait against their arrival hour.
    pub(crate) fn record_wait(&mut self, passenger: &Passenger, wait_ticks: u64) {
        if let Some(b) = self.bucket(passenger.category, passenger.arrival_tick) {
            b.arrivals += 1;
            b.wait_sum += wait_ticks;
            b.wait_max = b.wait_max.max(wait_ticks);
        }
    }

    pub(crate) fn into_rows(self) -> Vec<HourlyRow> {
        let config = self.config;
        self.buckets
            .into_iter()
            .flat_map(|(category, hours)| {
                let config = &config;
                hours.into_iter().enumerate().map(move |(hour, b)| HourlyRow {
                    hour:          hour as u32,
                    category,
                    arrival_count: b.arrivals,
                    average_wait:  if b.arrivals == 0 {
                        0.0
                    } else {
                        config.ticks_to_minutes(b.wait_sum) / b.arrivals as f64
                    },
                    max_wait:      config.ticks_to_minutes(b.wait_max),
                    average_server_utilization: if b.util_samples == 0 {
                        0.0
                    } else {
                        b.util_sum / b.util_samples as f64
                    },
                    num_servers:   b.max_online,
                })
            })
            .collect()
    }
}
