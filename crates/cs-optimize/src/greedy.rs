//! Greedy per-hour staffing search.
//!
//! # Search (per subsection)
//!
//! ```text
//! plan[*] = max
//! for hour in 0..horizon:
//!     skip if no passengers arrive in `hour`
//!     loop:
//!         passing → step down by M (floor 1), failing → step up by M (cap max)
//!         same side as before        → keep stepping
//!         failing → passing (going up)   → shed the surplus one at a time
//!         passing → failing (going down) → add back one at a time
//!     if the previous searched hour passed before and fails now,
//!         add servers to `hour` until it passes again or `hour` hits max
//!     re-record the previous searched hour's wait and outcome
//! ```
//!
//! The previous-hour check runs after every searched hour, not only after a
//! downward overshoot: any count `hour` settles on, including a climb, can
//! change how quickly the previous hour's queues drain.  Idle hours are not
//! searched and never become the previous hour.
//!
//! Every change to an hour's count is applied to that hour and all later
//! hours, so each hour starts its search from whatever its predecessor
//! settled on.  The search always starts from the maximum, so optimizing an
//! already-optimized plan reproduces it.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use cs_core::{Category, SimConfig};
use cs_schedule::{ArrivalSource, Roster, StaffingPlan};
use cs_sim::{SimError, SimReport, simulate};

use crate::{OptimizeResult, OptimizerConfig};

// ── Results ───────────────────────────────────────────────────────────────────

/// How the search ended for one hour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HourOutcome {
    /// No arrivals; the hour keeps the count it inherited.
    Idle,
    /// Average wait is below the threshold.
    MeetsThreshold,
    /// Even the subsection maximum cannot bring the wait under the threshold.
    Saturated,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourDecision {
    pub category:     Category,
    pub hour:         u32,
    pub servers:      u32,
    /// Minutes, re-measured after the next searched hour settles.
    pub average_wait: f64,
    pub outcome:      HourOutcome,
}

/// Output of one optimizer session.
#[derive(Clone, Debug)]
pub struct Optimized {
    pub plan:        StaffingPlan,
    /// Report of the final simulation of `plan`.
    pub report:      SimReport,
    pub decisions:   Vec<HourDecision>,
    /// Simulations run in this session, including the final one.
    pub simulations: usize,
    pub elapsed:     Duration,
}

impl Optimized {
    pub fn saturated_hours(&self) -> impl Iterator<Item = &HourDecision> {
        self.decisions.iter().filter(|d| d.outcome == HourOutcome::Saturated)
    }
}

// ── GreedyOptimizer ───────────────────────────────────────────────────────────

pub struct GreedyOptimizer<'a, A: ArrivalSource + Sync + ?Sized> {
    config:      OptimizerConfig,
    sim_config:  SimConfig,
    roster:      &'a Roster,
    arrivals:    &'a A,
    simulations: usize,
}

impl<'a, A: ArrivalSource + Sync + ?Sized> GreedyOptimizer<'a, A> {
    pub fn new(
        config:     OptimizerConfig,
        sim_config: SimConfig,
        roster:     &'a Roster,
        arrivals:   &'a A,
    ) -> Self {
        Self { config, sim_config, roster, arrivals, simulations: 0 }
    }

    /// Total simulations run by this optimizer so far.
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Simulate one plan.
    pub fn evaluate(&mut self, plan: &StaffingPlan) -> OptimizeResult<SimReport> {
        self.simulations += 1;
        Ok(simulate(&self.sim_config, self.roster, self.arrivals, plan)?)
    }

    /// Search every subsection of the roster.  `start` supplies the
    /// per-subsection maxima; its hourly counts are overwritten.
    pub fn optimize(&mut self, start: &StaffingPlan) -> OptimizeResult<Optimized> {
        self.config.validate()?;
        self.sim_config.validate().map_err(SimError::from)?;
        start.validate_against(self.roster)?;

        let started = Instant::now();
        let first = self.simulations;
        let mut plan = start.clone();
        let mut decisions = Vec::new();

        let categories: Vec<Category> = self.roster.categories().collect();
        for category in categories {
            let max = plan.max_for(category)?;
            plan.adjust_from(category, 0, max)?;
            decisions.extend(self.optimize_category(&mut plan, category)?);
        }

        let report = self.evaluate(&plan)?;
        Ok(Optimized {
            plan,
            report,
            decisions,
            simulations: self.simulations - first,
            elapsed: started.elapsed(),
        })
    }

    fn optimize_category(
        &mut self,
        plan:     &mut StaffingPlan,
        category: Category,
    ) -> OptimizeResult<Vec<HourDecision>> {
        let max = plan.max_for(category)?;
        let mut decisions: Vec<HourDecision> = Vec::new();
        let mut previous: Option<usize> = None;

        // Always a simulation of `plan` as it currently stands.
        let mut current = self.evaluate(plan)?;

        for hour in 0..self.sim_config.horizon_hours {
            if current.arrival_count(category, hour) == 0 {
                decisions.push(HourDecision {
                    category,
                    hour,
                    servers: plan.servers(category, hour)?,
                    average_wait: 0.0,
                    outcome: HourOutcome::Idle,
                });
                continue;
            }

            let (mut count, mut report) = self.search_hour(plan, category, hour, max, current)?;

            let broken_prev = previous
                .map(|i| &decisions[i])
                .filter(|p| {
                    p.outcome == HourOutcome::MeetsThreshold
                        && !self.config.meets(report.average_wait(category, p.hour))
                })
                .map(|p| p.hour);
            if let Some(prev_hour) = broken_prev {
                (count, report) =
                    self.restore_previous(plan, category, hour, prev_hour, count, max, report)?;
            }
            if let Some(i) = previous {
                let prev = &mut decisions[i];
                prev.average_wait = report.average_wait(category, prev.hour);
                let outcome = if self.config.meets(prev.average_wait) {
                    HourOutcome::MeetsThreshold
                } else {
                    HourOutcome::Saturated
                };
                if outcome != prev.outcome {
                    warn!(
                        %category,
                        hour = prev.hour,
                        wait = prev.average_wait,
                        ?outcome,
                        "earlier hour changed outcome after a later hour's search"
                    );
                    prev.outcome = outcome;
                }
            }

            let wait = report.average_wait(category, hour);
            let outcome = if self.config.meets(wait) {
                info!(%category, hour, servers = count, wait, "hour optimized");
                HourOutcome::MeetsThreshold
            } else {
                warn!(
                    %category,
                    hour,
                    servers = count,
                    wait,
                    threshold = self.config.threshold_minutes,
                    "threshold unreachable at maximum staffing"
                );
                HourOutcome::Saturated
            };
            decisions.push(HourDecision { category, hour, servers: count, average_wait: wait, outcome });
            previous = Some(decisions.len() - 1);
            current = report;
        }

        Ok(decisions)
    }

    /// Hill-climb one hour.  `report` is a simulation of `plan` as passed in.
    /// Leaves `plan` set to the chosen count and returns it with its report.
    fn search_hour(
        &mut self,
        plan:     &mut StaffingPlan,
        category: Category,
        hour:     u32,
        max:      u32,
        report:   SimReport,
    ) -> OptimizeResult<(u32, SimReport)> {
        let m = self.config.momentum;
        let cfg = self.config.clone();
        let passes = move |r: &SimReport| cfg.meets(r.average_wait(category, hour));

        let mut count = plan.servers(category, hour)?;
        let mut report = report;

        loop {
            let passing = passes(&report);
            if (passing && count == 1) || (!passing && count == max) {
                return Ok((count, report));
            }

            let next = if passing { count.saturating_sub(m).max(1) } else { (count + m).min(max) };
            let step = next.abs_diff(count);
            plan.adjust_from(category, hour, next)?;
            let next_report = self.evaluate(plan)?;

            match (passing, passes(&next_report)) {
                // Went up and now passes: the minimum is among the last
                // `step - 1` counts below `next`.
                (false, true) => {
                    let candidates: Vec<u32> = (1..step).map(|k| next - k).collect();
                    let tried = self.scan(plan, category, hour, &candidates, |r| !passes(r))?;
                    let pick = tried
                        .into_iter()
                        .take_while(|(_, r)| passes(r))
                        .last()
                        .unwrap_or((next, next_report));
                    plan.adjust_from(category, hour, pick.0)?;
                    return Ok(pick);
                }
                // Went down and now fails: add servers back one at a time.
                (true, false) => {
                    let candidates: Vec<u32> = (1..=step).map(|k| next + k).collect();
                    let mut tried = self.scan(plan, category, hour, &candidates, &passes)?;
                    let pick = match tried.iter().position(|(_, r)| passes(r)) {
                        Some(i) => tried.swap_remove(i),
                        None => tried.pop().unwrap_or((next, next_report)),
                    };
                    plan.adjust_from(category, hour, pick.0)?;
                    return Ok(pick);
                }
                _ => {
                    count = next;
                    report = next_report;
                }
            }
        }
    }

    /// Add servers to `hour` until `prev_hour` passes again or `hour` reaches
    /// `max`.
    #[allow(clippy::too_many_arguments)]
    fn restore_previous(
        &mut self,
        plan:      &mut StaffingPlan,
        category:  Category,
        hour:      u32,
        prev_hour: u32,
        count:     u32,
        max:       u32,
        report:    SimReport,
    ) -> OptimizeResult<(u32, SimReport)> {
        let cfg = self.config.clone();
        let prev_passes = move |r: &SimReport| cfg.meets(r.average_wait(category, prev_hour));

        let candidates: Vec<u32> = (count + 1..=max).collect();
        let mut tried = self.scan(plan, category, hour, &candidates, &prev_passes)?;
        let pick = match tried.iter().position(|(_, r)| prev_passes(r)) {
            Some(i) => tried.swap_remove(i),
            None => tried.pop().unwrap_or((count, report)),
        };
        plan.adjust_from(category, hour, pick.0)?;
        Ok(pick)
    }

    /// Simulate `candidates` (each applied from `hour` onwards on a copy of
    /// `plan`) in order, returning results up to and including the first one
    /// for which `stop` holds.
    fn scan<F>(
        &mut self,
        plan:       &StaffingPlan,
        category:   Category,
        hour:       u32,
        candidates: &[u32],
        stop:       F,
    ) -> OptimizeResult<Vec<(u32, SimReport)>>
    where
        F: Fn(&SimReport) -> bool + Sync,
    {
        #[cfg(not(feature = "parallel"))]
        {
            let mut out = Vec::with_capacity(candidates.len());
            for &count in candidates {
                let mut trial = plan.clone();
                trial.adjust_from(category, hour, count)?;
                let report = self.evaluate(&trial)?;
                let done = stop(&report);
                out.push((count, report));
                if done {
                    break;
                }
            }
            Ok(out)
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let (sim_config, roster, arrivals) = (&self.sim_config, self.roster, self.arrivals);
            let mut out = candidates
                .par_iter()
                .map(|&count| -> OptimizeResult<(u32, SimReport)> {
                    let mut trial = plan.clone();
                    trial.adjust_from(category, hour, count)?;
                    Ok((count, simulate(sim_config, roster, arrivals, &trial)?))
                })
                .collect::<OptimizeResult<Vec<_>>>()?;
            self.simulations += out.len();
            if let Some(i) = out.iter().position(|(_, r)| stop(r)) {
                out.truncate(i + 1);
            }
            Ok(out)
        }
    }
}
