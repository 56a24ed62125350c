//! Hour windows and the per-server on/off capacity table.
//!
//! # Window model
//!
//! A window such as `"6-9"` covers the half-open hour range `[6, 9)`.  The
//! windows of one schedule must tile the whole day: every hour 0–23 belongs
//! to exactly one window.  Gaps and overlaps are configuration errors caught
//! at load time, never mid-simulation.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use cs_core::{HOURS_PER_DAY, ServerId};

use crate::roster::ServerSpec;
use crate::{ScheduleError, ScheduleProvider, ScheduleResult};

// ── HourWindow ────────────────────────────────────────────────────────────────

/// A half-open range of hours of the day, `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourWindow {
    pub start: u32,
    pub end:   u32,
}

impl HourWindow {
    pub fn new(start: u32, end: u32) -> ScheduleResult<Self> {
        if start >= end || end > HOURS_PER_DAY {
            return Err(ScheduleError::Parse(format!(
                "invalid hour window {start}-{end}: expected start < end <= 24"
            )));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

impl FromStr for HourWindow {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ScheduleError::Parse(format!("invalid hour window {s:?}: expected \"H-H\""));
        let (a, b) = s.trim().split_once('-').ok_or_else(bad)?;
        let start: u32 = a.trim().parse().map_err(|_| bad())?;
        let end: u32 = b.trim().parse().map_err(|_| bad())?;
        HourWindow::new(start, end)
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Check that `windows` cover every hour of the day exactly once.
pub fn check_tiling(windows: &[HourWindow]) -> ScheduleResult<()> {
    let mut owner: [Option<HourWindow>; HOURS_PER_DAY as usize] = [None; HOURS_PER_DAY as usize];
    for w in windows {
        for h in w.hours() {
            if let Some(prev) = owner[h as usize] {
                return Err(ScheduleError::WindowCoverage(format!(
                    "hour {h} is covered by both {prev} and {w}"
                )));
            }
            owner[h as usize] = Some(*w);
        }
    }
    match owner.iter().position(Option::is_none) {
        Some(h) => Err(ScheduleError::WindowCoverage(format!("hour {h} is not covered"))),
        None => Ok(()),
    }
}

// ── WindowSchedule ────────────────────────────────────────────────────────────

/// Per-server on/off flags for each hour window, flattened to one flag per
/// hour at construction so lookups inside the tick loop are O(1).
#[derive(Clone, Debug, Default)]
pub struct WindowSchedule {
    windows: Vec<HourWindow>,
    hourly:  FxHashMap<ServerId, [bool; HOURS_PER_DAY as usize]>,
}

impl WindowSchedule {
    /// Build from the window header and one flag row per server.
    ///
    /// Each row's flags are positionally aligned with `windows`.
    pub fn new(
        windows: Vec<HourWindow>,
        rows:    Vec<(ServerId, Vec<bool>)>,
    ) -> ScheduleResult<Self> {
        check_tiling(&windows)?;

        let mut hourly = FxHashMap::default();
        for (id, flags) in rows {
            if flags.len() != windows.len() {
                return Err(ScheduleError::Parse(format!(
                    "server {id} has {} window flags, expected {}",
                    flags.len(),
                    windows.len()
                )));
            }
            let mut by_hour = [false; HOURS_PER_DAY as usize];
            for (w, &on) in windows.iter().zip(&flags) {
                for h in w.hours() {
                    by_hour[h as usize] = on;
                }
            }
            if hourly.insert(id, by_hour).is_some() {
                return Err(ScheduleError::DuplicateServer(id));
            }
        }

        Ok(Self { windows, hourly })
    }

    pub fn windows(&self) -> &[HourWindow] {
        &self.windows
    }

    /// Number of servers this schedule has a row for.
    pub fn server_count(&self) -> usize {
        self.hourly.len()
    }
}

impl ScheduleProvider for WindowSchedule {
    fn is_online(&self, server: &ServerSpec, hour: u32) -> bool {
        self.hourly
            .get(&server.id)
            .and_then(|flags| flags.get(hour as usize).copied())
            .unwrap_or(false)
    }
}
