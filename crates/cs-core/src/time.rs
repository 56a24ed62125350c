//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter starting
//! at midnight.  The mapping to time of day is fixed by the speed factor held
//! in `SimConfig::tick_duration_secs`:
//!
//!   seconds_since_midnight = tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit means all service and
//! wait arithmetic is exact (no floating-point drift).  Human-readable
//! `HH:MM:SS` strings exist only at the system boundary, through
//! [`ClockTime`].

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Hours in one simulated day.
pub const HOURS_PER_DAY: u32 = 24;

const SECS_PER_HOUR: u64 = 3_600;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Ticks since midnight.  Tick 0 starts the day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const MIDNIGHT: Tick = Tick(0);

    /// Ticks from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Advance by a duration in ticks.
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, ticks: u64) -> Tick {
        Tick(self.0 + ticks)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ClockTime ────────────────────────────────────────────────────────────────

/// A time of day parsed from, and formatted as, `HH:MM:SS`.
///
/// `24:00:00` is accepted as the end-of-day sentinel; anything later is not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ClockTime {
    secs: u32,
}

impl ClockTime {
    /// Build from seconds since midnight.  Fails past `24:00:00`.
    pub fn from_secs(secs: u32) -> CoreResult<Self> {
        if secs as u64 > HOURS_PER_DAY as u64 * SECS_PER_HOUR {
            return Err(CoreError::Parse(format!("{secs} s is past 24:00:00")));
        }
        Ok(Self { secs })
    }

    /// Seconds since midnight.
    #[inline]
    pub fn secs(self) -> u32 {
        self.secs
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::Parse(format!("invalid time {s:?}: expected HH:MM:SS"));

        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };

        let h: u32 = h.parse().map_err(|_| bad())?;
        let m: u32 = m.parse().map_err(|_| bad())?;
        let sec: u32 = sec.parse().map_err(|_| bad())?;
        if m >= 60 || sec >= 60 {
            return Err(bad());
        }

        ClockTime::from_secs(h * 3_600 + m * 60 + sec).map_err(|_| bad())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.secs / 3_600;
        let m = (self.secs % 3_600) / 60;
        let s = self.secs % 60;
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The current tick of one run, owned by its `Sim`.  Per-tick operations
/// take the tick as a parameter rather than reading the clock.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Seconds per tick (the speed factor).
    pub tick_duration_secs: u32,
    pub current_tick:       Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::MIDNIGHT }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Simulated seconds since midnight.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_secs as u64
    }
}

/// `T361 (01:00:10)`; past the end of the day the time of day is omitted.
impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u32::try_from(self.elapsed_secs()).ok().and_then(|s| ClockTime::from_secs(s).ok()) {
            Some(time) => write!(f, "{} ({time})", self.current_tick),
            None => write!(f, "{}", self.current_tick),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Per-run simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick (the speed factor).  Must evenly divide 3600 so
    /// that hour buckets align with tick boundaries.  Default: 10.
    pub tick_duration_secs: u32,

    /// Simulated hours per run.  Default: 24.
    pub horizon_hours: u32,

    /// Capacity of every booth's waiting line.  Default: 10.
    pub max_queue_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs: 10,
            horizon_hours:      HOURS_PER_DAY,
            max_queue_size:     10,
        }
    }
}

impl SimConfig {
    /// Reject configurations the tick loop cannot run exactly.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 || SECS_PER_HOUR % self.tick_duration_secs as u64 != 0 {
            return Err(CoreError::Config(format!(
                "tick duration {} s must be a non-zero divisor of 3600",
                self.tick_duration_secs
            )));
        }
        if self.horizon_hours == 0 || self.horizon_hours > HOURS_PER_DAY {
            return Err(CoreError::Config(format!(
                "horizon of {} h must be within 1..=24",
                self.horizon_hours
            )));
        }
        if self.max_queue_size == 0 {
            return Err(CoreError::Config("max queue size must be at least 1".into()));
        }
        Ok(())
    }

    /// The last tick the loop processes (inclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_hours as u64 * SECS_PER_HOUR / self.tick_duration_secs as u64)
    }

    /// Ticks per simulated hour.
    #[inline]
    pub fn ticks_per_hour(&self) -> u64 {
        SECS_PER_HOUR / self.tick_duration_secs as u64
    }

    /// Hour bucket for `tick`.  The horizon tick itself folds into the last
    /// hour.
    #[inline]
    pub fn hour_of(&self, tick: Tick) -> u32 {
        let hour = tick.0 / self.ticks_per_hour();
        (hour.min(self.horizon_hours as u64 - 1)) as u32
    }

    /// Tick at which a time of day falls (rounded down).
    #[inline]
    pub fn tick_at(&self, time: ClockTime) -> Tick {
        Tick(time.secs() as u64 / self.tick_duration_secs as u64)
    }

    /// How many ticks span `secs` seconds?  Rounds up, never below one tick,
    /// so a sampled service never completes on the tick it starts.
    #[inline]
    pub fn ticks_for_secs(&self, secs: u32) -> u64 {
        (secs as u64).div_ceil(self.tick_duration_secs as u64).max(1)
    }

    /// Convert a tick span to minutes of simulated time.
    #[inline]
    pub fn ticks_to_minutes(&self, ticks: u64) -> f64 {
        (ticks * self.tick_duration_secs as u64) as f64 / 60.0
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
