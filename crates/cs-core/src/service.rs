//! Service-duration sampling.
//!
//! Durations are drawn in seconds and converted to ticks by the caller
//! (`SimConfig::ticks_for_secs`).  Each passenger is sampled exactly once; the
//! `ServiceTimeSampler` seam exists so tests and calibration runs can pin the
//! duration without touching the RNG.

use rand_distr::Triangular;

use crate::{Category, ClockTime, CoreError, CoreResult, SimRng};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Lower / mode / upper bounds of a triangular distribution, in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularParams {
    pub lower_secs: u32,
    pub mode_secs:  u32,
    pub upper_secs: u32,
}

impl TriangularParams {
    /// Parse three `HH:MM:SS` strings.
    pub fn parse(lower: &str, mode: &str, upper: &str) -> CoreResult<Self> {
        Ok(Self {
            lower_secs: lower.parse::<ClockTime>()?.secs(),
            mode_secs:  mode.parse::<ClockTime>()?.secs(),
            upper_secs: upper.parse::<ClockTime>()?.secs(),
        })
    }
}

/// Per-category service-time distributions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceTimeConfig {
    pub domestic: TriangularParams,
    pub foreign:  TriangularParams,
}

impl Default for ServiceTimeConfig {
    /// 30 s / 1 min / 2 min for nationals, 1 / 2 / 4 min for everyone else.
    fn default() -> Self {
        Self {
            domestic: TriangularParams { lower_secs: 30, mode_secs: 60,  upper_secs: 120 },
            foreign:  TriangularParams { lower_secs: 60, mode_secs: 120, upper_secs: 240 },
        }
    }
}

impl ServiceTimeConfig {
    pub fn params(&self, category: Category) -> TriangularParams {
        match category {
            Category::Domestic => self.domestic,
            Category::Foreign  => self.foreign,
        }
    }
}

// ── Samplers ──────────────────────────────────────────────────────────────────

/// Source of pre-sampled service durations.
pub trait ServiceTimeSampler {
    /// Draw one service duration, in whole seconds, for a passenger of
    /// `category`.
    fn sample_secs(&self, category: Category, rng: &mut SimRng) -> u32;
}

/// Triangular distribution per category, truncated to whole seconds.
#[derive(Debug, Clone)]
pub struct TriangularSampler {
    domestic: Triangular<f64>,
    foreign:  Triangular<f64>,
}

impl TriangularSampler {
    pub fn new(config: &ServiceTimeConfig) -> CoreResult<Self> {
        Ok(Self {
            domestic: build_triangular(Category::Domestic, config.domestic)?,
            foreign:  build_triangular(Category::Foreign, config.foreign)?,
        })
    }
}

impl ServiceTimeSampler for TriangularSampler {
    fn sample_secs(&self, category: Category, rng: &mut SimRng) -> u32 {
        let dist = match category {
            Category::Domestic => &self.domestic,
            Category::Foreign  => &self.foreign,
        };
        rng.sample::<f64, _>(dist) as u32
    }
}

/// Every passenger takes the same number of seconds.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler(pub u32);

impl ServiceTimeSampler for FixedSampler {
    #[inline]
    fn sample_secs(&self, _category: Category, _rng: &mut SimRng) -> u32 {
        self.0
    }
}

fn build_triangular(category: Category, p: TriangularParams) -> CoreResult<Triangular<f64>> {
    if p.lower_secs >= p.upper_secs {
        return Err(CoreError::Distribution {
            category,
            reason: format!("lower {} s must be below upper {} s", p.lower_secs, p.upper_secs),
        });
    }
    Triangular::new(p.lower_secs as f64, p.upper_secs as f64, p.mode_secs as f64).map_err(|e| {
        CoreError::Distribution { category, reason: format!("{e:?}") }
    })
}
