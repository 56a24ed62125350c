//! Optimizer settings.

use crate::{OptimizeError, OptimizeResult};

/// Default hill-climbing step.
pub const DEFAULT_MOMENTUM: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Target: an hour passes when its average wait is strictly below this.
    pub threshold_minutes: f64,
    /// Servers added or removed per search step.  Default: 3.
    pub momentum: u32,
}

impl OptimizerConfig {
    pub fn new(threshold_minutes: f64) -> Self {
        Self { threshold_minutes, momentum: DEFAULT_MOMENTUM }
    }

    pub fn validate(&self) -> OptimizeResult<()> {
        if !self.threshold_minutes.is_finite() || self.threshold_minutes < 0.0 {
            return Err(OptimizeError::Config(format!(
                "threshold {} must be a non-negative number of minutes",
                self.threshold_minutes
            )));
        }
        if self.momentum == 0 {
            return Err(OptimizeError::Config("momentum must be at least 1".into()));
        }
        Ok(())
    }

    /// Does an average wait satisfy the threshold?
    #[inline]
    pub fn meets(&self, average_wait: f64) -> bool {
        average_wait < self.threshold_minutes
    }
}
