//! `StaffingPlan` — desired server counts per subsection per hour.
//!
//! This is the optimizer's working copy of the schedule.  Counts are always
//! clamped to `1..=max`; the optimizer never sees an out-of-range value and
//! never has to treat clamping as an error.
//!
//! A count of `n` for an hour brings the `n` lowest-id booths of that
//! subsection online (see [`ServerSpec::rank`]).

use std::collections::BTreeMap;

use cs_core::{Category, HOURS_PER_DAY};

use crate::roster::{Roster, ServerSpec};
use crate::{ScheduleError, ScheduleProvider, ScheduleResult};

const HOURS: usize = HOURS_PER_DAY as usize;

/// Hourly counts for one subsection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsectionStaffing {
    /// Upper bound on the count for any hour.
    pub max:    u32,
    /// Desired online servers for hours 0..24.
    pub hourly: [u32; HOURS],
}

impl SubsectionStaffing {
    /// Every hour at `max`.
    pub fn at_max(max: u32) -> Self {
        Self { max, hourly: [max; HOURS] }
    }

    #[inline]
    fn clamp(&self, count: u32) -> u32 {
        count.clamp(1, self.max.max(1))
    }
}

/// Desired server counts per subsection per hour of the day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaffingPlan {
    sections: BTreeMap<Category, SubsectionStaffing>,
}

impl StaffingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plan with every roster subsection fully staffed all day.
    pub fn at_capacity(roster: &Roster) -> Self {
        let sections = roster
            .categories()
            .map(|c| (c, SubsectionStaffing::at_max(roster.capacity(c))))
            .collect();
        Self { sections }
    }

    /// Add or replace one subsection's counts.
    ///
    /// Rejects counts outside `1..=max`; use the clamping setters for
    /// optimizer adjustments.
    pub fn insert(&mut self, category: Category, staffing: SubsectionStaffing) -> ScheduleResult<()> {
        if staffing.max == 0 {
            return Err(ScheduleError::Parse(format!("{category} maximum must be at least 1")));
        }
        if let Some((hour, count)) = staffing
            .hourly
            .iter()
            .enumerate()
            .find(|&(_, &n)| n == 0 || n > staffing.max)
        {
            return Err(ScheduleError::Parse(format!(
                "{category} hour {hour}: {count} servers is outside 1..={}",
                staffing.max
            )));
        }
        self.sections.insert(category, staffing);
        Ok(())
    }

    /// Subsections in the plan, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.keys().copied()
    }

    pub fn section(&self, category: Category) -> ScheduleResult<&SubsectionStaffing> {
        self.sections
            .get(&category)
            .ok_or(ScheduleError::UnknownSubsection(category))
    }

    fn section_mut(&mut self, category: Category) -> ScheduleResult<&mut SubsectionStaffing> {
        self.sections
            .get_mut(&category)
            .ok_or(ScheduleError::UnknownSubsection(category))
    }

    /// Desired count for one hour.
    pub fn servers(&self, category: Category, hour: u32) -> ScheduleResult<u32> {
        self.section(category)?
            .hourly
            .get(hour as usize)
            .copied()
            .ok_or(ScheduleError::HourOutOfRange(hour))
    }

    pub fn max_for(&self, category: Category) -> ScheduleResult<u32> {
        Ok(self.section(category)?.max)
    }

    /// Set one hour only.  Returns the clamped value actually stored.
    pub fn set(&mut self, category: Category, hour: u32, count: u32) -> ScheduleResult<u32> {
        let section = self.section_mut(category)?;
        let count = section.clamp(count);
        let slot = section
            .hourly
            .get_mut(hour as usize)
            .ok_or(ScheduleError::HourOutOfRange(hour))?;
        *slot = count;
        Ok(count)
    }

    /// Set `hour` and every later hour of the day to `count`.  Returns the
    /// clamped value actually stored.
    pub fn adjust_from(&mut self, category: Category, hour: u32, count: u32) -> ScheduleResult<u32> {
        let section = self.section_mut(category)?;
        let count = section.clamp(count);
        let later = section
            .hourly
            .get_mut(hour as usize..)
            .filter(|slots| !slots.is_empty())
            .ok_or(ScheduleError::HourOutOfRange(hour))?;
        for slot in later {
            *slot = count;
        }
        Ok(count)
    }

    /// Server-hours for the day: the sum of hourly counts.
    pub fn server_hours(&self, category: Category) -> ScheduleResult<u32> {
        Ok(self.section(category)?.hourly.iter().sum())
    }

    /// Check that no subsection asks for more booths than the roster has and
    /// that every roster subsection is planned.
    pub fn validate_against(&self, roster: &Roster) -> ScheduleResult<()> {
        for category in roster.categories() {
            let section = self.section(category)?;
            let available = roster.capacity(category);
            if section.max > available {
                return Err(ScheduleError::Capacity { category, max: section.max, available });
            }
        }
        Ok(())
    }
}

impl ScheduleProvider for StaffingPlan {
    fn is_online(&self, server: &ServerSpec, hour: u32) -> bool {
        self.sections
            .get(&server.category)
            .and_then(|s| s.hourly.get(hour as usize))
            .is_some_and(|&count| server.rank < count)
    }
}
