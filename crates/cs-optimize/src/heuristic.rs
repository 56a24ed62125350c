//! Linear staffing heuristic used as a comparison baseline.
//!
//! The reference report's server-hours over its active hours (hours with at
//! least one arrival) are spread in proportion to each hour's arrivals:
//!
//! ```text
//! people_per_server = total_arrivals / Σ num_servers over active hours
//! count[h]          = round(arrivals[h] / people_per_server), clamped to 1..=max
//! ```
//!
//! Idle hours keep the base plan's count.  The heuristic never feeds back
//! into the greedy search.

use cs_schedule::StaffingPlan;
use cs_sim::{HourlyRow, SimReport};

use crate::OptimizeResult;

/// Apportion `reference`'s active server-hours across hours by arrival
/// volume.
///
/// `base` supplies the subsections, their maxima and the counts kept for
/// idle hours.  A subsection with no arrivals in the reference is left as
/// `base` has it.
pub fn apportion(reference: &SimReport, base: &StaffingPlan) -> OptimizeResult<StaffingPlan> {
    let mut plan = base.clone();
    let categories: Vec<_> = base.categories().collect();

    for category in categories {
        let active: Vec<&HourlyRow> =
            reference.rows_for(category).filter(|r| r.arrival_count > 0).collect();
        let server_hours: u32 = active.iter().map(|r| r.num_servers).sum();
        if server_hours == 0 {
            continue;
        }
        let people_per_server = reference.total_arrivals(category) as f64 / server_hours as f64;

        for row in active {
            let count = (row.arrival_count as f64 / people_per_server).round() as u32;
            plan.set(category, row.hour, count)?;
        }
    }

    Ok(plan)
}
