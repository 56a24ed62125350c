//! `cs-schedule` — who is on duty, who is arriving, and CSV loading.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`roster`]    | `ServerSpec`, `Roster`                                     |
//! | [`provider`]  | `ScheduleProvider` trait, `AlwaysOnline`                   |
//! | [`window`]    | `HourWindow`, `WindowSchedule`, `check_tiling`             |
//! | [`staffing`]  | `StaffingPlan`, `SubsectionStaffing`                       |
//! | [`arrivals`]  | `ManifestEntry`, `ArrivalRecord`, `ArrivalTable`, `ArrivalSource` |
//! | [`loader`]    | `load_arrivals_csv`, `load_server_schedule_csv`, `load_staffing_csv` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Availability model (summary)
//!
//! The simulator asks a `ScheduleProvider` whether a server is online once
//! per tick, passing the hour of day:
//!
//! ```text
//! WindowSchedule : online = flag of the window containing `hour`
//! StaffingPlan   : online = server.rank < hourly_count[category][hour]
//! ```
//!
//! Both are validated at load time so that a lookup can never fail inside
//! the tick loop.

pub mod arrivals;
pub mod error;
pub mod loader;
pub mod provider;
pub mod roster;
pub mod staffing;
pub mod window;

#[cfg(test)]
mod tests;

pub use arrivals::{ArrivalRecord, ArrivalSource, ArrivalTable, ManifestEntry};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{
    load_arrivals_csv, load_arrivals_reader, load_server_schedule_csv,
    load_server_schedule_reader, load_staffing_csv, load_staffing_reader,
};
pub use provider::{AlwaysOnline, ScheduleProvider};
pub use roster::{Roster, ServerSpec};
pub use staffing::{StaffingPlan, SubsectionStaffing};
pub use window::{HourWindow, WindowSchedule, check_tiling};
