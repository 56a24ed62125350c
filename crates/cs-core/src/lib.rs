//! `cs-core` — foundational types for the customs throughput simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (`rand`, `rand_distr`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PassengerId`, `ServerId`                             |
//! | [`category`]    | `Category` (domestic / foreign)                       |
//! | [`time`]        | `Tick`, `ClockTime`, `SimClock`, `SimConfig`          |
//! | [`rng`]         | `SimRng`                                              |
//! | [`service`]     | `ServiceTimeSampler`, `TriangularSampler`, `ServiceTimeConfig` |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod category;
pub mod error;
pub mod ids;
pub mod rng;
pub mod service;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::Category;
pub use error::{CoreError, CoreResult};
pub use ids::{PassengerId, ServerId};
pub use rng::SimRng;
pub use service::{
    FixedSampler, ServiceTimeConfig, ServiceTimeSampler, TriangularParams, TriangularSampler,
};
pub use time::{ClockTime, HOURS_PER_DAY, SimClock, SimConfig, Tick};
