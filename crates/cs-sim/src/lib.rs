//! `cs-sim` — tick loop for the customs hall.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..=end_tick:
//!   ① Status    — every booth online/offline for hour_of(tick)
//!   ② Arrivals  — passengers arriving this tick join their subsection line
//!   ③ Assign    — line head → shortest open booth queue (lowest id on ties)
//!   ④ Serve     — complete when now == completion tick, then start next
//!   ⑤ Ledger    — completions appended, utilization sampled
//! ```
//!
//! The loop is single-threaded and RNG-free: service durations are fixed in
//! the arrivals table, so a run is a pure function of its inputs.
//!
//! # Crate layout
//!
//! | Module         | Contents                                         |
//! |----------------|--------------------------------------------------|
//! | [`passenger`]  | `Passenger`                                      |
//! | [`server`]     | `ServiceAgent`, `ServerState`                    |
//! | [`pool`]       | `ServerPool` (booth selection, utilization)      |
//! | [`subsection`] | `AssignmentAgent`, `Subsection`                  |
//! | [`customs`]    | `Customs` (routing, per-tick stepping)           |
//! | [`stats`]      | `HourlyRow`, `SimReport`                         |
//! | [`sim`]        | `Sim`                                            |
//! | [`builder`]    | `SimBuilder`, `simulate`                         |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(&roster, &arrivals, &window_schedule)
//!     .config(config)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod customs;
pub mod error;
pub mod observer;
pub mod passenger;
pub mod pool;
pub mod server;
pub mod sim;
pub mod stats;
pub mod subsection;


pub use builder::{SimBuilder, simulate};
pub use customs::Customs;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use passenger::Passenger;
pub use pool::ServerPool;
pub use server::{ServerState, ServiceAgent};
pub use sim::Sim;
pub use stats::{HourlyRow, SimReport};
pub use subsection::{AssignmentAgent, Subsection};
