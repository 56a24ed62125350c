//! `cs-optimize` — staffing search over repeated simulations.
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `OptimizerConfig`, `DEFAULT_MOMENTUM`                      |
//! | [`greedy`]    | `GreedyOptimizer`, `Optimized`, `HourDecision`, `HourOutcome` |
//! | [`heuristic`] | `apportion` — linear comparison plan                       |
//! | [`error`]     | `OptimizeError`, `OptimizeResult<T>`                       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Candidate counts within one search step run on Rayon.        |
//!
//! The per-hour search itself is sequential: each hour starts from the
//! counts its predecessors settled on.

pub mod config;
pub mod error;
pub mod greedy;
pub mod heuristic;


pub use config::{DEFAULT_MOMENTUM, OptimizerConfig};
pub use error::{OptimizeError, OptimizeResult};
pub use greedy::{GreedyOptimizer, HourDecision, HourOutcome, Optimized};
pub use heuristic::apportion;
