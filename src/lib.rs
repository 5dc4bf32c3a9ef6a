// src/lib.rs

// Monte Carlo cost comparison of cooling-fan replacement policies.
// A unit has three fans. On each failure the current policy swaps only the
// failed fan while the proposed policy swaps all three.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimError};
