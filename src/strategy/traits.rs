// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::policy::{PolicyKind, PolicyParameters, FANS_PER_UNIT};

/// Remaining life (hours) of each fan in a unit.
pub type FanLives = [f64; FANS_PER_UNIT];

/// Defines how a unit is serviced when one of its fans fails.
///
/// We require `Send` + `Sync` so policies can be shared across trials.
pub trait ReplacementPolicy: Debug + Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Cost-model parameters for one service visit.
    fn parameters(&self) -> PolicyParameters;

    /// Installs fresh fans after a failure and returns how many were swapped.
    ///
    /// # Arguments
    /// * `lives` - Remaining life of each fan; the failed fan sits at 0.
    /// * `failed` - Index of the fan that just failed.
    /// * `fresh` - Lifetimes of new fans, used in order.
    fn renew(&self, lives: &mut FanLives, failed: usize, fresh: &FanLives) -> u32;
}
