// src/model/policy.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Number of fans in one cooling unit.
pub const FANS_PER_UNIT: usize = 3;

/// Minutes to swap a single fan.
pub const REP_TIME_CURRENT: f64 = 20.0;
/// Minutes to swap all three fans.
pub const REP_TIME_PROPOSED: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    Current,
    Proposed,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "Current"),
            Self::Proposed => write!(f, "Proposed"),
        }
    }
}

/// How many fans a policy swaps per failure and how long the swap takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    pub fans_to_replace: u32,
    pub replacement_duration_minutes: f64,
}

impl PolicyParameters {
    pub fn new(fans_to_replace: u32, replacement_duration_minutes: f64) -> Result<Self> {
        let params = Self {
            fans_to_replace,
            replacement_duration_minutes,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace only the failed fan.
    pub fn current() -> Self {
        Self {
            fans_to_replace: 1,
            replacement_duration_minutes: REP_TIME_CURRENT,
        }
    }

    /// Replace all three fans on every failure.
    pub fn proposed() -> Self {
        Self {
            fans_to_replace: FANS_PER_UNIT as u32,
            replacement_duration_minutes: REP_TIME_PROPOSED,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fans_to_replace == 0 {
            return Err(SimError::InvalidPolicy {
                details: "fans_to_replace must be positive".to_string(),
            });
        }
        if self.fans_to_replace as usize > FANS_PER_UNIT {
            return Err(SimError::InvalidPolicy {
                details: format!(
                    "fans_to_replace is {} but a unit only has {FANS_PER_UNIT} fans",
                    self.fans_to_replace
                ),
            });
        }
        if !(self.replacement_duration_minutes.is_finite() && self.replacement_duration_minutes > 0.0)
        {
            return Err(SimError::InvalidPolicy {
                details: format!(
                    "replacement_duration_minutes must be positive, got {}",
                    self.replacement_duration_minutes
                ),
            });
        }
        Ok(())
    }
}

/// The two random draws behind one failure event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventSample {
    pub delay_minutes: f64,
    pub lifetime_hours: f64,
}
