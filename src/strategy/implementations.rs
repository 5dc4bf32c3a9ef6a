// src/strategy/implementations.rs

use crate::error::Result;
use crate::model::policy::{PolicyKind, PolicyParameters, FANS_PER_UNIT};
use crate::strategy::traits::{FanLives, ReplacementPolicy};

// =========================================================================
// 1. Replace Failed Fan (Current)
// =========================================================================

/// Swap only the fan that failed. The other two keep aging.
#[derive(Debug, Clone)]
pub struct ReplaceFailedFan {
    replacement_duration_minutes: f64,
}

impl ReplaceFailedFan {
    pub fn new(replacement_duration_minutes: f64) -> Self {
        Self {
            replacement_duration_minutes,
        }
    }
}

impl ReplacementPolicy for ReplaceFailedFan {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Current
    }

    fn parameters(&self) -> PolicyParameters {
        PolicyParameters {
            fans_to_replace: 1,
            replacement_duration_minutes: self.replacement_duration_minutes,
        }
    }

    fn renew(&self, lives: &mut FanLives, failed: usize, fresh: &FanLives) -> u32 {
        lives[failed] = fresh[0];
        1
    }
}

// =========================================================================
// 2. Replace All Fans (Proposed)
// =========================================================================

/// Swap every fan in the unit whenever any one of them fails.
#[derive(Debug, Clone)]
pub struct ReplaceAllFans {
    replacement_duration_minutes: f64,
}

impl ReplaceAllFans {
    pub fn new(replacement_duration_minutes: f64) -> Self {
        Self {
            replacement_duration_minutes,
        }
    }
}

impl ReplacementPolicy for ReplaceAllFans {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Proposed
    }

    fn parameters(&self) -> PolicyParameters {
        PolicyParameters {
            fans_to_replace: FANS_PER_UNIT as u32,
            replacement_duration_minutes: self.replacement_duration_minutes,
        }
    }

    fn renew(&self, lives: &mut FanLives, _failed: usize, fresh: &FanLives) -> u32 {
        *lives = *fresh;
        FANS_PER_UNIT as u32
    }
}

// =========================================================================
// 3. Replace Most Worn Fans
// =========================================================================

/// Swap the failed fan plus the most worn of the survivors, `count` fans in
/// total. Covers visits that replace some but not all fans.
#[derive(Debug, Clone)]
pub struct ReplaceMostWorn {
    kind: PolicyKind,
    count: usize,
    replacement_duration_minutes: f64,
}

impl ReplaceMostWorn {
    pub fn new(kind: PolicyKind, count: usize, replacement_duration_minutes: f64) -> Self {
        Self {
            kind,
            count: count.clamp(1, FANS_PER_UNIT),
            replacement_duration_minutes,
        }
    }
}

impl ReplacementPolicy for ReplaceMostWorn {
    fn kind(&self) -> PolicyKind {
        self.kind
    }

    fn parameters(&self) -> PolicyParameters {
        PolicyParameters {
            fans_to_replace: self.count as u32,
            replacement_duration_minutes: self.replacement_duration_minutes,
        }
    }

    fn renew(&self, lives: &mut FanLives, failed: usize, fresh: &FanLives) -> u32 {
        // Failed fan first, then survivors by remaining life, shortest first.
        let mut order: Vec<usize> = (0..FANS_PER_UNIT).filter(|&i| i != failed).collect();
        order.sort_by(|&a, &b| lives[a].total_cmp(&lives[b]));
        order.insert(0, failed);

        for (slot, &fan) in order.iter().take(self.count).enumerate() {
            lives[fan] = fresh[slot];
        }
        self.count as u32
    }
}

/// Picks the strategy matching validated `params`.
pub fn policy_for(kind: PolicyKind, params: &PolicyParameters) -> Result<Box<dyn ReplacementPolicy>> {
    params.validate()?;
    let duration = params.replacement_duration_minutes;
    let policy: Box<dyn ReplacementPolicy> = match params.fans_to_replace as usize {
        1 if kind == PolicyKind::Current => Box::new(ReplaceFailedFan::new(duration)),
        FANS_PER_UNIT if kind == PolicyKind::Proposed => Box::new(ReplaceAllFans::new(duration)),
        count => Box::new(ReplaceMostWorn::new(kind, count, duration)),
    };
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH: FanLives = [1500.0, 1600.0, 1700.0];

    #[test]
    fn failed_fan_policy_touches_one_slot() {
        let mut lives = [300.0, 0.0, 100.0];
        let swapped = ReplaceFailedFan::new(20.0).renew(&mut lives, 1, &FRESH);
        assert_eq!(swapped, 1);
        assert_eq!(lives, [300.0, 1500.0, 100.0]);
    }

    #[test]
    fn all_fans_policy_resets_unit() {
        let mut lives = [300.0, 0.0, 100.0];
        let swapped = ReplaceAllFans::new(40.0).renew(&mut lives, 1, &FRESH);
        assert_eq!(swapped, 3);
        assert_eq!(lives, FRESH);
    }

    #[test]
    fn most_worn_policy_takes_shortest_survivor() {
        let mut lives = [300.0, 0.0, 100.0];
        let policy = ReplaceMostWorn::new(PolicyKind::Current, 2, 30.0);
        assert_eq!(policy.renew(&mut lives, 1, &FRESH), 2);
        assert_eq!(lives, [300.0, 1500.0, 1600.0]);
        assert_eq!(policy.parameters().fans_to_replace, 2);
    }

    #[test]
    fn policy_for_matches_stock_parameters() {
        let current = policy_for(PolicyKind::Current, &PolicyParameters::current()).unwrap();
        let proposed = policy_for(PolicyKind::Proposed, &PolicyParameters::proposed()).unwrap();
        assert_eq!(current.parameters(), PolicyParameters::current());
        assert_eq!(proposed.parameters(), PolicyParameters::proposed());
        assert_eq!(proposed.kind(), PolicyKind::Proposed);
    }

    #[test]
    fn policy_for_rejects_invalid_parameters() {
        let params = PolicyParameters {
            fans_to_replace: 0,
            replacement_duration_minutes: 20.0,
        };
        assert!(policy_for(PolicyKind::Current, &params).is_err());
    }
}
