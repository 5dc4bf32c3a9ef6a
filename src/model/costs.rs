// src/model/costs.rs

use serde::{Deserialize, Serialize};

use crate::model::policy::PolicyParameters;

pub const FAN_UNIT_COST: f64 = 32.0;
pub const DOWNTIME_COST_PER_MINUTE: f64 = 10.0;
pub const LABOR_COST_PER_HOUR: f64 = 30.0;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Prices used by the cost model ($ per fan, $ per minute down, $ per labor hour).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConstants {
    pub fan_unit_cost: f64,
    pub downtime_cost_per_minute: f64,
    pub labor_cost_per_hour: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        Self {
            fan_unit_cost: FAN_UNIT_COST,
            downtime_cost_per_minute: DOWNTIME_COST_PER_MINUTE,
            labor_cost_per_hour: LABOR_COST_PER_HOUR,
        }
    }
}

impl CostConstants {
    /// Cost of one failure event handled under `policy` after a technician
    /// delay of `delay_minutes`.
    ///
    /// Downtime covers the delay plus the replacement itself; labor is billed
    /// for the replacement duration only.
    pub fn event_cost(&self, policy: &PolicyParameters, delay_minutes: f64) -> EventCost {
        let duration = policy.replacement_duration_minutes;
        EventCost {
            replacement: f64::from(policy.fans_to_replace) * self.fan_unit_cost,
            downtime: (delay_minutes + duration) * self.downtime_cost_per_minute,
            labor: duration * self.labor_cost_per_hour / MINUTES_PER_HOUR,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        [
            self.fan_unit_cost,
            self.downtime_cost_per_minute,
            self.labor_cost_per_hour,
        ]
        .iter()
        .all(|c| c.is_finite() && *c >= 0.0)
    }
}

/// Breakdown of a single event's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventCost {
    pub replacement: f64,
    pub downtime: f64,
    pub labor: f64,
}

impl EventCost {
    pub fn total(&self) -> f64 {
        self.replacement + self.downtime + self.labor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_policy_event_with_short_delay() {
        let cost = CostConstants::default().event_cost(&PolicyParameters::current(), 20.0);
        assert_eq!(cost.replacement, 32.0);
        assert_eq!(cost.downtime, 400.0);
        assert_eq!(cost.labor, 10.0);
        assert_eq!(cost.total(), 442.0);
    }

    #[test]
    fn proposed_policy_event_with_short_delay() {
        let cost = CostConstants::default().event_cost(&PolicyParameters::proposed(), 20.0);
        assert_eq!(cost.replacement, 96.0);
        assert_eq!(cost.downtime, 600.0);
        assert_eq!(cost.labor, 20.0);
        assert_eq!(cost.total(), 716.0);
    }

    #[test]
    fn longest_delay_only_moves_downtime() {
        let costs = CostConstants::default();
        let short = costs.event_cost(&PolicyParameters::current(), 20.0);
        let long = costs.event_cost(&PolicyParameters::current(), 45.0);
        assert_eq!(long.downtime - short.downtime, 250.0);
        assert_eq!(long.labor, short.labor);
        assert_eq!(long.replacement, short.replacement);
    }

    #[test]
    fn negative_prices_are_invalid() {
        let costs = CostConstants {
            labor_cost_per_hour: -1.0,
            ..CostConstants::default()
        };
        assert!(!costs.is_valid());
        assert!(CostConstants::default().is_valid());
    }
}
