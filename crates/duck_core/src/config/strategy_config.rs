//! Capture strategy parameters.

use serde::{Deserialize, Serialize};

/// No proposal is ever rated below this chance.
pub const SUCCESS_FLOOR: f64 = 5.0;
/// No proposal is ever rated above this chance.
pub const SUCCESS_CEILING: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Success chance before readiness, threat and affinity (default: 55)
    pub base_chance: f64,
    /// Points swung by drone readiness between empty and full (default: 40)
    pub readiness_weight: f64,
    /// Points swung by the creature threat between 0 and 100 (default: 20)
    pub threat_weight: f64,
    /// Bonus/penalty for a favorable/unfavorable tactic (default: 15)
    pub affinity_adjustment: f64,
    pub min_success: f64,
    pub max_success: f64,
    /// Width of the tactic preference curve around the threat level (default: 0.2)
    pub selection_spread: f64,
    /// Shifts the preferred tactic intensity; negative leans stealthy (default: 0)
    pub aggression_offset: f64,
    /// Weight multiplier for defenses matching the creature's power (default: 6)
    pub defense_bias: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            base_chance: 55.0,
            readiness_weight: 40.0,
            threat_weight: 20.0,
            affinity_adjustment: 15.0,
            min_success: 5.0,
            max_success: 95.0,
            selection_spread: 0.2,
            aggression_offset: 0.0,
            defense_bias: 6.0,
        }
    }
}

impl StrategyConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let bounded = SUCCESS_FLOOR <= self.min_success
            && self.min_success < self.max_success
            && self.max_success <= SUCCESS_CEILING;
        if !bounded {
            return Err(format!(
                "strategy success bounds must satisfy {} <= min < max <= {}, got [{}, {}]",
                SUCCESS_FLOOR, SUCCESS_CEILING, self.min_success, self.max_success
            ));
        }
        if !self.base_chance.is_finite() {
            return Err(format!("strategy.base_chance must be finite, got {}", self.base_chance));
        }
        let non_negative = [
            ("readiness_weight", self.readiness_weight),
            ("threat_weight", self.threat_weight),
            ("affinity_adjustment", self.affinity_adjustment),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("strategy.{} must be a non-negative number, got {}", name, value));
            }
        }
        if !(self.selection_spread > 0.0 && self.defense_bias >= 1.0) {
            return Err("strategy.selection_spread must be > 0 and strategy.defense_bias >= 1".to_string());
        }
        if !(-1.0..=1.0).contains(&self.aggression_offset) {
            return Err(format!(
                "strategy.aggression_offset must be within [-1, 1], got {}",
                self.aggression_offset
            ));
        }
        Ok(())
    }
}
