//! # Capture Strategy Generator
//!
//! Picks a tactic, predicts the creature's defense and estimates the
//! success chance for one (creature, drone) pairing.
//!
//! ## Selection
//! Tactic weights follow a bell curve centred on the creature's threat
//! intensity (shifted by `aggression_offset`), so dangerous creatures draw
//! suppression and assault while dormant ones draw stealth and traps.
//! Defenses matching the creature's power class weigh `defense_bias` times
//! more than the rest. The tactic is drawn first, then the defense; with a
//! seeded RNG the whole proposal is reproducible.
//!
//! ## Success chance
//! ```text
//! base
//!   + readiness_weight * (readiness - 0.5)
//!   - threat_weight / 2 * (risk / 100 - 0.5)
//!   - threat_weight / 2 * (military / 100 - 0.5)
//!   ± affinity_adjustment
//! ```
//! clamped to `[min_success, max_success]`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analysis::{CaptureAnalyzer, ThreatProfile};
use crate::config::{EngineConfig, StrategyConfig, SUCCESS_CEILING, SUCCESS_FLOOR};
use crate::error::{Result, ValidationError};
use crate::models::{Creature, Drone, PowerClass};
use crate::operation::CaptureHistory;

use super::catalog::{Affinity, Defense, Tactic};

/// Terms of the success chance, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDriver {
    DroneReadiness,
    CreatureRisk,
    CreatureMilitaryPower,
    TacticAffinity,
}

impl ScoreDriver {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDriver::DroneReadiness => "drone readiness",
            ScoreDriver::CreatureRisk => "creature risk",
            ScoreDriver::CreatureMilitaryPower => "creature military power",
            ScoreDriver::TacticAffinity => "tactic affinity",
        }
    }
}

impl fmt::Display for ScoreDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points each term added to (or removed from) the base chance, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChanceBreakdown {
    pub base: f64,
    pub readiness: f64,
    pub risk: f64,
    pub military: f64,
    pub affinity: f64,
}

impl ChanceBreakdown {
    pub fn terms(&self) -> [(ScoreDriver, f64); 4] {
        [
            (ScoreDriver::DroneReadiness, self.readiness),
            (ScoreDriver::CreatureRisk, self.risk),
            (ScoreDriver::CreatureMilitaryPower, self.military),
            (ScoreDriver::TacticAffinity, self.affinity),
        ]
    }

    pub fn raw_total(&self) -> f64 {
        self.base + self.terms().iter().map(|(_, points)| points).sum::<f64>()
    }

    /// Largest absolute contribution; ties go to the earlier term.
    pub fn dominant(&self) -> (ScoreDriver, f64) {
        let terms = self.terms();
        let mut best = terms[0];
        for term in &terms[1..] {
            if term.1.abs() > best.1.abs() {
                best = *term;
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureStrategy {
    pub creature_id: Uuid,
    pub drone_id: Uuid,
    pub tactic: Tactic,
    pub defense: Defense,
    pub affinity: Affinity,
    /// Percent, within the configured bounds.
    pub success_chance: f64,
    pub threat: ThreatProfile,
    pub breakdown: ChanceBreakdown,
    pub dominant_factor: ScoreDriver,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyGenerator {
    analyzer: CaptureAnalyzer,
    config: StrategyConfig,
}

impl Default for StrategyGenerator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl StrategyGenerator {
    pub fn new(analyzer: CaptureAnalyzer, config: StrategyConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(CaptureAnalyzer::from_config(config), config.strategy.clone())
    }

    pub fn analyzer(&self) -> &CaptureAnalyzer {
        &self.analyzer
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Propose a strategy for `drone` against `creature`.
    ///
    /// Fails with a validation error for malformed input or a history that
    /// belongs to another creature, and with a capability error when the
    /// drone cannot capture or the creature is already captured.
    pub fn propose<R: Rng>(
        &self,
        creature: &Creature,
        history: &CaptureHistory,
        drone: &Drone,
        rng: &mut R,
    ) -> Result<CaptureStrategy> {
        creature.check()?;
        drone.check()?;
        if history.creature_id() != creature.id {
            return Err(ValidationError::IdentityMismatch {
                field: "history creature",
                expected: creature.id,
                found: history.creature_id(),
            }
            .into());
        }
        if let Err(err) = history.check_eligible(drone) {
            warn!(creature = %creature.id, drone = %drone.id, %err, "strategy refused");
            return Err(err.into());
        }

        let analysis = self.analyzer.analyze(creature);
        let threat = ThreatProfile::from_analysis(&analysis);

        let tactic = self.select_tactic(threat.intensity(), rng);
        let defense = self.predict_defense(creature.power_class(), rng);
        let affinity = Affinity::of(tactic, defense);

        let cfg = &self.config;
        let half_threat = cfg.threat_weight / 2.0;
        let breakdown = ChanceBreakdown {
            base: cfg.base_chance,
            readiness: cfg.readiness_weight * (drone.readiness() - 0.5),
            risk: -half_threat * (threat.risk_level / 100.0 - 0.5),
            military: -half_threat * (threat.military_power / 100.0 - 0.5),
            affinity: affinity.sign() * cfg.affinity_adjustment,
        };
        let success_chance = bound_chance(breakdown.raw_total(), cfg.min_success, cfg.max_success);
        let (dominant_factor, points) = breakdown.dominant();

        debug!(
            creature = %creature.id,
            drone = %drone.id,
            %tactic,
            %defense,
            %affinity,
            success_chance,
            "strategy proposed"
        );

        let reasoning = format!(
            "{} ({}) against a likely {} defense is a {} matchup; {} dominates at {:+.1} points for an estimated {:.1}% success chance",
            tactic,
            tactic.class(),
            defense,
            affinity,
            dominant_factor,
            points,
            success_chance
        );

        Ok(CaptureStrategy {
            creature_id: creature.id,
            drone_id: drone.id,
            tactic,
            defense,
            affinity,
            success_chance,
            threat,
            breakdown,
            dominant_factor,
            reasoning,
        })
    }

    /// Weighted draw over the tactic catalog, favoring intensities near the threat.
    pub fn select_tactic<R: Rng>(&self, threat_intensity: f64, rng: &mut R) -> Tactic {
        let target = (threat_intensity + self.config.aggression_offset).clamp(0.0, 1.0);
        let spread = self.config.selection_spread;
        let weights: Vec<f64> = Tactic::CATALOG
            .iter()
            .map(|t| {
                let d = t.intensity() - target;
                (-(d * d) / (2.0 * spread * spread)).exp()
            })
            .collect();

        match sample_index(&weights, rng) {
            Some(i) => Tactic::CATALOG[i],
            None => closest_tactic(target),
        }
    }

    /// Weighted draw over the defense catalog, favoring the creature's own power class.
    pub fn predict_defense<R: Rng>(&self, power: Option<PowerClass>, rng: &mut R) -> Defense {
        let weights: Vec<f64> = Defense::CATALOG
            .iter()
            .map(|d| match power {
                Some(class) if d.power_class() == class => self.config.defense_bias,
                _ => 1.0,
            })
            .collect();

        let index = sample_index(&weights, rng).unwrap_or(0);
        Defense::CATALOG[index]
    }
}

/// Subtractive weighted sampling; `None` when the weights carry no mass.
fn sample_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let sum: f64 = weights.iter().sum();
    if !(sum > 0.0) || weights.is_empty() {
        return None;
    }
    let mut r = rng.gen::<f64>() * sum;
    for (i, w) in weights.iter().enumerate() {
        r -= *w;
        if r <= 0.0 {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}

fn closest_tactic(target: f64) -> Tactic {
    let mut best = Tactic::CATALOG[0];
    for tactic in Tactic::CATALOG {
        if (tactic.intensity() - target).abs() < (best.intensity() - target).abs() {
            best = tactic;
        }
    }
    best
}

/// Clamp into the configured bounds, never leaving `[SUCCESS_FLOOR, SUCCESS_CEILING]`.
/// Unordered or NaN bounds fall back to the floor and ceiling.
fn bound_chance(raw: f64, min: f64, max: f64) -> f64 {
    let lo = if min.is_nan() { SUCCESS_FLOOR } else { min.max(SUCCESS_FLOOR) };
    let hi = if max.is_nan() { SUCCESS_CEILING } else { max.min(SUCCESS_CEILING) };
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (SUCCESS_FLOOR, SUCCESS_CEILING) };
    if raw.is_nan() {
        lo
    } else {
        raw.clamp(lo, hi)
    }
}

impl CaptureStrategy {
    /// The strategy must have been proposed for exactly this pairing.
    pub(crate) fn check_target(&self, creature_id: Uuid, drone_id: Uuid) -> Result<()> {
        if self.creature_id != creature_id {
            return Err(ValidationError::IdentityMismatch {
                field: "strategy creature",
                expected: creature_id,
                found: self.creature_id,
            }
            .into());
        }
        if self.drone_id != drone_id {
            return Err(ValidationError::IdentityMismatch {
                field: "strategy drone",
                expected: drone_id,
                found: self.drone_id,
            }
            .into());
        }
        Ok(())
    }
}
