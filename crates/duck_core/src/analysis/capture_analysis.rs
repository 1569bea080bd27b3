//! # Capture Analysis
//!
//! Scores how attractive a creature is as a capture target.
//!
//! ## Sub-scores (each clamped to [0, 100])
//! - **operational cost**: saturating curves over distance from base and GPS imprecision
//! - **military power**: mutation count plus the power classification's military weight
//! - **risk level**: base risk adjusted by hibernation state, super-power and mutations
//! - **scientific value**: mutation count plus the power classification's rarity
//!
//! ## Overall score
//! `(value_weight * scientific + military_weight * military)
//!  * (1 - cost_discount * cost / 100) * (1 - risk_discount * risk / 100)`
//!
//! Weights come from [`ScoringConfig`]. The analysis is a pure function of the
//! creature, the base coordinate and the config.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::{ClassificationThresholds, EngineConfig, ScoringConfig};
use crate::error::{Result, ValidationError};
use crate::models::{Coordinate, Creature, HibernationStatus, MAX_MUTATIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureClassification {
    TopPriority,
    HighPriority,
    ModeratePriority,
    LowPriority,
    NotRecommended,
}

impl CaptureClassification {
    /// Band for `score`. Each band is `[lower, next_lower)`, so the bands
    /// cover [0, 100] without overlap.
    pub fn from_score(score: f64, thresholds: &ClassificationThresholds) -> Self {
        if score >= thresholds.top_priority {
            CaptureClassification::TopPriority
        } else if score >= thresholds.high_priority {
            CaptureClassification::HighPriority
        } else if score >= thresholds.moderate_priority {
            CaptureClassification::ModeratePriority
        } else if score >= thresholds.low_priority {
            CaptureClassification::LowPriority
        } else {
            CaptureClassification::NotRecommended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaptureClassification::TopPriority => "top priority",
            CaptureClassification::HighPriority => "high priority",
            CaptureClassification::ModeratePriority => "moderate priority",
            CaptureClassification::LowPriority => "low priority",
            CaptureClassification::NotRecommended => "not recommended",
        }
    }
}

impl fmt::Display for CaptureClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureAnalysis {
    pub creature_id: Uuid,
    pub distance_from_base_km: f64,
    pub operational_cost: f64,
    pub military_power: f64,
    pub risk_level: f64,
    pub scientific_value: f64,
    pub overall_score: f64,
    pub classification: CaptureClassification,
    pub risk_factors: Vec<String>,
    pub value_factors: Vec<String>,
}

/// The part of an analysis the strategy generator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatProfile {
    pub risk_level: f64,
    pub military_power: f64,
}

impl ThreatProfile {
    pub fn from_analysis(analysis: &CaptureAnalysis) -> Self {
        Self { risk_level: analysis.risk_level, military_power: analysis.military_power }
    }

    /// Mean of risk and military power, scaled to [0, 1].
    pub fn intensity(&self) -> f64 {
        ((self.risk_level + self.military_power) / 200.0).clamp(0.0, 1.0)
    }
}

/// Scorer bound to a base coordinate and a weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureAnalyzer {
    config: ScoringConfig,
    base: Coordinate,
}

impl Default for CaptureAnalyzer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl CaptureAnalyzer {
    pub fn new(config: ScoringConfig, base: Coordinate) -> Self {
        Self { config, base }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.scoring.clone(), config.base)
    }

    pub fn base(&self) -> Coordinate {
        self.base
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Runs [`Creature::check`] and the weight table checks first, then
    /// [`Self::analyze`]. A sub-score that still comes out NaN is rejected.
    pub fn analyze_checked(&self, creature: &Creature) -> Result<CaptureAnalysis> {
        creature.check()?;
        self.config.validate().map_err(ValidationError::InvalidConfig)?;
        let analysis = self.analyze(creature);
        let scores = [
            ("operational_cost", analysis.operational_cost),
            ("military_power", analysis.military_power),
            ("risk_level", analysis.risk_level),
            ("scientific_value", analysis.scientific_value),
            ("overall_score", analysis.overall_score),
        ];
        if let Some((field, _)) = scores.iter().find(|(_, score)| score.is_nan()) {
            return Err(ValidationError::Field { field: field.to_string(), code: "not_a_number".to_string() }.into());
        }
        Ok(analysis)
    }

    pub fn analyze(&self, creature: &Creature) -> CaptureAnalysis {
        let distance_km = creature.location.coordinate().distance_to_km(&self.base);
        let operational_cost =
            self.operational_cost(distance_km, creature.gps_precision.to_canonical());
        let military_power = self.military_power(creature);

        let mut risk_factors = Vec::new();
        let risk_level = self.risk_level(creature, &mut risk_factors);

        let mut value_factors = Vec::new();
        let scientific_value = self.scientific_value(creature, &mut value_factors);
        if military_power > 0.0 && self.config.military_weight > 0.0 {
            value_factors.push(format!("military potential rated {:.0}/100", military_power));
        }

        let blend = self.config.value_weight * scientific_value
            + self.config.military_weight * military_power;
        let overall_score = clamp_score(
            blend
                * (1.0 - self.config.cost_discount * operational_cost / 100.0)
                * (1.0 - self.config.risk_discount * risk_level / 100.0),
        );
        let classification =
            CaptureClassification::from_score(overall_score, &self.config.thresholds);

        debug!(
            creature_id = %creature.id,
            distance_km,
            operational_cost,
            military_power,
            risk_level,
            scientific_value,
            overall_score,
            %classification,
            "capture analysis"
        );

        CaptureAnalysis {
            creature_id: creature.id,
            distance_from_base_km: distance_km,
            operational_cost,
            military_power,
            risk_level,
            scientific_value,
            overall_score,
            classification,
            risk_factors,
            value_factors,
        }
    }

    fn operational_cost(&self, distance_km: f64, precision_cm: f64) -> f64 {
        let cfg = &self.config;
        let distance = distance_km.max(0.0);
        let precision = precision_cm.max(0.0);
        clamp_score(
            cfg.distance_cost_weight * saturation(distance, cfg.distance_half_cost_km)
                + cfg.precision_cost_weight * saturation(precision, cfg.precision_half_cost_cm),
        )
    }

    fn military_power(&self, creature: &Creature) -> f64 {
        let mutations = mutation_ratio(creature.mutation_count) * self.config.mutation_military_weight;
        let power = creature.power_class().map_or(0.0, |c| self.config.power_military.get(c));
        clamp_score(mutations + power)
    }

    fn risk_level(&self, creature: &Creature, factors: &mut Vec<String>) -> f64 {
        let cfg = &self.config;
        let mut risk = cfg.base_risk;

        match creature.hibernation {
            HibernationStatus::Awake => {
                risk += cfg.awake_risk;
                if cfg.awake_risk > 0.0 {
                    factors.push("creature is awake and able to resist".to_string());
                }
            }
            HibernationStatus::InTrance => {
                risk += cfg.trance_risk;
                if cfg.trance_risk > 0.0 {
                    factors.push("creature is in a trance and may wake".to_string());
                }
            }
            HibernationStatus::DeepHibernation => risk -= cfg.deep_hibernation_relief,
        }

        if let Some(class) = creature.power_class() {
            risk += cfg.power_risk;
            if cfg.power_risk > 0.0 {
                factors.push(format!("possesses a {}-class power", class));
            }
        }

        let mutation_risk = mutation_ratio(creature.mutation_count) * cfg.mutation_risk_weight;
        if mutation_risk > 0.0 {
            risk += mutation_risk;
            factors.push(format!("carries {}", count_phrase(creature.mutation_count, "unstable mutation")));
        }

        clamp_score(risk)
    }

    fn scientific_value(&self, creature: &Creature, factors: &mut Vec<String>) -> f64 {
        let cfg = &self.config;
        let mut value = 0.0;

        let mutation_value = mutation_ratio(creature.mutation_count) * cfg.mutation_value_weight;
        if mutation_value > 0.0 {
            value += mutation_value;
            factors.push(format!("{} of scientific interest", count_phrase(creature.mutation_count, "mutation")));
        }

        if let Some(class) = creature.power_class() {
            let rarity = cfg.power_rarity.get(class);
            if rarity > 0.0 {
                value += rarity;
                factors.push(format!("possesses a {}-class power", class));
            }
        }

        clamp_score(value)
    }
}

fn mutation_ratio(count: u8) -> f64 {
    count.min(MAX_MUTATIONS) as f64 / MAX_MUTATIONS as f64
}

fn count_phrase(count: u8, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// `x / (x + half)`: 0 at 0, 0.5 at `half`, approaching 1 as `x` grows.
fn saturation(x: f64, half: f64) -> f64 {
    if x.is_infinite() {
        1.0
    } else {
        x / (x + half)
    }
}

/// NaN passes through so a broken weight table is never reported as a clean 0.
fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}
