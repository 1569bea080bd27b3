//! Capture analysis weights.

use serde::{Deserialize, Serialize};

use crate::models::PowerClass;

/// One weight per super-power classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassWeights {
    pub warlike: f64,
    pub elemental: f64,
    pub psychic: f64,
    pub physical: f64,
    pub biological: f64,
    pub technological: f64,
    pub temporal: f64,
    pub dimensional: f64,
}

impl ClassWeights {
    pub fn get(&self, class: PowerClass) -> f64 {
        match class {
            PowerClass::Warlike => self.warlike,
            PowerClass::Elemental => self.elemental,
            PowerClass::Psychic => self.psychic,
            PowerClass::Physical => self.physical,
            PowerClass::Biological => self.biological,
            PowerClass::Technological => self.technological,
            PowerClass::Temporal => self.temporal,
            PowerClass::Dimensional => self.dimensional,
        }
    }

    fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        PowerClass::ALL.iter().map(|c| self.get(*c))
    }

    pub fn max(&self) -> f64 {
        self.iter().fold(0.0, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.iter().fold(f64::INFINITY, f64::min)
    }
}

/// Lower bounds of each classification band, descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub top_priority: f64,
    pub high_priority: f64,
    pub moderate_priority: f64,
    pub low_priority: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self { top_priority: 80.0, high_priority: 60.0, moderate_priority: 40.0, low_priority: 20.0 }
    }
}

/// Scorer parameters. All sub-scores land in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // === Operational cost ===
    /// Cost points reachable from distance alone (default: 70)
    pub distance_cost_weight: f64,
    /// Distance at which half the distance cost applies (default: 500 km)
    pub distance_half_cost_km: f64,
    /// Cost points reachable from GPS imprecision alone (default: 30)
    pub precision_cost_weight: f64,
    /// Imprecision at which half the precision cost applies (default: 1000 cm)
    pub precision_half_cost_cm: f64,

    // === Military power ===
    /// Military points at the maximum mutation count (default: 50)
    pub mutation_military_weight: f64,
    pub power_military: ClassWeights,

    // === Risk ===
    /// Risk every creature starts with (default: 20)
    pub base_risk: f64,
    pub awake_risk: f64,
    pub trance_risk: f64,
    /// Subtracted when the creature is in deep hibernation (default: 15)
    pub deep_hibernation_relief: f64,
    pub power_risk: f64,
    /// Risk points at the maximum mutation count (default: 15)
    pub mutation_risk_weight: f64,

    // === Scientific value ===
    /// Value points at the maximum mutation count (default: 60)
    pub mutation_value_weight: f64,
    pub power_rarity: ClassWeights,

    // === Overall score ===
    /// Blend of scientific value and military power; must sum to 1
    pub value_weight: f64,
    pub military_weight: f64,
    /// Fraction of the blend removed at cost 100 (default: 0.3)
    pub cost_discount: f64,
    /// Fraction of the blend removed at risk 100 (default: 0.2)
    pub risk_discount: f64,

    pub thresholds: ClassificationThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            distance_cost_weight: 70.0,
            distance_half_cost_km: 500.0,
            precision_cost_weight: 30.0,
            precision_half_cost_cm: 1000.0,

            mutation_military_weight: 50.0,
            power_military: ClassWeights {
                warlike: 50.0,
                elemental: 30.0,
                psychic: 30.0,
                physical: 20.0,
                biological: 15.0,
                technological: 25.0,
                temporal: 35.0,
                dimensional: 45.0,
            },

            base_risk: 20.0,
            awake_risk: 40.0,
            trance_risk: 10.0,
            deep_hibernation_relief: 15.0,
            power_risk: 25.0,
            mutation_risk_weight: 15.0,

            mutation_value_weight: 60.0,
            power_rarity: ClassWeights {
                warlike: 15.0,
                elemental: 18.0,
                psychic: 28.0,
                physical: 10.0,
                biological: 12.0,
                technological: 22.0,
                temporal: 40.0,
                dimensional: 40.0,
            },

            value_weight: 0.6,
            military_weight: 0.4,
            cost_discount: 0.3,
            risk_discount: 0.2,

            thresholds: ClassificationThresholds::default(),
        }
    }
}

impl ScoringConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("distance_cost_weight", self.distance_cost_weight),
            ("precision_cost_weight", self.precision_cost_weight),
            ("mutation_military_weight", self.mutation_military_weight),
            ("base_risk", self.base_risk),
            ("awake_risk", self.awake_risk),
            ("trance_risk", self.trance_risk),
            ("deep_hibernation_relief", self.deep_hibernation_relief),
            ("power_risk", self.power_risk),
            ("mutation_risk_weight", self.mutation_risk_weight),
            ("mutation_value_weight", self.mutation_value_weight),
            ("value_weight", self.value_weight),
            ("military_weight", self.military_weight),
            ("power_military", self.power_military.min()),
            ("power_rarity", self.power_rarity.min()),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("scoring.{} must be a non-negative number, got {}", name, value));
            }
        }
        if !(self.distance_half_cost_km > 0.0 && self.precision_half_cost_cm > 0.0) {
            return Err("scoring half-cost scales must be positive".to_string());
        }
        if (self.value_weight + self.military_weight - 1.0).abs() > 1e-6 {
            return Err(format!(
                "scoring.value_weight + scoring.military_weight must equal 1, got {}",
                self.value_weight + self.military_weight
            ));
        }
        for (name, value) in [("cost_discount", self.cost_discount), ("risk_discount", self.risk_discount)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("scoring.{} must be within [0, 1], got {}", name, value));
            }
        }
        let t = &self.thresholds;
        let ordered = 100.0 >= t.top_priority
            && t.top_priority > t.high_priority
            && t.high_priority > t.moderate_priority
            && t.moderate_priority > t.low_priority
            && t.low_priority > 0.0;
        if !ordered {
            return Err("classification thresholds must be strictly descending within (0, 100]".to_string());
        }
        Ok(())
    }
}
