//! The primordial duck and its biological attributes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::location::Location;
use super::measurement::{GpsPrecision, Height, Weight};
use crate::error::{Result, ValidationError};

pub const MAX_MUTATIONS: u8 = 10;

/// How alert the creature is when a drone arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HibernationStatus {
    Awake,
    InTrance,
    DeepHibernation,
}

/// Super-power classification (8 categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerClass {
    Warlike,
    Elemental,
    Psychic,
    Physical,
    Biological,
    Technological,
    Temporal,
    Dimensional,
}

impl PowerClass {
    pub const ALL: [PowerClass; 8] = [
        PowerClass::Warlike,
        PowerClass::Elemental,
        PowerClass::Psychic,
        PowerClass::Physical,
        PowerClass::Biological,
        PowerClass::Technological,
        PowerClass::Temporal,
        PowerClass::Dimensional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerClass::Warlike => "warlike",
            PowerClass::Elemental => "elemental",
            PowerClass::Psychic => "psychic",
            PowerClass::Physical => "physical",
            PowerClass::Biological => "biological",
            PowerClass::Technological => "technological",
            PowerClass::Temporal => "temporal",
            PowerClass::Dimensional => "dimensional",
        }
    }
}

impl fmt::Display for PowerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SuperPower {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub classification: PowerClass,
}

impl SuperPower {
    pub fn new(name: impl Into<String>, classification: PowerClass) -> Self {
        Self { name: name.into(), description: String::new(), classification }
    }
}

/// A catalogued primordial duck.
///
/// Capture state is not stored here; see [`crate::operation::CaptureHistory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Creature {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64))]
    pub nickname: Option<String>,
    pub height: Height,
    pub weight: Weight,
    pub location: Location,
    pub gps_precision: GpsPrecision,
    pub hibernation: HibernationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
    #[serde(default)]
    pub mutation_count: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub super_power: Option<SuperPower>,
    pub discovered_at: DateTime<Utc>,
}

impl Creature {
    pub fn new(
        height: Height,
        weight: Weight,
        location: Location,
        gps_precision: GpsPrecision,
        hibernation: HibernationStatus,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            nickname: None,
            height,
            weight,
            location,
            gps_precision,
            hibernation,
            heart_rate: None,
            mutation_count: 0,
            super_power: None,
            discovered_at,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_heart_rate(mut self, bpm: u16) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_super_power(mut self, power: SuperPower) -> Self {
        self.super_power = Some(power);
        self
    }

    pub fn with_mutations(mut self, count: u8) -> Result<Self> {
        if count > MAX_MUTATIONS {
            return Err(ValidationError::MutationCountOutOfRange(count).into());
        }
        self.mutation_count = count;
        Ok(self)
    }

    pub fn power_class(&self) -> Option<PowerClass> {
        self.super_power.as_ref().map(|p| p.classification)
    }

    /// Full precondition check run before scoring or opening an operation.
    pub fn check(&self) -> Result<()> {
        if self.mutation_count > MAX_MUTATIONS {
            return Err(ValidationError::MutationCountOutOfRange(self.mutation_count).into());
        }
        self.validate()?;
        self.location.check()
    }
}
