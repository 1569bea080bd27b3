//! Fixed tactic and defense catalogs.
//!
//! Catalog order matters: it is the tie-break order for every selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::PowerClass;

/// Tactic families, from least to most forceful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticClass {
    Stealth,
    Trap,
    Suppression,
    Assault,
}

impl fmt::Display for TacticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TacticClass::Stealth => "stealth",
            TacticClass::Trap => "trap",
            TacticClass::Suppression => "suppression",
            TacticClass::Assault => "assault",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    SilentApproach,
    CamouflagedStalk,
    NocturnalInfiltration,
    BreadcrumbLure,
    DecoyDuckling,
    NetAmbush,
    SonicPitTrap,
    TranquilizerVolley,
    SmokeScreenPincer,
    SonicDisruption,
    ElectroNetBarrage,
    FrontalAssault,
    SwarmEncirclement,
    AerialDivebomb,
    ShockwaveStrike,
}

impl Tactic {
    /// All 15 tactics in ascending intensity.
    pub const CATALOG: [Tactic; 15] = [
        Tactic::SilentApproach,
        Tactic::CamouflagedStalk,
        Tactic::NocturnalInfiltration,
        Tactic::BreadcrumbLure,
        Tactic::DecoyDuckling,
        Tactic::NetAmbush,
        Tactic::SonicPitTrap,
        Tactic::TranquilizerVolley,
        Tactic::SmokeScreenPincer,
        Tactic::SonicDisruption,
        Tactic::ElectroNetBarrage,
        Tactic::FrontalAssault,
        Tactic::SwarmEncirclement,
        Tactic::AerialDivebomb,
        Tactic::ShockwaveStrike,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tactic::SilentApproach => "Silent Approach",
            Tactic::CamouflagedStalk => "Camouflaged Stalk",
            Tactic::NocturnalInfiltration => "Nocturnal Infiltration",
            Tactic::BreadcrumbLure => "Breadcrumb Lure",
            Tactic::DecoyDuckling => "Decoy Duckling",
            Tactic::NetAmbush => "Net Ambush",
            Tactic::SonicPitTrap => "Sonic Pit Trap",
            Tactic::TranquilizerVolley => "Tranquilizer Volley",
            Tactic::SmokeScreenPincer => "Smoke Screen Pincer",
            Tactic::SonicDisruption => "Sonic Disruption",
            Tactic::ElectroNetBarrage => "Electro-Net Barrage",
            Tactic::FrontalAssault => "Frontal Assault",
            Tactic::SwarmEncirclement => "Swarm Encirclement",
            Tactic::AerialDivebomb => "Aerial Divebomb",
            Tactic::ShockwaveStrike => "Shockwave Strike",
        }
    }

    pub fn class(&self) -> TacticClass {
        match self {
            Tactic::SilentApproach | Tactic::CamouflagedStalk | Tactic::NocturnalInfiltration => {
                TacticClass::Stealth
            }
            Tactic::BreadcrumbLure
            | Tactic::DecoyDuckling
            | Tactic::NetAmbush
            | Tactic::SonicPitTrap => TacticClass::Trap,
            Tactic::TranquilizerVolley
            | Tactic::SmokeScreenPincer
            | Tactic::SonicDisruption
            | Tactic::ElectroNetBarrage => TacticClass::Suppression,
            Tactic::FrontalAssault
            | Tactic::SwarmEncirclement
            | Tactic::AerialDivebomb
            | Tactic::ShockwaveStrike => TacticClass::Assault,
        }
    }

    /// How forceful the tactic is, in [0, 1]. Matched against threat intensity.
    pub fn intensity(&self) -> f64 {
        match self {
            Tactic::SilentApproach => 0.05,
            Tactic::CamouflagedStalk => 0.12,
            Tactic::NocturnalInfiltration => 0.20,
            Tactic::BreadcrumbLure => 0.28,
            Tactic::DecoyDuckling => 0.34,
            Tactic::NetAmbush => 0.40,
            Tactic::SonicPitTrap => 0.46,
            Tactic::TranquilizerVolley => 0.55,
            Tactic::SmokeScreenPincer => 0.61,
            Tactic::SonicDisruption => 0.67,
            Tactic::ElectroNetBarrage => 0.73,
            Tactic::FrontalAssault => 0.80,
            Tactic::SwarmEncirclement => 0.86,
            Tactic::AerialDivebomb => 0.93,
            Tactic::ShockwaveStrike => 1.00,
        }
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defense {
    PsychicBarrier,
    NeuralInterference,
    BerserkCharge,
    FeatherBlades,
    PhaseShift,
    PocketDimensionEscape,
    TimeDilation,
    ChronoRewind,
    ElementalShield,
    ThunderQuack,
    RegenerativeMolt,
    ToxicSecretion,
    EmpPulse,
    ArmoredPlumage,
    EvasiveFlight,
}

impl Defense {
    pub const CATALOG: [Defense; 15] = [
        Defense::PsychicBarrier,
        Defense::NeuralInterference,
        Defense::BerserkCharge,
        Defense::FeatherBlades,
        Defense::PhaseShift,
        Defense::PocketDimensionEscape,
        Defense::TimeDilation,
        Defense::ChronoRewind,
        Defense::ElementalShield,
        Defense::ThunderQuack,
        Defense::RegenerativeMolt,
        Defense::ToxicSecretion,
        Defense::EmpPulse,
        Defense::ArmoredPlumage,
        Defense::EvasiveFlight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Defense::PsychicBarrier => "Psychic Barrier",
            Defense::NeuralInterference => "Neural Interference",
            Defense::BerserkCharge => "Berserk Charge",
            Defense::FeatherBlades => "Feather Blades",
            Defense::PhaseShift => "Phase Shift",
            Defense::PocketDimensionEscape => "Pocket Dimension Escape",
            Defense::TimeDilation => "Time Dilation",
            Defense::ChronoRewind => "Chrono Rewind",
            Defense::ElementalShield => "Elemental Shield",
            Defense::ThunderQuack => "Thunder Quack",
            Defense::RegenerativeMolt => "Regenerative Molt",
            Defense::ToxicSecretion => "Toxic Secretion",
            Defense::EmpPulse => "EMP Pulse",
            Defense::ArmoredPlumage => "Armored Plumage",
            Defense::EvasiveFlight => "Evasive Flight",
        }
    }

    /// Power classification this defense is typical of.
    pub fn power_class(&self) -> PowerClass {
        match self {
            Defense::PsychicBarrier | Defense::NeuralInterference => PowerClass::Psychic,
            Defense::BerserkCharge | Defense::FeatherBlades => PowerClass::Warlike,
            Defense::PhaseShift | Defense::PocketDimensionEscape => PowerClass::Dimensional,
            Defense::TimeDilation | Defense::ChronoRewind => PowerClass::Temporal,
            Defense::ElementalShield | Defense::ThunderQuack => PowerClass::Elemental,
            Defense::RegenerativeMolt | Defense::ToxicSecretion => PowerClass::Biological,
            Defense::EmpPulse => PowerClass::Technological,
            Defense::ArmoredPlumage | Defense::EvasiveFlight => PowerClass::Physical,
        }
    }

    /// Tactic family this defense is weak against.
    pub fn countered_by(&self) -> TacticClass {
        match self {
            Defense::PsychicBarrier => TacticClass::Assault,
            Defense::NeuralInterference => TacticClass::Trap,
            Defense::BerserkCharge => TacticClass::Trap,
            Defense::FeatherBlades => TacticClass::Suppression,
            Defense::PhaseShift => TacticClass::Suppression,
            Defense::PocketDimensionEscape => TacticClass::Stealth,
            Defense::TimeDilation => TacticClass::Trap,
            Defense::ChronoRewind => TacticClass::Stealth,
            Defense::ElementalShield => TacticClass::Trap,
            Defense::ThunderQuack => TacticClass::Stealth,
            Defense::RegenerativeMolt => TacticClass::Suppression,
            Defense::ToxicSecretion => TacticClass::Suppression,
            Defense::EmpPulse => TacticClass::Stealth,
            Defense::ArmoredPlumage => TacticClass::Trap,
            Defense::EvasiveFlight => TacticClass::Trap,
        }
    }

    /// Tactic family this defense punishes.
    pub fn punishes(&self) -> TacticClass {
        match self {
            Defense::PsychicBarrier => TacticClass::Stealth,
            Defense::NeuralInterference => TacticClass::Suppression,
            Defense::BerserkCharge => TacticClass::Assault,
            Defense::FeatherBlades => TacticClass::Assault,
            Defense::PhaseShift => TacticClass::Trap,
            Defense::PocketDimensionEscape => TacticClass::Assault,
            Defense::TimeDilation => TacticClass::Suppression,
            Defense::ChronoRewind => TacticClass::Assault,
            Defense::ElementalShield => TacticClass::Suppression,
            Defense::ThunderQuack => TacticClass::Suppression,
            Defense::RegenerativeMolt => TacticClass::Assault,
            Defense::ToxicSecretion => TacticClass::Trap,
            Defense::EmpPulse => TacticClass::Suppression,
            Defense::ArmoredPlumage => TacticClass::Assault,
            Defense::EvasiveFlight => TacticClass::Stealth,
        }
    }
}

impl fmt::Display for Defense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    Favorable,
    Neutral,
    Unfavorable,
}

impl Affinity {
    /// Fixed tactic x defense rule.
    pub fn of(tactic: Tactic, defense: Defense) -> Self {
        let class = tactic.class();
        if class == defense.countered_by() {
            Affinity::Favorable
        } else if class == defense.punishes() {
            Affinity::Unfavorable
        } else {
            Affinity::Neutral
        }
    }

    /// Signed multiplier applied to the configured adjustment.
    pub fn sign(&self) -> f64 {
        match self {
            Affinity::Favorable => 1.0,
            Affinity::Neutral => 0.0,
            Affinity::Unfavorable => -1.0,
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Affinity::Favorable => "favorable",
            Affinity::Neutral => "neutral",
            Affinity::Unfavorable => "unfavorable",
        })
    }
}
