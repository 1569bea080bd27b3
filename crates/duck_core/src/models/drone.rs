//! Drones and their readiness predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CapabilityError, Result};

/// Battery must be strictly above this to fly a mission.
pub const MIN_BATTERY: f32 = 10.0;
/// Fuel must be strictly above this to fly a mission.
pub const MIN_FUEL: f32 = 5.0;
/// Structural integrity must be strictly above this to fly a mission.
pub const MIN_INTEGRITY: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneType {
    /// Reconnaissance only.
    Identification,
    /// Able to engage and capture.
    Combat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Drone {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub serial_number: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub origin: String,
    pub drone_type: DroneType,
    #[serde(deserialize_with = "deserialize_level")]
    battery: f32,
    #[serde(deserialize_with = "deserialize_level")]
    fuel: f32,
    #[serde(deserialize_with = "deserialize_level")]
    integrity: f32,
    pub active: bool,
    pub last_maintenance: DateTime<Utc>,
}

impl Drone {
    pub fn new(
        serial_number: impl Into<String>,
        drone_type: DroneType,
        last_maintenance: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            serial_number: serial_number.into(),
            brand: String::new(),
            manufacturer: String::new(),
            origin: String::new(),
            drone_type,
            battery: 100.0,
            fuel: 100.0,
            integrity: 100.0,
            active: true,
            last_maintenance,
        }
    }

    pub fn with_make(
        mut self,
        brand: impl Into<String>,
        manufacturer: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        self.brand = brand.into();
        self.manufacturer = manufacturer.into();
        self.origin = origin.into();
        self
    }

    pub fn with_levels(mut self, battery: f32, fuel: f32, integrity: f32) -> Self {
        self.set_levels(battery, fuel, integrity);
        self
    }

    /// Levels are clamped into [0, 100]; NaN reads as empty.
    pub fn set_levels(&mut self, battery: f32, fuel: f32, integrity: f32) {
        self.battery = clamp_level(battery);
        self.fuel = clamp_level(fuel);
        self.integrity = clamp_level(integrity);
    }

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn integrity(&self) -> f32 {
        self.integrity
    }

    pub fn is_operational(&self) -> bool {
        self.battery > MIN_BATTERY && self.fuel > MIN_FUEL && self.integrity > MIN_INTEGRITY
    }

    /// Mean of battery, fuel and integrity, scaled to [0, 1].
    pub fn readiness(&self) -> f64 {
        (self.battery as f64 + self.fuel as f64 + self.integrity as f64) / 300.0
    }

    /// First failed capture precondition, checked as type, active, battery, fuel, integrity.
    pub fn check_capture_capability(&self) -> std::result::Result<(), CapabilityError> {
        if self.drone_type != DroneType::Combat {
            return Err(CapabilityError::IdentificationOnly(self.id));
        }
        if !self.active {
            return Err(CapabilityError::DroneInactive(self.id));
        }
        if self.battery <= MIN_BATTERY {
            return Err(CapabilityError::BatteryDepleted {
                drone_id: self.id,
                level: self.battery,
                minimum: MIN_BATTERY,
            });
        }
        if self.fuel <= MIN_FUEL {
            return Err(CapabilityError::FuelDepleted {
                drone_id: self.id,
                level: self.fuel,
                minimum: MIN_FUEL,
            });
        }
        if self.integrity <= MIN_INTEGRITY {
            return Err(CapabilityError::IntegrityCompromised {
                drone_id: self.id,
                level: self.integrity,
                minimum: MIN_INTEGRITY,
            });
        }
        Ok(())
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 100.0)
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_level)
}


#[cfg(test)]
mod tests {
    use super::fixtures::combat_drone;
    use super::*;

    #[test]
    fn test_levels_are_clamped() {
        let drone = combat_drone(150.0, -5.0, f32::NAN);
        assert_eq!(drone.battery(), 100.0);
        assert_eq!(drone.fuel(), 0.0);
        assert_eq!(drone.integrity(), 0.0);
    }

    #[test]
    fn test_operational_thresholds_are_strict() {
        assert!(combat_drone(11.0, 6.0, 21.0).is_operational());
        assert!(!combat_drone(10.0, 50.0, 50.0).is_operational());
        assert!(!combat_drone(50.0, 5.0, 50.0).is_operational());
        assert!(!combat_drone(50.0, 50.0, 20.0).is_operational());
    }

    #[test]
    fn test_capability_check_order() {
        let mut drone = combat_drone(0.0, 0.0, 0.0);
        drone.drone_type = DroneType::Identification;
        drone.active = false;
        assert_eq!(drone.check_capture_capability(), Err(CapabilityError::IdentificationOnly(drone.id)));

        drone.drone_type = DroneType::Combat;
        assert_eq!(drone.check_capture_capability(), Err(CapabilityError::DroneInactive(drone.id)));

        drone.active = true;
        assert!(matches!(
            drone.check_capture_capability(),
            Err(CapabilityError::BatteryDepleted { .. })
        ));

        drone.set_levels(80.0, 80.0, 20.0);
        assert!(matches!(
            drone.check_capture_capability(),
            Err(CapabilityError::IntegrityCompromised { level, .. }) if level == 20.0
        ));

        drone.set_levels(80.0, 80.0, 80.0);
        assert_eq!(drone.check_capture_capability(), Ok(()));
    }

    #[test]
    fn test_deserialized_levels_are_clamped() {
        let mut value = serde_json::to_value(combat_drone(50.0, 50.0, 50.0)).unwrap();
        value["battery"] = serde_json::json!(240.0);
        let drone: Drone = serde_json::from_value(value).unwrap();
        assert_eq!(drone.battery(), 100.0);
    }

    #[test]
    fn test_readiness_is_mean_of_levels() {
        let drone = combat_drone(90.0, 60.0, 30.0);
        assert!((drone.readiness() - 0.6).abs() < 1e-9);
    }
}
