pub mod creature;
pub mod drone;
pub mod location;
pub mod measurement;

pub use creature::{Creature, HibernationStatus, PowerClass, SuperPower, MAX_MUTATIONS};
pub use drone::{Drone, DroneType, MIN_BATTERY, MIN_FUEL, MIN_INTEGRITY};
pub use location::{Coordinate, Location, EARTH_RADIUS_KM};
pub use measurement::{
    GpsPrecision, Height, HeightUnit, Measurement, PrecisionUnit, Unit, Weight, WeightUnit,
};
