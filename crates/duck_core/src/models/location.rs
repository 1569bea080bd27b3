use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, ValidationError};

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self { latitude, longitude };
        coordinate.check_range()?;
        Ok(coordinate)
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn check_range(&self) -> std::result::Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(range_error("latitude"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(range_error("longitude"));
        }
        Ok(())
    }

    /// Great-circle distance in kilometers (haversine formula).
    pub fn distance_to_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        // Rounding can push `a` a hair above 1 for antipodal points.
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

/// Where a creature was sighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(length(min = 1))]
    pub city_name: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_point: Option<String>,
}

impl Location {
    pub fn new(
        city_name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self> {
        let location = Self {
            city_name: city_name.into(),
            country: country.into(),
            latitude,
            longitude,
            reference_point: None,
        };
        location.check()?;
        Ok(location)
    }

    /// Field checks from the derive plus the coordinate ranges.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        self.coordinate().check_range()?;
        Ok(())
    }

    pub fn with_reference_point(mut self, reference_point: impl Into<String>) -> Self {
        self.reference_point = Some(reference_point.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate { latitude: self.latitude, longitude: self.longitude }
    }
}

fn range_error(field: &str) -> ValidationError {
    ValidationError::Field { field: field.to_string(), code: "range".to_string() }
}
