//! Measurement value objects and their conversion to canonical units.
//!
//! | Kind      | Canonical unit | Accepted units                      |
//! |-----------|----------------|-------------------------------------|
//! | Height    | centimeter     | centimeter, inch, foot              |
//! | Weight    | gram           | gram, kilogram, ounce, pound        |
//! | Precision | centimeter     | centimeter, inch, foot, meter, yard |
//!
//! Every unit maps to its canonical unit through a `match`, so adding a unit
//! without a factor is a compile error rather than a runtime failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A unit family with a single canonical unit.
pub trait Unit: Copy + Eq + fmt::Debug + 'static {
    /// Human-readable measurement kind, used in error messages.
    const KIND: &'static str;
    const CANONICAL: Self;

    /// How many canonical units one of `self` is worth.
    fn canonical_factor(self) -> f64;

    fn all() -> &'static [Self];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[serde(alias = "cm")]
    Centimeter,
    #[serde(alias = "in")]
    Inch,
    #[serde(alias = "ft")]
    Foot,
}

impl Unit for HeightUnit {
    const KIND: &'static str = "height";
    const CANONICAL: Self = HeightUnit::Centimeter;

    fn canonical_factor(self) -> f64 {
        match self {
            HeightUnit::Centimeter => 1.0,
            HeightUnit::Inch => CM_PER_INCH,
            HeightUnit::Foot => CM_PER_FOOT,
        }
    }

    fn all() -> &'static [Self] {
        &[HeightUnit::Centimeter, HeightUnit::Inch, HeightUnit::Foot]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[serde(alias = "g")]
    Gram,
    #[serde(alias = "kg")]
    Kilogram,
    #[serde(alias = "oz")]
    Ounce,
    #[serde(alias = "lb")]
    Pound,
}

impl Unit for WeightUnit {
    const KIND: &'static str = "weight";
    const CANONICAL: Self = WeightUnit::Gram;

    fn canonical_factor(self) -> f64 {
        match self {
            WeightUnit::Gram => 1.0,
            WeightUnit::Kilogram => 1000.0,
            WeightUnit::Ounce => GRAMS_PER_OUNCE,
            WeightUnit::Pound => GRAMS_PER_POUND,
        }
    }

    fn all() -> &'static [Self] {
        &[WeightUnit::Gram, WeightUnit::Kilogram, WeightUnit::Ounce, WeightUnit::Pound]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionUnit {
    #[serde(alias = "cm")]
    Centimeter,
    #[serde(alias = "in")]
    Inch,
    #[serde(alias = "ft")]
    Foot,
    #[serde(alias = "m")]
    Meter,
    #[serde(alias = "yd")]
    Yard,
}

impl Unit for PrecisionUnit {
    const KIND: &'static str = "gps precision";
    const CANONICAL: Self = PrecisionUnit::Centimeter;

    fn canonical_factor(self) -> f64 {
        match self {
            PrecisionUnit::Centimeter => 1.0,
            PrecisionUnit::Inch => CM_PER_INCH,
            PrecisionUnit::Foot => CM_PER_FOOT,
            PrecisionUnit::Meter => 100.0,
            PrecisionUnit::Yard => CM_PER_YARD,
        }
    }

    fn all() -> &'static [Self] {
        &[
            PrecisionUnit::Centimeter,
            PrecisionUnit::Inch,
            PrecisionUnit::Foot,
            PrecisionUnit::Meter,
            PrecisionUnit::Yard,
        ]
    }
}

const CM_PER_INCH: f64 = 2.54;
const CM_PER_FOOT: f64 = 30.48;
const CM_PER_YARD: f64 = 91.44;
const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
const GRAMS_PER_POUND: f64 = 453.592_37;

/// A non-negative value tagged with its unit. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawMeasurement<U>",
    into = "RawMeasurement<U>",
    bound(serialize = "U: Unit + Serialize", deserialize = "U: Unit + Deserialize<'de>")
)]
pub struct Measurement<U: Unit> {
    value: f64,
    unit: U,
}

pub type Height = Measurement<HeightUnit>;
pub type Weight = Measurement<WeightUnit>;
pub type GpsPrecision = Measurement<PrecisionUnit>;

impl<U: Unit> Measurement<U> {
    pub fn new(value: f64, unit: U) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteMeasurement { measurement: U::KIND, value });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeMeasurement { measurement: U::KIND, value });
        }
        if !(value * unit.canonical_factor()).is_finite() {
            return Err(ValidationError::MeasurementOverflow { measurement: U::KIND, value });
        }
        Ok(Self { value, unit })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> U {
        self.unit
    }

    /// Value expressed in the canonical unit of this family.
    pub fn to_canonical(&self) -> f64 {
        self.value * self.unit.canonical_factor()
    }

    /// Re-express the same quantity in another unit of the family.
    pub fn convert_to(&self, unit: U) -> Self {
        Self { value: self.to_canonical() / unit.canonical_factor(), unit }
    }
}

impl<U: Unit> fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.value, self.unit)
    }
}

/// Wire shape of a [`Measurement`]; deserialization goes through [`Measurement::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawMeasurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: Unit> TryFrom<RawMeasurement<U>> for Measurement<U> {
    type Error = ValidationError;

    fn try_from(raw: RawMeasurement<U>) -> Result<Self, Self::Error> {
        Measurement::new(raw.value, raw.unit)
    }
}

impl<U: Unit> From<Measurement<U>> for RawMeasurement<U> {
    fn from(m: Measurement<U>) -> Self {
        Self { value: m.value, unit: m.unit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_known_conversions() {
        assert!(approx(Height::new(6.0, HeightUnit::Foot).unwrap().to_canonical(), 182.88));
        assert!(approx(Weight::new(2.5, WeightUnit::Kilogram).unwrap().to_canonical(), 2500.0));
        assert!(approx(Weight::new(1.0, WeightUnit::Pound).unwrap().to_canonical(), 453.59237));
        assert!(approx(GpsPrecision::new(3.0, PrecisionUnit::Meter).unwrap().to_canonical(), 300.0));
        assert!(approx(GpsPrecision::new(1.0, PrecisionUnit::Yard).unwrap().to_canonical(), 91.44));
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert_eq!(
            Height::new(-1.0, HeightUnit::Centimeter),
            Err(ValidationError::NegativeMeasurement { measurement: "height", value: -1.0 })
        );
        assert!(matches!(
            Weight::new(f64::NAN, WeightUnit::Gram),
            Err(ValidationError::NonFiniteMeasurement { .. })
        ));
        assert!(Weight::new(0.0, WeightUnit::Gram).is_ok());
    }

    #[test]
    fn test_canonical_overflow_rejected() {
        assert_eq!(
            GpsPrecision::new(1.0e307, PrecisionUnit::Yard),
            Err(ValidationError::MeasurementOverflow { measurement: "gps precision", value: 1.0e307 })
        );
        assert!(GpsPrecision::new(1.0e307, PrecisionUnit::Centimeter).is_ok());
        assert!(Weight::new(f64::MAX, WeightUnit::Pound).is_err());

        let err = serde_json::from_str::<GpsPrecision>(r#"{"value": 1e307, "unit": "yd"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_deserialize_checks_sign() {
        let ok: GpsPrecision = serde_json::from_str(r#"{"value": 4.0, "unit": "m"}"#).unwrap();
        assert_eq!(ok.unit(), PrecisionUnit::Meter);

        let err = serde_json::from_str::<GpsPrecision>(r#"{"value": -4.0, "unit": "meter"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_units_compare_after_normalization() {
        let tall = Height::new(2.0, HeightUnit::Foot).unwrap();
        let short = Height::new(50.0, HeightUnit::Centimeter).unwrap();
        assert!(tall.to_canonical() > short.to_canonical());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_precision_unit() -> impl Strategy<Value = PrecisionUnit> {
            prop::sample::select(PrecisionUnit::all().to_vec())
        }

        fn any_height_unit() -> impl Strategy<Value = HeightUnit> {
            prop::sample::select(HeightUnit::all().to_vec())
        }

        fn any_weight_unit() -> impl Strategy<Value = WeightUnit> {
            prop::sample::select(WeightUnit::all().to_vec())
        }

        proptest! {
            /// Canonical values pass through unchanged
            #[test]
            fn prop_canonical_is_identity(v in 0.0f64..1.0e6) {
                prop_assert_eq!(Height::new(v, HeightUnit::CANONICAL).unwrap().to_canonical(), v);
                prop_assert_eq!(Weight::new(v, WeightUnit::CANONICAL).unwrap().to_canonical(), v);
                prop_assert_eq!(GpsPrecision::new(v, PrecisionUnit::CANONICAL).unwrap().to_canonical(), v);
            }

            /// A -> canonical equals A -> B -> canonical
            #[test]
            fn prop_precision_conversion_composes(
                v in 0.0f64..1.0e6,
                a in any_precision_unit(),
                b in any_precision_unit()
            ) {
                let m = GpsPrecision::new(v, a).unwrap();
                prop_assert!(approx(m.to_canonical(), m.convert_to(b).to_canonical()));
            }

            #[test]
            fn prop_height_conversion_composes(
                v in 0.0f64..1.0e6,
                a in any_height_unit(),
                b in any_height_unit()
            ) {
                let m = Height::new(v, a).unwrap();
                prop_assert!(approx(m.to_canonical(), m.convert_to(b).to_canonical()));
            }

            #[test]
            fn prop_weight_conversion_composes(
                v in 0.0f64..1.0e6,
                a in any_weight_unit(),
                b in any_weight_unit()
            ) {
                let m = Weight::new(v, a).unwrap();
                prop_assert!(approx(m.to_canonical(), m.convert_to(b).to_canonical()));
            }
        }
    }
}
