use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::operation::{OperationStatus, Transition};

/// Entity families the engine looks up through its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Creature,
    Drone,
    Operation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Creature => write!(f, "creature"),
            EntityKind::Drone => write!(f, "drone"),
            EntityKind::Operation => write!(f, "capture operation"),
        }
    }
}

/// Malformed or out-of-range input. Always raised before anything is mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{measurement} measurement must be >= 0, got {value}")]
    NegativeMeasurement { measurement: &'static str, value: f64 },

    #[error("{measurement} measurement must be finite, got {value}")]
    NonFiniteMeasurement { measurement: &'static str, value: f64 },

    #[error("{measurement} measurement {value} overflows its canonical unit")]
    MeasurementOverflow { measurement: &'static str, value: f64 },

    #[error("mutation count must be within 0..=10, got {0}")]
    MutationCountOutOfRange(u8),

    #[error("invalid field `{field}`: {code}")]
    Field { field: String, code: String },

    #[error("{field} mismatch: expected {expected}, found {found}")]
    IdentityMismatch { field: &'static str, expected: Uuid, found: Uuid },

    #[error("{entity} {id} is still referenced by {operations} capture operation(s)")]
    StillReferenced { entity: EntityKind, id: Uuid, operations: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ValidationError {
    /// Flatten the first failure reported by a `validator` derive.
    ///
    /// Nested struct errors are reported with a dotted path (`location.latitude`).
    pub fn from_field_errors(errors: &validator::ValidationErrors) -> Self {
        let mut failures = Vec::new();
        collect_field_errors("", errors, &mut failures);
        failures.sort();
        match failures.into_iter().next() {
            Some((field, code)) => ValidationError::Field { field, code },
            None => ValidationError::Field { field: "<unknown>".to_string(), code: "invalid".to_string() },
        }
    }
}

fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<(String, String)>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push((path.clone(), err.code.to_string()));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

/// A drone/creature precondition for capture was not met.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("drone {0} is identification-only and cannot perform captures")]
    IdentificationOnly(Uuid),

    #[error("drone {0} is not active")]
    DroneInactive(Uuid),

    #[error("drone {drone_id} battery at {level:.1}% (needs > {minimum}%)")]
    BatteryDepleted { drone_id: Uuid, level: f32, minimum: f32 },

    #[error("drone {drone_id} fuel at {level:.1}% (needs > {minimum}%)")]
    FuelDepleted { drone_id: Uuid, level: f32, minimum: f32 },

    #[error("drone {drone_id} structural integrity at {level:.1}% (needs > {minimum}%)")]
    IntegrityCompromised { drone_id: Uuid, level: f32, minimum: f32 },

    #[error("creature {0} has already been captured")]
    AlreadyCaptured(Uuid),
}

/// Coarse error classification for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Capability,
    InvalidTransition,
    NotFound,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("cannot {attempted} capture operation {operation_id} while it is {from}")]
    InvalidTransition { operation_id: Uuid, from: OperationStatus, attempted: Transition },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::Capability(_) => ErrorKind::Capability,
            EngineError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        EngineError::NotFound { entity, id }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EngineError::Validation(ValidationError::from_field_errors(&errors))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(
            EngineError::from(ValidationError::MutationCountOutOfRange(11)).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            EngineError::from(CapabilityError::IdentificationOnly(id)).kind(),
            ErrorKind::Capability
        );
        assert_eq!(EngineError::not_found(EntityKind::Drone, id).kind(), ErrorKind::NotFound);
        assert_eq!(
            EngineError::InvalidTransition {
                operation_id: id,
                from: OperationStatus::Aborted,
                attempted: Transition::Start,
            }
            .kind(),
            ErrorKind::InvalidTransition
        );
    }

    #[test]
    fn test_capability_message_names_precondition() {
        let id = Uuid::nil();
        let err = CapabilityError::IntegrityCompromised { drone_id: id, level: 20.0, minimum: 20.0 };
        let msg = err.to_string();
        assert!(msg.contains("integrity"), "{}", msg);
        assert!(msg.contains("20.0%"), "{}", msg);
    }
}
