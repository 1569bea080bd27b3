//! # duck_core - Primordial Duck Capture Engine
//!
//! Scores catalogued creatures as capture targets, proposes a capture
//! strategy for a (creature, drone) pairing and runs the lifecycle of the
//! resulting capture operations.
//!
//! ## Features
//! - Unit-safe measurements with canonical conversion
//! - Deterministic scoring against a configurable weight table
//! - Seeded strategy proposals (same seed = same strategy)
//! - Tagged operation state machine with all-or-nothing transitions
//! - JSON API for callers that prefer a wire format

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod analysis;
pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod operation;
pub mod store;
pub mod tactics;

pub use analysis::{CaptureAnalysis, CaptureAnalyzer, CaptureClassification, ThreatProfile};
pub use api::{analyze_creature_json, propose_strategy_json, CaptureRequest};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use error::{CapabilityError, EngineError, EntityKind, ErrorKind, Result, ValidationError};
pub use models::{Coordinate, Creature, Drone, DroneType, HibernationStatus, Location, PowerClass, SuperPower};
pub use operation::{CaptureHistory, CaptureOperation, CaptureResult, OperationService, OperationStatus};
pub use store::{CreatureLookup, DroneLookup, InMemoryStore, OperationStore};
pub use tactics::{Affinity, CaptureStrategy, Defense, StrategyGenerator, Tactic, TacticClass};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::models::{GpsPrecision, Height, HeightUnit, PrecisionUnit, Weight, WeightUnit};

    /// Awake, 8 mutations, dimensional power, about 50 km east of the default base.
    fn rift_duck() -> Creature {
        Creature::new(
            Height::new(4.2, HeightUnit::Foot).unwrap(),
            Weight::new(88.0, WeightUnit::Pound).unwrap(),
            Location::new("Annecy outskirts", "France", 46.2044, 6.79).unwrap(),
            GpsPrecision::new(3.0, PrecisionUnit::Meter).unwrap(),
            HibernationStatus::Awake,
            Utc.with_ymd_and_hms(2026, 9, 2, 4, 15, 0).unwrap(),
        )
        .with_nickname("Rift")
        .with_super_power(SuperPower::new("Fold Space", PowerClass::Dimensional))
        .with_mutations(8)
        .unwrap()
    }

    fn full_combat_drone() -> Drone {
        Drone::new("CX-7001", DroneType::Combat, Utc.with_ymd_and_hms(2026, 9, 20, 12, 0, 0).unwrap())
            .with_levels(100.0, 100.0, 100.0)
    }

    #[test]
    fn test_end_to_end_capture() {
        let creature = rift_duck();
        let drone = full_combat_drone();

        let analysis = CaptureAnalyzer::default().analyze_checked(&creature).unwrap();
        assert!(analysis.risk_level >= 80.0 && analysis.scientific_value >= 80.0);
        assert!(matches!(
            analysis.classification,
            CaptureClassification::TopPriority | CaptureClassification::HighPriority
        ));

        let mut store = InMemoryStore::new();
        store.put_creature(creature.clone()).unwrap();
        store.put_drone(drone.clone()).unwrap();
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 1, 5, 0, 0).unwrap()));
        let mut service = OperationService::new(store, Arc::clone(&clock));

        let history = service.capture_history(creature.id).unwrap();
        let strategy = StrategyGenerator::default()
            .propose(&creature, &history, &drone, &mut ChaCha8Rng::seed_from_u64(2026))
            .unwrap();
        assert!(strategy.success_chance > 50.0, "{}", strategy.success_chance);

        let op = service.create(creature.id, drone.id, &strategy, true).unwrap();
        clock.advance(Duration::minutes(20));
        service.start(op.id).unwrap();
        clock.advance(Duration::minutes(45));
        let done = service.complete(op.id, CaptureResult::Success).unwrap();

        let history = service.capture_history(creature.id).unwrap();
        assert!(history.captured());
        assert_eq!(history.capture_date(), done.end_time());
        assert_eq!(done.result(), Some(CaptureResult::Success));

        let err = StrategyGenerator::default()
            .propose(&creature, &history, &drone, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capability);
    }

    #[test]
    fn test_abort_then_retry() {
        let creature = rift_duck();
        let drone = full_combat_drone();
        let mut store = InMemoryStore::new();
        store.put_creature(creature.clone()).unwrap();
        store.put_drone(drone.clone()).unwrap();
        let mut service = OperationService::new(store, SystemClock);

        let history = service.capture_history(creature.id).unwrap();
        let strategy = StrategyGenerator::default()
            .propose(&creature, &history, &drone, &mut ChaCha8Rng::seed_from_u64(8))
            .unwrap();

        let first = service.create(creature.id, drone.id, &strategy, false).unwrap();
        let aborted = service.abort(first.id).unwrap();
        assert!(aborted.end_time().is_some());
        assert_eq!(aborted.result(), None);
        assert_eq!(service.start(first.id).unwrap_err().kind(), ErrorKind::InvalidTransition);

        let second = service.create(creature.id, drone.id, &strategy, false).unwrap();
        service.start(second.id).unwrap();
        service.complete(second.id, CaptureResult::Escaped).unwrap();

        let history = service.capture_history(creature.id).unwrap();
        assert_eq!(history.attempts(), 2);
        assert!(!history.captured());
        assert_eq!(
            service.store_mut().remove_creature(creature.id).unwrap_err().kind(),
            ErrorKind::Validation
        );
    }
}
