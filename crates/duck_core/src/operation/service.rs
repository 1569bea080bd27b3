//! Drives capture operations through a store and a clock.

use chrono::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::Result;
use crate::store::{CreatureLookup, DroneLookup, OperationStore};
use crate::tactics::CaptureStrategy;

use super::history::CaptureHistory;
use super::types::{CaptureOperation, CaptureResult, StrategySnapshot};

/// Checked entry point for the operation lifecycle.
///
/// Every transition is one `modify_operation` call, so a rejected transition
/// never reaches the store.
pub struct OperationService<S, C> {
    store: S,
    clock: C,
}

impl<S, C> OperationService<S, C>
where
    S: CreatureLookup + DroneLookup + OperationStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Open an operation in `Preparing` from a proposal for this exact pairing.
    ///
    /// Capability is checked again against the current records, since the
    /// drone or the creature's history may have changed since the proposal.
    pub fn create(
        &mut self,
        creature_id: Uuid,
        drone_id: Uuid,
        strategy: &CaptureStrategy,
        auto_guided: bool,
    ) -> Result<CaptureOperation> {
        strategy.check_target(creature_id, drone_id)?;
        let creature = self.store.creature(creature_id)?;
        let drone = self.store.drone(drone_id)?;
        creature.check()?;
        drone.check()?;

        let history = self.store.capture_history(creature_id);
        if let Err(err) = history.check_eligible(&drone) {
            warn!(creature = %creature_id, drone = %drone_id, %err, "operation refused");
            return Err(err.into());
        }

        let operation = CaptureOperation::open(
            creature_id,
            drone_id,
            StrategySnapshot::from(strategy),
            auto_guided,
            self.clock.now(),
        );
        self.store.insert_operation(operation.clone())?;
        info!(
            operation = %operation.id,
            creature = %creature_id,
            drone = %drone_id,
            tactic = %strategy.tactic,
            "capture operation created"
        );
        Ok(operation)
    }

    pub fn start(&mut self, operation_id: Uuid) -> Result<CaptureOperation> {
        let now = self.clock.now();
        let operation = self
            .store
            .modify_operation(operation_id, |op| op.start(now))
            .map_err(|err| {
                warn!(operation = %operation_id, %err, "start rejected");
                err
            })?;
        info!(operation = %operation_id, "capture operation launched");
        Ok(operation)
    }

    pub fn complete(&mut self, operation_id: Uuid, result: CaptureResult) -> Result<CaptureOperation> {
        let now = self.clock.now();
        let operation = self
            .store
            .modify_operation(operation_id, |op| op.complete(result, now))
            .map_err(|err| {
                warn!(operation = %operation_id, %err, "completion rejected");
                err
            })?;
        info!(operation = %operation_id, status = %operation.status(), ?result, "capture operation finished");
        Ok(operation)
    }

    pub fn abort(&mut self, operation_id: Uuid) -> Result<CaptureOperation> {
        let now = self.clock.now();
        let operation = self
            .store
            .modify_operation(operation_id, |op| op.abort(now))
            .map_err(|err| {
                warn!(operation = %operation_id, %err, "abort rejected");
                err
            })?;
        info!(operation = %operation_id, "capture operation aborted");
        Ok(operation)
    }

    /// `NotFound` for an unknown creature, otherwise its full history.
    pub fn capture_history(&self, creature_id: Uuid) -> Result<CaptureHistory> {
        self.store.creature(creature_id)?;
        Ok(self.store.capture_history(creature_id))
    }

    /// Abort every open operation older than `max_age`. Returns the aborted ids.
    pub fn abort_overdue(&mut self, max_age: Duration) -> Result<Vec<Uuid>> {
        let now = self.clock.now();
        let overdue: Vec<Uuid> = self
            .store
            .operations()
            .into_iter()
            .filter(|op| !op.is_terminal() && now - op.started_at > max_age)
            .map(|op| op.id)
            .collect();

        for id in &overdue {
            self.store.modify_operation(*id, |op| op.abort(now))?;
            warn!(operation = %id, "overdue capture operation aborted");
        }
        Ok(overdue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clock::ManualClock;
    use crate::error::{CapabilityError, EngineError, EntityKind, ErrorKind, ValidationError};
    use crate::models::creature::fixtures::sample_creature;
    use crate::models::drone::fixtures::combat_drone;
    use crate::models::{Creature, Drone};
    use crate::operation::OperationStatus;
    use crate::store::InMemoryStore;
    use crate::tactics::StrategyGenerator;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Harness {
        service: OperationService<InMemoryStore, Arc<ManualClock>>,
        clock: Arc<ManualClock>,
        creature: Creature,
        drone: Drone,
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 6, 0, 0).unwrap()
    }

    fn harness() -> Harness {
        let creature = sample_creature();
        let drone = combat_drone(95.0, 90.0, 85.0);
        let mut store = InMemoryStore::new();
        store.put_creature(creature.clone()).unwrap();
        store.put_drone(drone.clone()).unwrap();
        let clock = Arc::new(ManualClock::new(t0()));
        let service = OperationService::new(store, Arc::clone(&clock));
        Harness { service, clock, creature, drone }
    }

    fn proposal(h: &Harness) -> CaptureStrategy {
        let history = h.service.capture_history(h.creature.id).unwrap();
        StrategyGenerator::default()
            .propose(&h.creature, &history, &h.drone, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap()
    }

    #[test]
    fn test_create_uses_clock_and_snapshot() {
        let mut h = harness();
        let strategy = proposal(&h);
        let op = h.service.create(h.creature.id, h.drone.id, &strategy, true).unwrap();

        assert_eq!(op.status(), OperationStatus::Preparing);
        assert_eq!(op.started_at, t0());
        assert_eq!(op.strategy, StrategySnapshot::from(&strategy));
        assert!(op.auto_guided);
        assert_eq!(h.service.store().operation(op.id).unwrap(), op);
    }

    #[test]
    fn test_success_marks_creature_captured() {
        let mut h = harness();
        let strategy = proposal(&h);
        let op = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap();
        h.clock.advance(Duration::minutes(10));
        h.service.start(op.id).unwrap();
        h.clock.advance(Duration::hours(1));
        let done = h.service.complete(op.id, CaptureResult::Success).unwrap();

        let history = h.service.capture_history(h.creature.id).unwrap();
        assert!(history.captured());
        assert_eq!(history.capture_date(), done.end_time());
        assert_eq!(done.end_time(), Some(t0() + Duration::minutes(70)));

        let err = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap_err();
        assert_eq!(err, EngineError::Capability(CapabilityError::AlreadyCaptured(h.creature.id)));
    }

    #[test]
    fn test_rejected_transition_leaves_record_alone() {
        let mut h = harness();
        let strategy = proposal(&h);
        let op = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap();

        let err = h.service.complete(op.id, CaptureResult::Success).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(h.service.store().operation(op.id).unwrap(), op);

        h.service.start(op.id).unwrap();
        assert_eq!(h.service.start(op.id).unwrap_err().kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut h = harness();
        let strategy = proposal(&h);
        let ghost = Uuid::new_v4();

        assert_eq!(h.service.start(ghost).unwrap_err(), EngineError::not_found(EntityKind::Operation, ghost));
        assert_eq!(h.service.capture_history(ghost).unwrap_err().kind(), ErrorKind::NotFound);

        h.service.store_mut().remove_drone(h.drone.id).unwrap();
        let err = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap_err();
        assert_eq!(err, EngineError::not_found(EntityKind::Drone, h.drone.id));
    }

    #[test]
    fn test_mismatched_proposal_is_validation_error() {
        let mut h = harness();
        let strategy = proposal(&h);
        let other = Uuid::new_v4();
        let err = h.service.create(other, h.drone.id, &strategy, false).unwrap_err();
        assert!(matches!(err, EngineError::Validation(ValidationError::IdentityMismatch { .. })));
        assert!(h.service.store().operations().is_empty());
    }

    #[test]
    fn test_create_rechecks_drone_capability() {
        let mut h = harness();
        let strategy = proposal(&h);
        let worn = h.drone.clone().with_levels(95.0, 3.0, 85.0);
        h.service.store_mut().put_drone(worn).unwrap();

        let err = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap_err();
        assert!(matches!(err, EngineError::Capability(CapabilityError::FuelDepleted { .. })));
    }

    #[test]
    fn test_abort_overdue_only_touches_stale_open_operations() {
        let mut h = harness();
        let strategy = proposal(&h);
        let stale = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap();
        h.service.start(stale.id).unwrap();

        let finished = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap();
        h.service.abort(finished.id).unwrap();

        h.clock.advance(Duration::hours(5));
        let fresh = h.service.create(h.creature.id, h.drone.id, &strategy, false).unwrap();

        let aborted = h.service.abort_overdue(Duration::hours(4)).unwrap();
        assert_eq!(aborted, vec![stale.id]);

        let store = h.service.store();
        assert_eq!(store.operation(stale.id).unwrap().status(), OperationStatus::Aborted);
        assert_eq!(store.operation(stale.id).unwrap().result(), None);
        assert_eq!(store.operation(fresh.id).unwrap().status(), OperationStatus::Preparing);
    }
}
