use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EntityKind, Result, ValidationError};
use crate::models::{Creature, Drone};
use crate::operation::CaptureOperation;

use super::{CreatureLookup, DroneLookup, OperationStore};

/// HashMap-backed store for tests, the CLI and single-process callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    creatures: HashMap<Uuid, Creature>,
    drones: HashMap<Uuid, Drone>,
    operations: HashMap<Uuid, CaptureOperation>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a creature after validating it.
    pub fn put_creature(&mut self, creature: Creature) -> Result<()> {
        creature.check()?;
        self.creatures.insert(creature.id, creature);
        Ok(())
    }

    /// Insert or replace a drone after validating it.
    pub fn put_drone(&mut self, drone: Drone) -> Result<()> {
        drone.check()?;
        self.drones.insert(drone.id, drone);
        Ok(())
    }

    /// Fails with `StillReferenced` while any operation points at the creature.
    pub fn remove_creature(&mut self, id: Uuid) -> Result<Creature> {
        self.guard_unreferenced(EntityKind::Creature, id, |op| op.creature_id == id)?;
        self.creatures.remove(&id).ok_or_else(|| EngineError::not_found(EntityKind::Creature, id))
    }

    /// Fails with `StillReferenced` while any operation points at the drone.
    pub fn remove_drone(&mut self, id: Uuid) -> Result<Drone> {
        self.guard_unreferenced(EntityKind::Drone, id, |op| op.drone_id == id)?;
        self.drones.remove(&id).ok_or_else(|| EngineError::not_found(EntityKind::Drone, id))
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn drone_count(&self) -> usize {
        self.drones.len()
    }

    fn guard_unreferenced(
        &self,
        entity: EntityKind,
        id: Uuid,
        references: impl Fn(&CaptureOperation) -> bool,
    ) -> Result<()> {
        let operations = self.operations.values().filter(|op| references(op)).count();
        if operations > 0 {
            return Err(ValidationError::StillReferenced { entity, id, operations }.into());
        }
        Ok(())
    }
}

impl CreatureLookup for InMemoryStore {
    fn creature(&self, id: Uuid) -> Result<Creature> {
        self.creatures.get(&id).cloned().ok_or_else(|| EngineError::not_found(EntityKind::Creature, id))
    }
}

impl DroneLookup for InMemoryStore {
    fn drone(&self, id: Uuid) -> Result<Drone> {
        self.drones.get(&id).cloned().ok_or_else(|| EngineError::not_found(EntityKind::Drone, id))
    }
}

impl OperationStore for InMemoryStore {
    fn insert_operation(&mut self, operation: CaptureOperation) -> Result<()> {
        if self.operations.contains_key(&operation.id) {
            return Err(ValidationError::Field {
                field: "id".to_string(),
                code: "duplicate".to_string(),
            }
            .into());
        }
        debug!(operation = %operation.id, "operation stored");
        self.operations.insert(operation.id, operation);
        Ok(())
    }

    fn operation(&self, id: Uuid) -> Result<CaptureOperation> {
        self.operations.get(&id).cloned().ok_or_else(|| EngineError::not_found(EntityKind::Operation, id))
    }

    fn operations(&self) -> Vec<CaptureOperation> {
        let mut all: Vec<_> = self.operations.values().cloned().collect();
        all.sort_by(|a, b| a.started_at.cmp(&b.started_at).then(a.id.cmp(&b.id)));
        all
    }

    fn modify_operation<F>(&mut self, id: Uuid, f: F) -> Result<CaptureOperation>
    where
        F: FnOnce(&mut CaptureOperation) -> Result<()>,
    {
        let stored = self
            .operations
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Operation, id))?;
        let mut draft = stored.clone();
        f(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::creature::fixtures::sample_creature;
    use crate::models::drone::fixtures::combat_drone;
    use crate::operation::types::fixtures::snapshot;
    use crate::operation::{CaptureResult, OperationStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn seeded() -> (InMemoryStore, Creature, Drone) {
        let mut store = InMemoryStore::new();
        let creature = sample_creature();
        let drone = combat_drone(90.0, 90.0, 90.0);
        store.put_creature(creature.clone()).unwrap();
        store.put_drone(drone.clone()).unwrap();
        (store, creature, drone)
    }

    #[test]
    fn test_lookup_misses_are_not_found() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.creature(id).unwrap_err(), EngineError::not_found(EntityKind::Creature, id));
        assert_eq!(store.drone(id).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(store.operation(id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_failed_modification_is_not_committed() {
        let (mut store, creature, drone) = seeded();
        let op = CaptureOperation::open(creature.id, drone.id, snapshot(), true, Utc::now());
        store.insert_operation(op.clone()).unwrap();

        let err = store
            .modify_operation(op.id, |draft| draft.complete(CaptureResult::Success, Utc::now()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(store.operation(op.id).unwrap(), op);

        let started = store.modify_operation(op.id, |draft| draft.start(Utc::now())).unwrap();
        assert_eq!(started.status(), OperationStatus::InProgress);
        assert_eq!(store.operation(op.id).unwrap(), started);
    }

    #[test]
    fn test_referenced_entities_cannot_be_removed() {
        let (mut store, creature, drone) = seeded();
        let op = CaptureOperation::open(creature.id, drone.id, snapshot(), false, Utc::now());
        store.insert_operation(op).unwrap();

        assert_eq!(
            store.remove_creature(creature.id).unwrap_err(),
            EngineError::Validation(ValidationError::StillReferenced {
                entity: EntityKind::Creature,
                id: creature.id,
                operations: 1,
            })
        );
        assert!(store.remove_drone(drone.id).is_err());
        assert_eq!(store.creature_count(), 1);
        assert_eq!(store.drone_count(), 1);
    }

    #[test]
    fn test_unreferenced_entities_can_be_removed() {
        let (mut store, creature, drone) = seeded();
        assert_eq!(store.remove_creature(creature.id).unwrap(), creature);
        assert_eq!(store.remove_drone(drone.id).unwrap(), drone);
        assert_eq!(store.remove_drone(drone.id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_operations_listed_oldest_first() {
        let (mut store, creature, drone) = seeded();
        let t0 = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let late = CaptureOperation::open(creature.id, drone.id, snapshot(), false, t0 + Duration::hours(2));
        let early = CaptureOperation::open(creature.id, drone.id, snapshot(), false, t0);
        store.insert_operation(late.clone()).unwrap();
        store.insert_operation(early.clone()).unwrap();

        assert_eq!(store.operations(), vec![early.clone(), late]);
        assert_eq!(store.capture_history(creature.id).attempts(), 2);
        assert!(store.insert_operation(early).is_err());
    }

    #[test]
    fn test_invalid_creature_rejected_on_put() {
        let mut store = InMemoryStore::new();
        let mut creature = sample_creature();
        creature.location.city_name.clear();
        assert_eq!(store.put_creature(creature).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.creature_count(), 0);
    }
}
