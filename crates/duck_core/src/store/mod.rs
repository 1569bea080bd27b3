//! Lookup and persistence boundaries.
//!
//! The engine reads creatures and drones through [`CreatureLookup`] and
//! [`DroneLookup`], and keeps operations in an [`OperationStore`]. Writers
//! take `&mut self`, so a store handed to the engine is written by one
//! caller at a time.

mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Creature, Drone};
use crate::operation::{CaptureHistory, CaptureOperation};

pub trait CreatureLookup {
    /// `NotFound` when no creature has this id.
    fn creature(&self, id: Uuid) -> Result<Creature>;
}

pub trait DroneLookup {
    /// `NotFound` when no drone has this id.
    fn drone(&self, id: Uuid) -> Result<Drone>;
}

pub trait OperationStore {
    fn insert_operation(&mut self, operation: CaptureOperation) -> Result<()>;

    fn operation(&self, id: Uuid) -> Result<CaptureOperation>;

    /// All operations, oldest first.
    fn operations(&self) -> Vec<CaptureOperation>;

    fn operations_for_creature(&self, creature_id: Uuid) -> Vec<CaptureOperation> {
        self.operations().into_iter().filter(|op| op.creature_id == creature_id).collect()
    }

    fn capture_history(&self, creature_id: Uuid) -> CaptureHistory {
        CaptureHistory::new(creature_id, self.operations_for_creature(creature_id))
    }

    /// Read, mutate a copy, and commit it only if `f` succeeds.
    ///
    /// Returns the committed record. On error the stored record is untouched.
    fn modify_operation<F>(&mut self, id: Uuid, f: F) -> Result<CaptureOperation>
    where
        F: FnOnce(&mut CaptureOperation) -> Result<()>;
}
