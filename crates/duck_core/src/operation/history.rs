use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CapabilityError;
use crate::models::Drone;

use super::types::{CaptureOperation, CaptureResult};

/// Every operation ever opened against one creature.
///
/// Capture status is derived from this list on each call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureHistory {
    creature_id: Uuid,
    operations: Vec<CaptureOperation>,
}

impl CaptureHistory {
    /// Operations belonging to other creatures are dropped.
    pub fn new(creature_id: Uuid, operations: impl IntoIterator<Item = CaptureOperation>) -> Self {
        let mut operations: Vec<_> =
            operations.into_iter().filter(|op| op.creature_id == creature_id).collect();
        operations.sort_by_key(|op| op.started_at);
        Self { creature_id, operations }
    }

    pub fn empty(creature_id: Uuid) -> Self {
        Self { creature_id, operations: Vec::new() }
    }

    pub fn creature_id(&self) -> Uuid {
        self.creature_id
    }

    /// Oldest first.
    pub fn operations(&self) -> &[CaptureOperation] {
        &self.operations
    }

    pub fn attempts(&self) -> usize {
        self.operations.len()
    }

    pub fn captured(&self) -> bool {
        self.successes().next().is_some()
    }

    /// End time of the latest successful operation.
    pub fn capture_date(&self) -> Option<DateTime<Utc>> {
        self.successes().filter_map(|op| op.end_time()).max()
    }

    /// The first operation not yet in a terminal state, if any.
    pub fn open_operation(&self) -> Option<&CaptureOperation> {
        self.operations.iter().find(|op| !op.is_terminal())
    }

    /// Drone capability, then capture status. Shared by strategy proposal
    /// and operation creation.
    pub fn check_eligible(&self, drone: &Drone) -> Result<(), CapabilityError> {
        drone.check_capture_capability()?;
        if self.captured() {
            return Err(CapabilityError::AlreadyCaptured(self.creature_id));
        }
        Ok(())
    }

    fn successes(&self) -> impl Iterator<Item = &CaptureOperation> {
        self.operations.iter().filter(|op| op.result() == Some(CaptureResult::Success))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drone::fixtures::combat_drone;
    use crate::operation::types::fixtures::preparing;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_history_is_not_captured() {
        let history = CaptureHistory::empty(Uuid::new_v4());
        assert!(!history.captured());
        assert_eq!(history.capture_date(), None);
        assert_eq!(history.attempts(), 0);
        assert!(history.check_eligible(&combat_drone(80.0, 80.0, 80.0)).is_ok());
    }

    #[test]
    fn test_captured_follows_successful_operation() {
        let creature_id = Uuid::new_v4();

        let mut escaped = preparing(creature_id, t0());
        escaped.start(t0()).unwrap();
        escaped.complete(CaptureResult::Escaped, t0() + Duration::hours(1)).unwrap();

        let mut caught = preparing(creature_id, t0() + Duration::days(1));
        caught.start(t0() + Duration::days(1)).unwrap();
        let end = t0() + Duration::days(1) + Duration::hours(3);
        caught.complete(CaptureResult::Success, end).unwrap();

        let failed_only = CaptureHistory::new(creature_id, vec![escaped.clone()]);
        assert!(!failed_only.captured());

        let history = CaptureHistory::new(creature_id, vec![caught, escaped]);
        assert!(history.captured());
        assert_eq!(history.capture_date(), Some(end));
        assert_eq!(history.attempts(), 2);
        assert_eq!(history.operations()[0].result(), Some(CaptureResult::Escaped));
        assert_eq!(
            history.check_eligible(&combat_drone(80.0, 80.0, 80.0)),
            Err(CapabilityError::AlreadyCaptured(creature_id))
        );
    }

    #[test]
    fn test_foreign_operations_are_ignored() {
        let creature_id = Uuid::new_v4();
        let mut other = preparing(Uuid::new_v4(), t0());
        other.start(t0()).unwrap();
        other.complete(CaptureResult::Success, t0()).unwrap();

        let history = CaptureHistory::new(creature_id, vec![other]);
        assert_eq!(history.attempts(), 0);
        assert!(!history.captured());
    }

    #[test]
    fn test_open_operation() {
        let creature_id = Uuid::new_v4();
        let mut aborted = preparing(creature_id, t0());
        aborted.abort(t0()).unwrap();
        let pending = preparing(creature_id, t0() + Duration::minutes(10));

        let history = CaptureHistory::new(creature_id, vec![aborted, pending.clone()]);
        assert_eq!(history.open_operation(), Some(&pending));
    }

    #[test]
    fn test_drone_capability_checked_before_capture_status() {
        let creature_id = Uuid::new_v4();
        let drone = combat_drone(5.0, 80.0, 80.0);
        assert!(matches!(
            CaptureHistory::empty(creature_id).check_eligible(&drone),
            Err(CapabilityError::BatteryDepleted { .. })
        ));
    }
}
