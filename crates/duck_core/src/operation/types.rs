//! Capture operation lifecycle.
//!
//! ```text
//! Preparing ──start──▶ InProgress ──complete(Success)──▶ Success
//!     │                    │      └─complete(other)───▶ Failed
//!     └──────abort─────────┴──────────abort───────────▶ Aborted
//! ```
//!
//! Transitions are all-or-nothing: a rejected transition leaves the
//! operation exactly as it was.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::tactics::{CaptureStrategy, Defense, Tactic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Preparing,
    InProgress,
    Success,
    Failed,
    Aborted,
}

impl OperationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Success | OperationStatus::Failed | OperationStatus::Aborted)
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationStatus::Preparing => "preparing",
            OperationStatus::InProgress => "in progress",
            OperationStatus::Success => "successful",
            OperationStatus::Failed => "failed",
            OperationStatus::Aborted => "aborted",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Start,
    Complete,
    Abort,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Start => "start",
            Transition::Complete => "complete",
            Transition::Abort => "abort",
        })
    }
}

/// Outcome reported by whoever flew the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureResult {
    Success,
    Escaped,
    Failed,
    DroneDestroyed,
}

/// The non-success outcomes. A `Failed` state can only hold one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    Escaped,
    Failed,
    DroneDestroyed,
}

impl From<FailureReason> for CaptureResult {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::Escaped => CaptureResult::Escaped,
            FailureReason::Failed => CaptureResult::Failed,
            FailureReason::DroneDestroyed => CaptureResult::DroneDestroyed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationState {
    Preparing,
    InProgress { launched_at: DateTime<Utc> },
    Success { launched_at: DateTime<Utc>, ended_at: DateTime<Utc> },
    Failed { launched_at: DateTime<Utc>, ended_at: DateTime<Utc>, reason: FailureReason },
    Aborted { ended_at: DateTime<Utc> },
}

impl OperationState {
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationState::Preparing => OperationStatus::Preparing,
            OperationState::InProgress { .. } => OperationStatus::InProgress,
            OperationState::Success { .. } => OperationStatus::Success,
            OperationState::Failed { .. } => OperationStatus::Failed,
            OperationState::Aborted { .. } => OperationStatus::Aborted,
        }
    }
}

/// The strategy triple an operation was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategySnapshot {
    pub tactic: Tactic,
    pub defense: Defense,
    pub success_chance: f64,
}

impl From<&CaptureStrategy> for StrategySnapshot {
    fn from(strategy: &CaptureStrategy) -> Self {
        Self {
            tactic: strategy.tactic,
            defense: strategy.defense,
            success_chance: strategy.success_chance,
        }
    }
}

/// One mission attempt linking a creature and a drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOperation {
    pub id: Uuid,
    pub creature_id: Uuid,
    pub drone_id: Uuid,
    pub strategy: StrategySnapshot,
    pub started_at: DateTime<Utc>,
    pub auto_guided: bool,
    state: OperationState,
}

impl CaptureOperation {
    /// New operation in `Preparing`. Eligibility is the caller's job;
    /// [`crate::operation::OperationService::create`] is the checked path.
    pub fn open(
        creature_id: Uuid,
        drone_id: Uuid,
        strategy: StrategySnapshot,
        auto_guided: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            creature_id,
            drone_id,
            strategy,
            started_at: now,
            auto_guided,
            state: OperationState::Preparing,
        }
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    pub fn status(&self) -> OperationStatus {
        self.state.status()
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Set exactly when the operation is terminal.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        match self.state {
            OperationState::Success { ended_at, .. }
            | OperationState::Failed { ended_at, .. }
            | OperationState::Aborted { ended_at } => Some(ended_at),
            OperationState::Preparing | OperationState::InProgress { .. } => None,
        }
    }

    /// Set exactly when the operation reached `Success` or `Failed`.
    pub fn result(&self) -> Option<CaptureResult> {
        match self.state {
            OperationState::Success { .. } => Some(CaptureResult::Success),
            OperationState::Failed { reason, .. } => Some(reason.into()),
            _ => None,
        }
    }

    /// `Preparing -> InProgress`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<()> {
        match self.state {
            OperationState::Preparing => {
                self.state = OperationState::InProgress { launched_at: now };
                Ok(())
            }
            _ => Err(self.rejected(Transition::Start)),
        }
    }

    /// `InProgress -> Success` for a successful result, `InProgress -> Failed` otherwise.
    pub fn complete(&mut self, result: CaptureResult, now: DateTime<Utc>) -> Result<()> {
        let launched_at = match self.state {
            OperationState::InProgress { launched_at } => launched_at,
            _ => return Err(self.rejected(Transition::Complete)),
        };
        self.state = match result {
            CaptureResult::Success => OperationState::Success { launched_at, ended_at: now },
            CaptureResult::Escaped => OperationState::Failed {
                launched_at,
                ended_at: now,
                reason: FailureReason::Escaped,
            },
            CaptureResult::Failed => OperationState::Failed {
                launched_at,
                ended_at: now,
                reason: FailureReason::Failed,
            },
            CaptureResult::DroneDestroyed => OperationState::Failed {
                launched_at,
                ended_at: now,
                reason: FailureReason::DroneDestroyed,
            },
        };
        Ok(())
    }

    /// `Preparing | InProgress -> Aborted`.
    pub fn abort(&mut self, now: DateTime<Utc>) -> Result<()> {
        match self.state {
            OperationState::Preparing | OperationState::InProgress { .. } => {
                self.state = OperationState::Aborted { ended_at: now };
                Ok(())
            }
            _ => Err(self.rejected(Transition::Abort)),
        }
    }

    fn rejected(&self, attempted: Transition) -> EngineError {
        EngineError::InvalidTransition { operation_id: self.id, from: self.status(), attempted }
    }
}
