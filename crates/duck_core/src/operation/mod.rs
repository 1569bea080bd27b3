//! Capture operations: the lifecycle state machine, the per-creature
//! history view and the service that drives both through the store.

pub mod history;
pub mod service;
pub mod types;

pub use history::CaptureHistory;
pub use service::OperationService;
pub use types::{
    CaptureOperation, CaptureResult, FailureReason, OperationState, OperationStatus,
    StrategySnapshot, Transition,
};
