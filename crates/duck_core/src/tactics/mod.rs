pub mod catalog;
pub mod strategy;

pub use catalog::{Affinity, Defense, Tactic, TacticClass};
pub use strategy::{CaptureStrategy, ChanceBreakdown, ScoreDriver, StrategyGenerator};
