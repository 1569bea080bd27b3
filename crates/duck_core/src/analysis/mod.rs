pub mod capture_analysis;

pub use capture_analysis::{
    CaptureAnalysis, CaptureAnalyzer, CaptureClassification, ThreatProfile,
};
