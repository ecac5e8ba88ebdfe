//! Codesight - telemetry-to-insight engine for coding assessments
//!
//! Codesight reduces the raw telemetry captured while a candidate solves a
//! programming task (edits, runs, tab focus changes, pastes, AI usage) to a
//! behavioral profile through a deterministic pipeline: event adaptation →
//! metrics extraction → {insight generation, recommendation scoring} →
//! report encoding.
//!
//! The compute core is stateless and total: one immutable event log in, one
//! metrics/insight/recommendation triple out, no errors for any log content.

pub mod adapter;
pub mod error;
pub mod insight;
pub mod metrics;
pub mod profile;
pub mod recommend;
pub mod report;
pub mod types;

pub use adapter::EventLogAdapter;
pub use error::ProfileError;
pub use insight::generate_insight;
pub use metrics::MetricsExtractor;
pub use profile::compute_profile;
pub use recommend::RecommendationScorer;
pub use report::{ProfileReport, ProfileReportEncoder, REPORT_VERSION};
pub use types::{
    CandidateProfile, MetricsSnapshot, ProfileContext, Recommendation, RecommendationCategory,
    TelemetryEvent, TelemetryEventType,
};

/// Codesight version embedded in all report payloads
pub const CODESIGHT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "codesight";
