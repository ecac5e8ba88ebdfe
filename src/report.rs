//! Profile report encoder
//!
//! Wraps a candidate profile in a versioned JSON envelope for the
//! recruiter-facing surface: producer metadata, provenance timestamps, and
//! the framing context alongside the computed profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProfileError;
use crate::types::{CandidateProfile, ProfileContext};
use crate::{CODESIGHT_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata stamped into every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier
    pub instance_id: String,
}

/// Provenance of the profiled attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    /// Candidate label shown to the reviewer
    pub candidate_label: String,
    /// Title of the attempted task
    pub task_title: String,
    /// Timestamp of the first event in the log (RFC3339), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at_utc: Option<String>,
    /// When this report was computed (RFC3339)
    pub computed_at_utc: String,
}

/// Versioned report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Report schema version
    pub report_version: String,
    /// Producer metadata
    pub producer: ReportProducer,
    /// Attempt provenance
    pub provenance: ReportProvenance,
    /// Computed behavioral profile
    pub profile: CandidateProfile,
}

/// Profile report encoder
pub struct ProfileReportEncoder {
    instance_id: String,
}

impl Default for ProfileReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap a computed profile in the report envelope
    pub fn encode(
        &self,
        profile: &CandidateProfile,
        context: &ProfileContext,
        observed_at: Option<DateTime<Utc>>,
    ) -> ProfileReport {
        ProfileReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: CODESIGHT_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            provenance: ReportProvenance {
                candidate_label: context.candidate_label.clone(),
                task_title: context.task_title.clone(),
                observed_at_utc: observed_at.map(|t| t.to_rfc3339()),
                computed_at_utc: Utc::now().to_rfc3339(),
            },
            profile: profile.clone(),
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        profile: &CandidateProfile,
        context: &ProfileContext,
        observed_at: Option<DateTime<Utc>>,
    ) -> Result<String, ProfileError> {
        let report = self.encode(profile, context, observed_at);
        serde_json::to_string_pretty(&report).map_err(ProfileError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::compute_profile;
    use chrono::TimeZone;

    fn sample_context() -> ProfileContext {
        ProfileContext {
            candidate_label: "jordan@example.com".to_string(),
            task_title: "FizzBuzz".to_string(),
        }
    }

    #[test]
    fn test_report_envelope() {
        let context = sample_context();
        let profile = compute_profile(&[], &context);
        let observed = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let encoder = ProfileReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(&profile, &context, Some(observed));

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.provenance.candidate_label, "jordan@example.com");
        assert_eq!(report.provenance.task_title, "FizzBuzz");
        assert_eq!(
            report.provenance.observed_at_utc.as_deref(),
            Some("2024-03-01T10:00:00+00:00")
        );
    }

    #[test]
    fn test_report_json_round_trip() {
        let context = sample_context();
        let profile = compute_profile(&[], &context);

        let encoder = ProfileReportEncoder::new();
        let json = encoder.encode_to_json(&profile, &context, None).unwrap();

        let parsed: ProfileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.profile.insight, "Limited activity recorded.");
        assert!(parsed.provenance.observed_at_utc.is_none());
    }

    #[test]
    fn test_each_encoder_gets_unique_instance_id() {
        let a = ProfileReportEncoder::new();
        let b = ProfileReportEncoder::new();
        assert_ne!(a.instance_id, b.instance_id);
    }
}
