//! Telemetry and profile data types
//!
//! This module defines the types that flow through the telemetry-to-insight
//! pipeline: raw telemetry events, the derived metrics snapshot, and the
//! recommendation output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Telemetry event types captured from the in-browser assessment editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryEventType {
    TaskStarted,
    CodeEdit,
    CodeRun,
    AiUsed,
    TabHidden,
    TabVisible,
    LargePaste,
    TaskSubmitted,
}

/// Metadata attached to a `code_edit` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMetadata {
    /// Number of characters the edit added
    pub chars_added: i64,
}

/// Metadata attached to an `ai_used` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMetadata {
    /// Prompt the candidate sent to the assistant
    #[serde(default)]
    pub prompt: String,
}

/// Metadata attached to a `large_paste` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteMetadata {
    /// Number of characters the paste added
    #[serde(default)]
    pub chars_added: i64,
    /// Leading excerpt of the pasted content
    #[serde(default)]
    pub content_preview: String,
}

/// A single telemetry event for one (candidate, task) attempt
///
/// Events arrive in ascending timestamp order; the caller guarantees the
/// ordering and the single-attempt scoping. The metadata payload is carried
/// untyped and projected into a typed shape on demand, so a malformed
/// payload degrades to `None` for that field instead of failing the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Event type
    pub event_type: TelemetryEventType,
    /// Type-specific payload, if the client attached one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TelemetryEvent {
    /// Project the metadata as an edit payload, if it parses as one
    pub fn edit_metadata(&self) -> Option<EditMetadata> {
        self.typed_metadata()
    }

    /// Project the metadata as an AI-usage payload, if it parses as one
    pub fn ai_metadata(&self) -> Option<AiMetadata> {
        self.typed_metadata()
    }

    /// Project the metadata as a paste payload, if it parses as one
    pub fn paste_metadata(&self) -> Option<PasteMetadata> {
        self.typed_metadata()
    }

    fn typed_metadata<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.metadata
            .as_ref()
            .and_then(|m| serde_json::from_value(m.clone()).ok())
    }
}

/// An AI prompt extracted from the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPromptRecord {
    /// Prompt text (never empty)
    pub prompt: String,
    /// When the prompt was sent
    pub timestamp: DateTime<Utc>,
}

/// A large paste extracted from the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasteRecord {
    /// Number of characters the paste added
    pub chars_added: i64,
    /// Leading excerpt of the pasted content
    pub content_preview: String,
    /// When the paste happened
    pub timestamp: DateTime<Utc>,
}

/// Behavioral metrics derived from one attempt's event log
///
/// Immutable once produced; computed on demand from the current log with no
/// caching. An empty log yields the all-zero snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Elapsed time between first and last event, in seconds
    pub total_time_seconds: f64,
    /// Number of `code_edit` events
    pub edit_count: u32,
    /// Number of `code_run` events
    pub run_count: u32,
    /// Number of run-then-edit transitions (iterative fix-and-retest)
    pub refine_cycles: u32,
    /// Edits per run, rounded to 1 decimal; 0.0 when nothing was run
    pub edits_per_run: f64,
    /// Fraction of edits classified as linear typing, rounded to 2 decimals
    pub linear_typing_ratio: f64,
    /// Number of edits classified as linear typing (1-5 chars added)
    pub linear_typing_edits: u32,
    /// Number of `ai_used` events
    pub ai_usage_count: u32,
    /// Aggregate time spent with the tab hidden, rounded to 1 decimal
    pub context_switch_seconds: f64,
    /// Number of `large_paste` events
    pub large_paste_count: u32,
    /// Prompts sent to the AI assistant, in log order
    pub ai_prompts: Vec<AiPromptRecord>,
    /// Large pastes with their previews, in log order
    pub paste_events: Vec<PasteRecord>,
}

/// Contextual strings used for report framing, never for scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileContext {
    /// Candidate label shown to the reviewer (typically an email)
    pub candidate_label: String,
    /// Title of the task the candidate attempted
    pub task_title: String,
}

/// Categorical hiring recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Concerns,
    NeedsReview,
    Promising,
    Strong,
}

impl RecommendationCategory {
    /// Short uppercase label used in review UIs
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationCategory::Strong => "STRONG CANDIDATE",
            RecommendationCategory::Promising => "PROMISING CANDIDATE",
            RecommendationCategory::NeedsReview => "NEEDS REVIEW",
            RecommendationCategory::Concerns => "CONCERNS NOTED",
        }
    }

    /// Full closing sentence appended to the narrative
    pub fn verdict(&self) -> &'static str {
        match self {
            RecommendationCategory::Strong => {
                "STRONG CANDIDATE - Shows authentic problem-solving skills and good development practices."
            }
            RecommendationCategory::Promising => {
                "PROMISING CANDIDATE - Demonstrates competence with some areas for discussion in interview."
            }
            RecommendationCategory::NeedsReview => {
                "NEEDS REVIEW - Mixed signals; recommend deeper technical interview to assess true ability."
            }
            RecommendationCategory::Concerns => {
                "CONCERNS NOTED - Multiple red flags suggest possible over-reliance on external resources."
            }
        }
    }
}

/// Scored hiring recommendation for one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Free-text behavioral analysis ending in the tier verdict
    pub narrative: String,
    /// Weighted additive score, 0-100
    pub score: u32,
    /// Categorical tier derived from the score
    pub category: RecommendationCategory,
}

/// Full behavioral profile for one (candidate, task) attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Derived behavioral metrics
    pub metrics: MetricsSnapshot,
    /// One-line heuristic summary
    pub insight: String,
    /// Scored hiring recommendation
    pub recommendation: Recommendation,
}
