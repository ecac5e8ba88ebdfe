//! Profile pipeline orchestration
//!
//! This module provides the public API for deriving a behavioral profile
//! from a telemetry event log: extract metrics, then generate the insight
//! and the recommendation from the resulting snapshot.

use crate::insight::generate_insight;
use crate::metrics::MetricsExtractor;
use crate::recommend::RecommendationScorer;
use crate::types::{CandidateProfile, ProfileContext, TelemetryEvent};

/// Derive the full behavioral profile for one (candidate, task) attempt.
///
/// The caller guarantees the events are in ascending timestamp order and
/// scoped to a single attempt. The computation is total: it never fails,
/// whatever the log contains. The context strings frame the report surface
/// and never influence metrics, insight, or score.
///
/// # Example
/// ```ignore
/// let profile = compute_profile(&events, &context);
/// println!("{}: {}", context.candidate_label, profile.insight);
/// ```
pub fn compute_profile(events: &[TelemetryEvent], _context: &ProfileContext) -> CandidateProfile {
    // Stage 1: Reduce the event log to a metrics snapshot
    let metrics = MetricsExtractor::extract(events);

    // Stage 2: Derive the insight and the recommendation from the snapshot
    let insight = generate_insight(&metrics);
    let recommendation = RecommendationScorer::recommend(&metrics);

    CandidateProfile {
        metrics,
        insight,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecommendationCategory, TelemetryEventType};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(offset_secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs)
    }

    fn event(event_type: TelemetryEventType, offset_secs: i64) -> TelemetryEvent {
        TelemetryEvent {
            timestamp: at(offset_secs),
            event_type,
            metadata: None,
        }
    }

    fn edit(offset_secs: i64, chars_added: i64) -> TelemetryEvent {
        TelemetryEvent {
            timestamp: at(offset_secs),
            event_type: TelemetryEventType::CodeEdit,
            metadata: Some(serde_json::json!({"chars_added": chars_added})),
        }
    }

    fn context() -> ProfileContext {
        ProfileContext {
            candidate_label: "jordan@example.com".to_string(),
            task_title: "FizzBuzz".to_string(),
        }
    }

    #[test]
    fn test_empty_log_profile() {
        let profile = compute_profile(&[], &context());

        assert_eq!(profile.metrics, crate::types::MetricsSnapshot::default());
        assert_eq!(profile.insight, "Limited activity recorded.");
        // 45 points from the no-paste, low-AI, and full-focus rules.
        assert_eq!(profile.recommendation.score, 45);
        assert_eq!(
            profile.recommendation.category,
            RecommendationCategory::NeedsReview
        );
    }

    #[test]
    fn test_iterative_manual_attempt() {
        let mut events = vec![event(TelemetryEventType::TaskStarted, 0)];
        // Three run-then-edit cycles of small manual edits.
        for cycle in 0..3 {
            let base = 1 + cycle * 20;
            events.push(edit(base, 3));
            events.push(edit(base + 2, 2));
            events.push(event(TelemetryEventType::CodeRun, base + 5));
            events.push(edit(base + 8, 4));
        }
        events.push(event(TelemetryEventType::TaskSubmitted, 600));

        let profile = compute_profile(&events, &context());

        assert_eq!(profile.metrics.edit_count, 9);
        assert_eq!(profile.metrics.run_count, 3);
        // One cycle per run: only the edit right after each run counts.
        assert_eq!(profile.metrics.refine_cycles, 3);
        assert_eq!(profile.metrics.linear_typing_ratio, 1.0);

        // linear (+25), refine (+20), no pastes (+20), no AI (+15),
        // full focus (+10), runs (+10) = 100
        assert_eq!(profile.recommendation.score, 100);
        assert_eq!(
            profile.recommendation.category,
            RecommendationCategory::Strong
        );
        assert!(profile
            .insight
            .contains("Linear typing pattern (likely manual coding)"));
    }

    #[test]
    fn test_paste_heavy_attempt_raises_concerns() {
        let events = vec![
            event(TelemetryEventType::TaskStarted, 0),
            event(TelemetryEventType::LargePaste, 10),
            event(TelemetryEventType::LargePaste, 20),
            event(TelemetryEventType::LargePaste, 30),
            event(TelemetryEventType::AiUsed, 40),
            event(TelemetryEventType::AiUsed, 50),
            event(TelemetryEventType::AiUsed, 60),
            event(TelemetryEventType::AiUsed, 70),
            event(TelemetryEventType::TaskSubmitted, 100),
        ];

        let profile = compute_profile(&events, &context());

        // Only the full-focus rule fires: +10.
        assert_eq!(profile.recommendation.score, 10);
        assert_eq!(
            profile.recommendation.category,
            RecommendationCategory::Concerns
        );
        assert!(profile.insight.contains("Multiple large pastes detected"));
        assert!(profile.insight.contains("Used AI 4x"));
    }

    #[test]
    fn test_context_does_not_affect_outcome() {
        let events = vec![
            event(TelemetryEventType::TaskStarted, 0),
            edit(1, 3),
            event(TelemetryEventType::TaskSubmitted, 30),
        ];

        let a = compute_profile(&events, &context());
        let b = compute_profile(&events, &ProfileContext::default());

        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.insight, b.insight);
        assert_eq!(a.recommendation, b.recommendation);
    }
}
