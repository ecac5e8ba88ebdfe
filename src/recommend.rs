//! Recommendation scoring
//!
//! Maps a metrics snapshot to a narrative behavioral analysis, a weighted
//! additive score, and a categorical hiring tier. Narrative categories are
//! independent; within a category the first matching rule wins.

use crate::types::{MetricsSnapshot, Recommendation, RecommendationCategory};

/// Score at or above which the candidate is rated strong
const STRONG_THRESHOLD: u32 = 80;

/// Score at or above which the candidate is rated promising
const PROMISING_THRESHOLD: u32 = 60;

/// Score at or above which the candidate needs review rather than concerns
const NEEDS_REVIEW_THRESHOLD: u32 = 40;

/// Recommendation scorer for candidate metrics
pub struct RecommendationScorer;

impl RecommendationScorer {
    /// Produce the full recommendation for one attempt
    pub fn recommend(metrics: &MetricsSnapshot) -> Recommendation {
        let score = Self::score(metrics);
        let category = Self::categorize(score);
        let narrative = build_narrative(metrics, category);

        Recommendation {
            narrative,
            score,
            category,
        }
    }

    /// Weighted additive score, 0-100
    ///
    /// Independent boolean rules:
    /// - linear typing ratio > 0.5 → +25
    /// - refine cycles >= 2 → +20
    /// - no large pastes → +20
    /// - AI usage <= 3 → +15
    /// - focus percent >= 70 → +10
    /// - run count >= 2 → +10
    pub fn score(metrics: &MetricsSnapshot) -> u32 {
        let mut score = 0;

        if metrics.linear_typing_ratio > 0.5 {
            score += 25;
        }
        if metrics.refine_cycles >= 2 {
            score += 20;
        }
        if metrics.large_paste_count == 0 {
            score += 20;
        }
        if metrics.ai_usage_count <= 3 {
            score += 15;
        }
        if focus_percent(metrics) >= 70.0 {
            score += 10;
        }
        if metrics.run_count >= 2 {
            score += 10;
        }

        score
    }

    /// Map a score to its tier, highest tier first
    pub fn categorize(score: u32) -> RecommendationCategory {
        if score >= STRONG_THRESHOLD {
            RecommendationCategory::Strong
        } else if score >= PROMISING_THRESHOLD {
            RecommendationCategory::Promising
        } else if score >= NEEDS_REVIEW_THRESHOLD {
            RecommendationCategory::NeedsReview
        } else {
            RecommendationCategory::Concerns
        }
    }
}

/// Fraction of elapsed time not spent tab-hidden, as a percentage
///
/// Defined as 100 when no time elapsed at all.
fn focus_percent(metrics: &MetricsSnapshot) -> f64 {
    if metrics.total_time_seconds > 0.0 {
        (metrics.total_time_seconds - metrics.context_switch_seconds)
            / metrics.total_time_seconds
            * 100.0
    } else {
        100.0
    }
}

/// Concatenate the category phrases and append the tier verdict
fn build_narrative(metrics: &MetricsSnapshot, category: RecommendationCategory) -> String {
    let phrases: Vec<String> = [
        authenticity_phrase(metrics),
        problem_solving_phrase(metrics),
        ai_reliance_phrase(metrics),
        focus_phrase(metrics),
        efficiency_phrase(metrics),
    ]
    .into_iter()
    .flatten()
    .collect();

    if phrases.is_empty() {
        category.verdict().to_string()
    } else {
        format!("{}. \n\n{}", phrases.join(". "), category.verdict())
    }
}

/// Coding authenticity: linear typing against paste usage
fn authenticity_phrase(metrics: &MetricsSnapshot) -> Option<String> {
    let linear = metrics.linear_typing_ratio;
    let pastes = metrics.large_paste_count;

    if linear > 0.6 && pastes == 0 {
        Some("Strong evidence of authentic, manual coding".to_string())
    } else if linear > 0.4 && pastes <= 1 {
        Some("Mostly original work with minimal external code".to_string())
    } else if pastes > 2 || (pastes > 0 && linear < 0.3) {
        Some(
            "Significant reliance on copy-pasted code - review pasted content carefully"
                .to_string(),
        )
    } else {
        None
    }
}

/// Problem-solving approach: refine cycles against run count
fn problem_solving_phrase(metrics: &MetricsSnapshot) -> Option<String> {
    if metrics.refine_cycles >= 4 {
        Some(
            "Excellent iterative problem-solving approach with multiple test-and-refine cycles"
                .to_string(),
        )
    } else if metrics.refine_cycles >= 2 {
        Some("Good iterative development pattern".to_string())
    } else if metrics.run_count == 0 {
        Some(
            "Did not test code before submission - may indicate uncertainty or time pressure"
                .to_string(),
        )
    } else if metrics.refine_cycles == 0 {
        Some(
            "Limited iteration - code may have worked on first attempt or candidate gave up early"
                .to_string(),
        )
    } else {
        None
    }
}

/// AI reliance tiers: none / minimal / moderate / heavy
fn ai_reliance_phrase(metrics: &MetricsSnapshot) -> Option<String> {
    let ai_count = metrics.ai_usage_count;

    if ai_count == 0 {
        Some("Completed task independently without AI assistance".to_string())
    } else if ai_count <= 2 {
        Some("Minimal AI usage - shows self-reliance".to_string())
    } else if ai_count <= 5 {
        Some("Moderate AI assistance - reasonable use of available tools".to_string())
    } else {
        Some(format!(
            "Heavy AI reliance ({ai_count} queries) - may indicate struggle with core concepts"
        ))
    }
}

/// Focus tiers: highly focused / good focus / mostly away
fn focus_phrase(metrics: &MetricsSnapshot) -> Option<String> {
    let focus = focus_percent(metrics);

    if focus >= 90.0 {
        Some("Highly focused throughout the assessment".to_string())
    } else if focus >= 70.0 {
        Some("Good focus with minimal distractions".to_string())
    } else if focus < 50.0 {
        Some(format!(
            "Spent {}% of time away from task - possible external research or distraction",
            100 - focus as i64
        ))
    } else {
        None
    }
}

/// Efficiency style, only meaningful once some time elapsed
fn efficiency_phrase(metrics: &MetricsSnapshot) -> Option<String> {
    if metrics.total_time_seconds <= 0.0 {
        return None;
    }

    if metrics.edits_per_run > 10.0 {
        Some("Thoughtful approach - makes many changes before testing".to_string())
    } else if metrics.edits_per_run > 0.0 && metrics.edits_per_run < 3.0 {
        Some("Quick iteration style - tests frequently".to_string())
    } else {
        None
    }
}
