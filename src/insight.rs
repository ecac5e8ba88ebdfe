//! Insight generation
//!
//! Maps a metrics snapshot to a short human-readable summary. Rules are
//! independent, evaluated in a fixed order, and each contributes at most one
//! phrase; the phrases are joined with ". ".

use crate::types::MetricsSnapshot;

/// Edit count above which the attempt shows high editing activity
const HIGH_EDIT_COUNT: u32 = 20;

/// Refine cycles above which iteration is called out
const GOOD_REFINE_CYCLES: u32 = 3;

/// Paste count above which pastes are flagged as "multiple"
const MULTIPLE_PASTE_COUNT: u32 = 2;

/// Linear typing ratio above which manual coding is suggested
const LINEAR_TYPING_THRESHOLD: f64 = 0.6;

/// Hidden-tab seconds above which time away is called out
const CONTEXT_SWITCH_THRESHOLD_SEC: f64 = 60.0;

/// Fallback when no rule triggers
const FALLBACK_INSIGHT: &str = "Limited activity recorded.";

/// Generate a one-line behavioral insight from a metrics snapshot
pub fn generate_insight(metrics: &MetricsSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    if metrics.edit_count > HIGH_EDIT_COUNT {
        parts.push("High editing activity".to_string());
    }
    if metrics.refine_cycles > GOOD_REFINE_CYCLES {
        parts.push("Good iterative refinement".to_string());
    }
    if metrics.ai_usage_count > 0 {
        parts.push(format!("Used AI {}x", metrics.ai_usage_count));
    }
    if metrics.large_paste_count > MULTIPLE_PASTE_COUNT {
        parts.push("Multiple large pastes detected".to_string());
    } else if metrics.large_paste_count > 0 {
        parts.push(format!(
            "{} large paste(s) detected",
            metrics.large_paste_count
        ));
    }
    if metrics.linear_typing_ratio > LINEAR_TYPING_THRESHOLD {
        parts.push("Linear typing pattern (likely manual coding)".to_string());
    }
    if metrics.context_switch_seconds > CONTEXT_SWITCH_THRESHOLD_SEC {
        parts.push(format!(
            "~{}s away from task",
            metrics.context_switch_seconds as i64
        ));
    }

    if parts.is_empty() {
        FALLBACK_INSIGHT.to_string()
    } else {
        parts.join(". ")
    }
}
