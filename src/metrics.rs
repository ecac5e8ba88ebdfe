//! Metrics extraction
//!
//! Reduces an ordered telemetry event log to a [`MetricsSnapshot`] in a few
//! linear passes. The extractor is a pure function: it never mutates or
//! reorders its input, never fails, and treats malformed per-event metadata
//! as absent for the affected field only.

use chrono::{DateTime, Utc};

use crate::types::{
    AiPromptRecord, MetricsSnapshot, PasteRecord, TelemetryEvent, TelemetryEventType,
};

/// Inclusive bounds on `chars_added` for an edit to count as linear typing
const LINEAR_EDIT_MIN_CHARS: i64 = 1;
const LINEAR_EDIT_MAX_CHARS: i64 = 5;

/// Metrics extractor for telemetry event logs
pub struct MetricsExtractor;

impl MetricsExtractor {
    /// Extract a metrics snapshot from an ordered event log
    ///
    /// An empty log yields the all-zero snapshot.
    pub fn extract(events: &[TelemetryEvent]) -> MetricsSnapshot {
        if events.is_empty() {
            return MetricsSnapshot::default();
        }

        let total_time_seconds = elapsed_seconds(events);

        let edit_count = count_events(events, TelemetryEventType::CodeEdit);
        let run_count = count_events(events, TelemetryEventType::CodeRun);
        let ai_usage_count = count_events(events, TelemetryEventType::AiUsed);
        let large_paste_count = count_events(events, TelemetryEventType::LargePaste);

        let edits_per_run = if run_count > 0 {
            round1(edit_count as f64 / run_count as f64)
        } else {
            0.0
        };

        let refine_cycles = count_refine_cycles(events);
        let context_switch_seconds = round1(hidden_time_seconds(events));

        let linear_typing_edits = count_linear_edits(events);
        let linear_typing_ratio = if edit_count > 0 {
            round2(linear_typing_edits as f64 / edit_count as f64)
        } else {
            0.0
        };

        let ai_prompts = collect_ai_prompts(events);
        let paste_events = collect_paste_events(events);

        MetricsSnapshot {
            total_time_seconds,
            edit_count,
            run_count,
            refine_cycles,
            edits_per_run,
            linear_typing_ratio,
            linear_typing_edits,
            ai_usage_count,
            context_switch_seconds,
            large_paste_count,
            ai_prompts,
            paste_events,
        }
    }
}

/// Elapsed time between the first and last event, in seconds
fn elapsed_seconds(events: &[TelemetryEvent]) -> f64 {
    match (events.first(), events.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
        }
        _ => 0.0,
    }
}

/// Count events of one type
fn count_events(events: &[TelemetryEvent], event_type: TelemetryEventType) -> u32 {
    events.iter().filter(|e| e.event_type == event_type).count() as u32
}

/// Edit/run tracker state: which of the two tracked event types came last
///
/// Only `code_edit` and `code_run` events move this machine; every other
/// event type leaves it untouched, so an edit still counts as a refine cycle
/// when AI usage or tab switches sit between the run and the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditRunState {
    Idle,
    AfterEdit,
    AfterRun,
}

/// Count run-then-edit transitions (iterative fix-and-retest cycles)
fn count_refine_cycles(events: &[TelemetryEvent]) -> u32 {
    let mut state = EditRunState::Idle;
    let mut cycles = 0;

    for event in events {
        match event.event_type {
            TelemetryEventType::CodeEdit => {
                if state == EditRunState::AfterRun {
                    cycles += 1;
                }
                state = EditRunState::AfterEdit;
            }
            TelemetryEventType::CodeRun => {
                state = EditRunState::AfterRun;
            }
            _ => {}
        }
    }

    cycles
}

/// Focus tracker state: whether the tab is currently hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusState {
    Visible,
    Hidden(DateTime<Utc>),
}

/// Total time spent in matched hidden→visible intervals, in seconds
///
/// A repeated `tab_hidden` resets the open interval to the newer timestamp
/// (last-write-wins); a trailing `tab_hidden` with no closing `tab_visible`
/// contributes nothing, and a `tab_visible` with no open interval is ignored.
fn hidden_time_seconds(events: &[TelemetryEvent]) -> f64 {
    let mut state = FocusState::Visible;
    let mut total = 0.0;

    for event in events {
        match event.event_type {
            TelemetryEventType::TabHidden => {
                state = FocusState::Hidden(event.timestamp);
            }
            TelemetryEventType::TabVisible => {
                if let FocusState::Hidden(hidden_start) = state {
                    total += (event.timestamp - hidden_start).num_milliseconds() as f64 / 1000.0;
                    state = FocusState::Visible;
                }
            }
            _ => {}
        }
    }

    total
}

/// Count edits whose `chars_added` falls in the linear-typing range
fn count_linear_edits(events: &[TelemetryEvent]) -> u32 {
    events
        .iter()
        .filter(|e| e.event_type == TelemetryEventType::CodeEdit)
        .filter_map(|e| e.edit_metadata())
        .filter(|m| (LINEAR_EDIT_MIN_CHARS..=LINEAR_EDIT_MAX_CHARS).contains(&m.chars_added))
        .count() as u32
}

/// Collect non-empty AI prompts in log order
fn collect_ai_prompts(events: &[TelemetryEvent]) -> Vec<AiPromptRecord> {
    events
        .iter()
        .filter(|e| e.event_type == TelemetryEventType::AiUsed)
        .filter_map(|e| {
            let meta = e.ai_metadata()?;
            if meta.prompt.is_empty() {
                return None;
            }
            Some(AiPromptRecord {
                prompt: meta.prompt,
                timestamp: e.timestamp,
            })
        })
        .collect()
}

/// Collect large pastes with their previews in log order
fn collect_paste_events(events: &[TelemetryEvent]) -> Vec<PasteRecord> {
    events
        .iter()
        .filter(|e| e.event_type == TelemetryEventType::LargePaste)
        .filter_map(|e| {
            let meta = e.paste_metadata()?;
            Some(PasteRecord {
                chars_added: meta.chars_added,
                content_preview: meta.content_preview,
                timestamp: e.timestamp,
            })
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
