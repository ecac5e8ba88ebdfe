//! Event log adapter
//!
//! Parses telemetry event logs from JSON into typed events and checks the
//! ordering guarantee the compute core relies on. The strict parsers fail on
//! the first bad record; the lossy NDJSON parser skips bad lines and reports
//! them, for callers that prefer to ignore unrecognized telemetry.

use crate::error::ProfileError;
use crate::types::TelemetryEvent;

/// Adapter for parsing telemetry event logs
pub struct EventLogAdapter;

impl EventLogAdapter {
    /// Parse a JSON string containing an array of telemetry events
    pub fn parse_array(json: &str) -> Result<Vec<TelemetryEvent>, ProfileError> {
        let events: Vec<TelemetryEvent> = serde_json::from_str(json)?;
        Ok(events)
    }

    /// Parse NDJSON (newline-delimited JSON) containing telemetry events
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<TelemetryEvent>, ProfileError> {
        let mut events = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<TelemetryEvent>(trimmed) {
                Ok(event) => events.push(event),
                Err(e) => {
                    return Err(ProfileError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(events)
    }

    /// Parse NDJSON, skipping lines that do not parse as telemetry events
    ///
    /// Returns the parsed events plus a report of skipped lines. Events with
    /// unrecognized `event_type` strings end up here rather than in the log.
    pub fn parse_ndjson_lossy(ndjson: &str) -> (Vec<TelemetryEvent>, Vec<SkippedLine>) {
        let mut events = Vec::new();
        let mut skipped = Vec::new();

        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<TelemetryEvent>(trimmed) {
                Ok(event) => events.push(event),
                Err(e) => skipped.push(SkippedLine {
                    line: line_num + 1,
                    reason: e.to_string(),
                }),
            }
        }

        (events, skipped)
    }

    /// Check that events are in ascending timestamp order
    ///
    /// The compute core assumes the ordering and does not sort; this lets a
    /// caller verify the guarantee before handing a log over.
    pub fn check_ordering(events: &[TelemetryEvent]) -> Result<(), ProfileError> {
        for (idx, pair) in events.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(ProfileError::OutOfOrder(format!(
                    "event {} precedes event {} in time",
                    idx + 1,
                    idx
                )));
            }
        }
        Ok(())
    }
}

/// A line the lossy parser could not turn into a telemetry event
#[derive(Debug, Clone)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line: usize,
    /// Parser error message
    pub reason: String,
}
