//! Event normalization.
//!
//! Raw results rows become typed events here: timestamps from the four
//! formats the log has historically contained, correctness from loose
//! boolean tokens, ids canonicalized through the alias table. Rows that
//! fail any field are dropped, never reported; an unreadable log shrinks
//! the event stream rather than aborting it.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::alias::{self, AliasTable};
use crate::error::RowError;
use crate::results::Row;

/// One normalized quiz attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// When the attempt happened.
    pub timestamp: DateTime<Utc>,
    /// Canonical item id (aliases already applied).
    pub item_id: String,
    /// Opaque direction label, e.g. `en-tr`. Not an enumeration: the scorer
    /// looks directions up by string, and unknown labels simply never match.
    pub direction: String,
    /// Whether the answer was correct.
    pub correct: bool,
}

/// One attempt inside a grouped history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    pub at: DateTime<Utc>,
    pub correct: bool,
}

/// Attempt histories keyed by (canonical item id, direction).
///
/// Within a key, attempts are chronological.
pub type EventsByKey = HashMap<(String, String), Vec<Attempt>>;

/// Parse a timestamp in one of the four accepted formats.
///
/// Tried in order; the first matching pattern claims the string, so a
/// claimed-but-invalid value is `None` rather than falling through:
///
/// 1. trailing `Z` or `z`: an absolute instant, `T` or space separated;
/// 2. `YYYY-MM-DD HH:MM:SS[.frac]`, read as UTC;
/// 3. `MM/DD/YYYY HH:MM[:SS]`, read as UTC;
/// 4. a generic fallback: RFC 3339 with a numeric offset, `T`-separated
///    naive date-times (as UTC), or a bare date at midnight UTC.
///
/// Only valid calendar timestamps parse; out-of-range dates never roll over.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.ends_with('Z') || raw.ends_with('z') {
        let stripped = &raw[..raw.len() - 1];
        return ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(stripped, fmt).ok())
            .map(|naive| naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    for fmt in ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(offset.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a loose boolean token, case-insensitive after trimming.
///
/// `true`/`1`/`yes`/`y` and `false`/`0`/`no`/`n`; anything else is `None`.
pub fn parse_correct(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse one results row into an event, or say which field failed.
///
/// Reads the logical columns `timestamp`, `word_id`, `mode`, and `correct`.
/// The returned event carries the raw, un-aliased id.
pub fn parse_row(row: &Row) -> Result<Event, RowError> {
    let raw_timestamp = row.get("timestamp").unwrap_or("");
    let timestamp = parse_timestamp(raw_timestamp)
        .ok_or_else(|| RowError::BadTimestamp(raw_timestamp.to_string()))?;

    let item_id = row.get("word_id").unwrap_or("").trim();
    if item_id.is_empty() {
        return Err(RowError::MissingItemId);
    }

    let direction = row.get("mode").unwrap_or("").trim();
    if direction.is_empty() {
        return Err(RowError::MissingDirection);
    }

    let raw_correct = row.get("correct").unwrap_or("");
    let correct =
        parse_correct(raw_correct).ok_or_else(|| RowError::BadCorrect(raw_correct.to_string()))?;

    Ok(Event {
        timestamp,
        item_id: item_id.to_string(),
        direction: direction.to_string(),
        correct,
    })
}

/// Build the chronological, canonicalized event stream from raw rows.
///
/// Rows that fail to parse are dropped (logged at debug level only). The
/// sort is stable: events with equal timestamps keep their input order.
pub fn event_stream(rows: &[Row], aliases: &AliasTable) -> Vec<Event> {
    let mut events: Vec<Event> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match parse_row(row) {
            Ok(event) => Some(Event {
                item_id: alias::canonical_id(&event.item_id, aliases),
                ..event
            }),
            Err(e) => {
                tracing::debug!("dropping results row {index}: {e}");
                None
            }
        })
        .collect();

    events.sort_by_key(|event| event.timestamp);
    events
}

/// Group events per (canonical item id, direction) in stream order.
///
/// Grouping never re-sorts: feed it the output of [`event_stream`] and each
/// history stays chronological.
pub fn group_by_key(events: &[Event]) -> EventsByKey {
    let mut by_key: EventsByKey = HashMap::new();
    for event in events {
        by_key
            .entry((event.item_id.clone(), event.direction.clone()))
            .or_default()
            .push(Attempt {
                at: event.timestamp,
                correct: event.correct,
            });
    }
    by_key
}
