//! Event records accepted by the encoder.
//!
//! Records come in as a JSON array. Dates stay as strings here and are
//! parsed by the encoder, so a malformed date is reported against the
//! event that carries it instead of failing the whole decode.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{IcsError, IcsResult};

/// An all-day event with inclusive start and end dates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// First day of the event, `YYYY-MM-DD`
    pub start: String,
    /// Last day of the event (inclusive), `YYYY-MM-DD`
    pub end: String,
    #[serde(default)]
    pub description: String,
}

impl EventRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        EventRecord {
            id: id.into(),
            title: title.into(),
            start: start.into(),
            end: end.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Decode a JSON array of event records.
pub fn decode_events(bytes: &[u8]) -> IcsResult<Vec<EventRecord>> {
    serde_json::from_slice(bytes).map_err(|e| IcsError::Decode(e.to_string()))
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Returns a human-readable reason on failure.
pub fn parse_event_date(value: &str) -> Result<NaiveDate, String> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err("expected YYYY-MM-DD".to_string());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| e.to_string())
}
