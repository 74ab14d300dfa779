//! ICS document generation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{DateField, IcsError, IcsResult};
use crate::event::{EventRecord, parse_event_date};

/// Domain appended to event ids to form UIDs.
pub const DEFAULT_UID_DOMAIN: &str = "example.com";

/// PRODID written into every calendar.
pub const DEFAULT_PRODUCT_ID: &str = "-//icsgen//icsgen//EN";

/// Last year a `VALUE=DATE` can carry (four digits).
const MAX_DATE_YEAR: i32 = 9999;

/// Encodes event records into a PUBLISH calendar of all-day events.
///
/// The encoder holds no mutable state and can be shared across threads.
#[derive(Clone)]
pub struct Encoder {
    uid_domain: String,
    product_id: String,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("uid_domain", &self.uid_domain)
            .field("product_id", &self.product_id)
            .finish_non_exhaustive()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_uid_domain(mut self, uid_domain: impl Into<String>) -> Self {
        self.uid_domain = uid_domain.into();
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn uid_domain(&self) -> &str {
        &self.uid_domain
    }

    /// Generate a calendar document for `events`, in input order.
    ///
    /// Fails on the first event whose start or end is not a valid
    /// `YYYY-MM-DD` date; nothing is returned for the other events.
    pub fn encode(&self, events: &[EventRecord]) -> IcsResult<String> {
        let mut cal = Calendar::new();
        cal.append_property(Property::new("METHOD", "PUBLISH"));

        for event in events {
            cal.push(self.build_event(event)?);
        }
        let cal = cal.done();

        // Post-process to replace the icalendar crate's PRODID and drop CALSCALE
        let output = self.strip_ics_bloat(&cal.to_string());

        debug!(events = events.len(), bytes = output.len(), "Generated ICS document");

        Ok(output)
    }

    fn build_event(&self, event: &EventRecord) -> IcsResult<icalendar::Event> {
        let start = parse_date(event, DateField::Start, &event.start)?;
        // DTEND of an all-day event is exclusive, input end is inclusive
        let end = parse_date(event, DateField::End, &event.end)?
            .checked_add_days(Days::new(1))
            .filter(|d| d.year() <= MAX_DATE_YEAR)
            .ok_or_else(|| date_error(event, DateField::End, "date out of range"))?;

        let now = format_utc(self.clock.now());

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@{}", event.id, self.uid_domain));
        ics_event.add_property("DTSTAMP", &now);
        ics_event.add_property("CREATED", &now);
        ics_event.add_property("LAST-MODIFIED", &now);
        ics_event.summary(&event.title);
        ics_event.description(&event.description);
        add_date_property(&mut ics_event, "DTSTART", start);
        add_date_property(&mut ics_event, "DTEND", end);

        Ok(ics_event.done())
    }

    /// Clean up ICS output from the icalendar crate
    /// - Replace PRODID with our product id
    /// - Remove CALSCALE:GREGORIAN (it's the default)
    fn strip_ics_bloat(&self, ics: &str) -> String {
        let mut result = String::with_capacity(ics.len());

        for line in ics.lines() {
            if line.starts_with("PRODID:") {
                result.push_str("PRODID:");
                result.push_str(&self.product_id);
                result.push_str("\r\n");
                continue;
            }

            if line == "CALSCALE:GREGORIAN" {
                continue;
            }

            result.push_str(line);
            result.push_str("\r\n");
        }

        result
    }
}

/// Generate a calendar document with the default encoder.
pub fn generate_ics(events: &[EventRecord]) -> IcsResult<String> {
    Encoder::new().encode(events)
}

fn parse_date(event: &EventRecord, field: DateField, value: &str) -> IcsResult<NaiveDate> {
    parse_event_date(value).map_err(|reason| date_error(event, field, reason))
}

fn date_error(event: &EventRecord, field: DateField, reason: impl Into<String>) -> IcsError {
    let value = match field {
        DateField::Start => &event.start,
        DateField::End => &event.end,
    };
    IcsError::DateParse {
        id: event.id.clone(),
        field,
        value: value.clone(),
        reason: reason.into(),
    }
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Add a date-only property (`NAME;VALUE=DATE:YYYYMMDD`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
