//! Core types for icsgen.
//!
//! This crate turns a list of all-day [`EventRecord`]s into an iCalendar
//! (RFC 5545) document:
//! - `event` holds the input record and JSON batch decoding
//! - `ics` holds the [`Encoder`], built on the `icalendar` crate
//! - `clock` provides the time source for DTSTAMP/CREATED/LAST-MODIFIED

pub mod clock;
pub mod error;
pub mod event;
pub mod ics;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DateField, IcsError, IcsResult};
pub use event::{EventRecord, decode_events, parse_event_date};
pub use ics::{Encoder, generate_ics};
