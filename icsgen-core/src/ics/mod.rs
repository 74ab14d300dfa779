//! ICS document generation.
//!
//! This module writes iCalendar documents according to RFC 5545.

mod generate;

pub use generate::{DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN, Encoder, generate_ics};
