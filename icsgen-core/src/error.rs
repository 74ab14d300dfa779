//! Error types for icsgen.

use std::fmt;

use thiserror::Error;

/// Which date of an event failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Start => f.write_str("start"),
            DateField::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur while decoding or encoding events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcsError {
    /// The payload did not match the event shape; holds the serde message
    #[error("{0}")]
    Decode(String),

    #[error("invalid {field} date for event {id}: {value:?} ({reason})")]
    DateParse {
        id: String,
        field: DateField,
        value: String,
        reason: String,
    },
}

/// Result type alias for icsgen operations.
pub type IcsResult<T> = Result<T, IcsError>;
