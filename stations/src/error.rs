use std::{fmt, io};

/// Why a single line could not be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// No `;` delimiter in the line.
    MalformedRecord,
    /// The text after the delimiter is not a floating point number.
    NumberFormat,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MalformedRecord => write!(f, "malformed record: missing ';' delimiter"),
            RecordError::NumberFormat => write!(f, "value is not a valid floating point number"),
        }
    }
}

impl std::error::Error for RecordError {}

/// The table ran out of slots. This is a sizing bug in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub capacity: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aggregation table capacity exceeded: all {} slots are taken, construct it with a larger capacity",
            self.capacity
        )
    }
}

impl std::error::Error for CapacityExceeded {}

#[derive(Debug)]
pub enum AggregateError {
    Io(io::Error),
    Capacity(CapacityExceeded),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Io(e) => write!(f, "reading input: {e}"),
            AggregateError::Capacity(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregateError::Io(e) => Some(e),
            AggregateError::Capacity(e) => Some(e),
        }
    }
}

impl From<io::Error> for AggregateError {
    fn from(e: io::Error) -> Self {
        AggregateError::Io(e)
    }
}

impl From<CapacityExceeded> for AggregateError {
    fn from(e: CapacityExceeded) -> Self {
        AggregateError::Capacity(e)
    }
}
