//! Unified error type.

use std::fmt;

/// The error type returned by the listener side of this crate.
///
/// Request-level failures (a body that does not parse, an unknown path)
/// are expressed as HTTP [`Response`](crate::Response) values and never
/// reach this type. `Error` surfaces infrastructure faults only: binding
/// a port, accepting a connection, or a listener task dying.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}
