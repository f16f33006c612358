// Licensed under the Apache-2.0 license

//! Transport error types
//!
//! These describe why a transport refused to accept a request. Errors the
//! chip reports after accepting a command travel through the completion
//! latch instead.

use trustm_util_host_osal::OsalError;
use core::fmt;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No free instance slot (or other resource) is left
    ResourceExhausted,

    /// The instance handle is unknown to the transport
    InstanceNotFound(u16),

    /// The transport cannot take another request right now
    Busy,

    /// The command is malformed or not supported by this transport
    InvalidCommand(&'static str),

    /// Transport disconnected
    Disconnected,

    /// OSAL error
    OsalError(OsalError),

    /// Custom transport error
    Custom(&'static str),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ResourceExhausted => write!(f, "Transport resources exhausted"),
            TransportError::InstanceNotFound(handle) => {
                write!(f, "Instance {} not found", handle)
            }
            TransportError::Busy => write!(f, "Transport busy"),
            TransportError::InvalidCommand(msg) => write!(f, "Invalid command: {}", msg),
            TransportError::Disconnected => write!(f, "Transport disconnected"),
            TransportError::OsalError(err) => write!(f, "OSAL error: {}", err),
            TransportError::Custom(msg) => write!(f, "Custom error: {}", msg),
        }
    }
}

impl From<OsalError> for TransportError {
    fn from(err: OsalError) -> Self {
        TransportError::OsalError(err)
    }
}
