// Licensed under the Apache-2.0 license

//! Error types for OSAL
use core::fmt;

pub type OsalResult<T> = Result<T, OsalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsalError {
    /// Invalid parameter
    InvalidParameter,
    /// Resource not available
    ResourceUnavailable,
    /// Operation interrupted before the delay elapsed
    Interrupted,
    /// Scheduler-specific error code
    Platform(i32),
}

impl fmt::Display for OsalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsalError::InvalidParameter => write!(f, "Invalid parameter"),
            OsalError::ResourceUnavailable => write!(f, "Resource unavailable"),
            OsalError::Interrupted => write!(f, "Operation interrupted"),
            OsalError::Platform(code) => write!(f, "Platform error: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OsalError {}
