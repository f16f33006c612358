// Licensed under the Apache-2.0 license

//! Command Error Types
//!
//! Error definitions for building commands and decoding chip responses

/// Command processing errors
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Invalid request data
    InvalidRequest,

    /// Invalid response data
    InvalidResponse,

    /// Response data has the wrong size for its record
    InvalidResponseLength { expected: usize, actual: usize },

    /// Certificate blob starts with a tag that is not understood
    UnsupportedCertificateFormat(u8),

    /// Certificate blob is shorter than its wrapping header
    CertificateTooShort,

    /// Buffer too small for operation
    BufferTooSmall,

    /// Custom error message (static string only)
    Custom(&'static str),
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::InvalidRequest => write!(f, "Invalid request"),
            CommandError::InvalidResponse => write!(f, "Invalid response"),
            CommandError::InvalidResponseLength { expected, actual } => write!(
                f,
                "Invalid response length: expected {} bytes, got {}",
                expected, actual
            ),
            CommandError::UnsupportedCertificateFormat(tag) => {
                write!(f, "Unsupported certificate format (tag 0x{:02X})", tag)
            }
            CommandError::CertificateTooShort => write!(f, "Certificate blob too short"),
            CommandError::BufferTooSmall => write!(f, "Buffer too small"),
            CommandError::Custom(msg) => write!(f, "Command error: {}", msg),
        }
    }
}

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;
