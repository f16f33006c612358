// Licensed under the Apache-2.0 license

//! High-level API functions for Trust M commands
//!
//! These functions are transport-agnostic: each takes anything implementing
//! [`CommandSession`], builds the chip command, runs it through the session
//! and decodes the response.

pub mod authenticate;
pub mod crypt;
pub mod provisioning;
pub mod util;

use alloc::string::String;
use trustm_util_host_command_types::CommandError;
use trustm_util_host_crypto::CryptoError;
use trustm_util_host_session::SessionError;

pub use authenticate::*;
pub use crypt::*;
pub use provisioning::*;
pub use trustm_util_host_session::CommandSession;
pub use util::*;

/// High-level result type for API functions
pub type ChipResult<T> = Result<T, ChipApiError>;

/// API-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum ChipApiError {
    /// Session layer failure (instance, rejection, timeout, device status)
    Session(SessionError),
    /// Certificate object uses a format the host cannot read
    UnsupportedFormat(u8),
    /// Certificate chain or challenge signature did not verify
    VerificationFailed,
    /// Host crypto library failure
    Crypto(CryptoError),
    /// Response could not be decoded
    Command(CommandError),
    /// Invalid parameter
    InvalidParameter(&'static str),
    /// Credential provisioning routine failed
    Provisioning(String),
}

impl ChipApiError {
    /// Chip status code, if the chip reported one
    pub fn device_status(&self) -> Option<u16> {
        match self {
            ChipApiError::Session(SessionError::DeviceError(code)) => Some(*code),
            _ => None,
        }
    }
}

impl From<SessionError> for ChipApiError {
    fn from(err: SessionError) -> Self {
        ChipApiError::Session(err)
    }
}

impl From<CommandError> for ChipApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::UnsupportedCertificateFormat(tag) => ChipApiError::UnsupportedFormat(tag),
            other => ChipApiError::Command(other),
        }
    }
}

impl From<CryptoError> for ChipApiError {
    fn from(err: CryptoError) -> Self {
        ChipApiError::Crypto(err)
    }
}

impl core::fmt::Display for ChipApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChipApiError::Session(err) => write!(f, "Session error: {}", err),
            ChipApiError::UnsupportedFormat(tag) => {
                write!(f, "Unsupported certificate format 0x{:02X}", tag)
            }
            ChipApiError::VerificationFailed => write!(f, "Verification failed"),
            ChipApiError::Crypto(err) => write!(f, "Crypto error: {}", err),
            ChipApiError::Command(err) => write!(f, "Command error: {}", err),
            ChipApiError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ChipApiError::Provisioning(msg) => write!(f, "Provisioning failed: {}", msg),
        }
    }
}
