// Licensed under the Apache-2.0 license

//! Host crypto error types

use core::fmt;

pub type CryptoResult<T> = Result<T, CryptoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Certificate could not be parsed
    InvalidCertificate,
    /// Certificate was not issued by the given CA
    IssuerMismatch,
    /// Signature or key algorithm is not supported
    UnsupportedAlgorithm,
    /// Public key is not a valid curve point
    InvalidPublicKey,
    /// Signature is not a valid DER ECDSA signature
    InvalidSignature,
    /// Signature does not verify
    VerificationFailed,
    /// Random number generator failure
    RandomFailure,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidCertificate => write!(f, "Invalid certificate"),
            CryptoError::IssuerMismatch => write!(f, "Certificate issuer does not match CA"),
            CryptoError::UnsupportedAlgorithm => write!(f, "Unsupported algorithm"),
            CryptoError::InvalidPublicKey => write!(f, "Invalid public key"),
            CryptoError::InvalidSignature => write!(f, "Invalid signature encoding"),
            CryptoError::VerificationFailed => write!(f, "Signature verification failed"),
            CryptoError::RandomFailure => write!(f, "Random number generation failed"),
        }
    }
}

impl std::error::Error for CryptoError {}
