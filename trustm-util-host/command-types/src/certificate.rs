// Licensed under the Apache-2.0 license

//! Certificate blob formats
//!
//! The device certificate object is either a bare X.509 DER certificate or a
//! TLS identity: the certificate wrapped in the chain framing of a TLS
//! `Certificate` handshake message.

use crate::error::{CommandError, CommandResult};
use alloc::vec::Vec;

/// Leading byte of a certificate data object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateTag {
    /// Bare DER certificate (ASN.1 SEQUENCE)
    Der,
    /// One-way authentication identity (TLS framing)
    TlsIdentity,
    /// USB Type-C authentication identity
    UsbTypeCIdentity,
    Unknown(u8),
}

impl CertificateTag {
    pub const DER: u8 = 0x30;
    pub const TLS_IDENTITY: u8 = 0xC0;
    pub const USB_TYPE_C_IDENTITY: u8 = 0xC2;
}

impl From<u8> for CertificateTag {
    fn from(tag: u8) -> Self {
        match tag {
            Self::DER => CertificateTag::Der,
            Self::TLS_IDENTITY => CertificateTag::TlsIdentity,
            Self::USB_TYPE_C_IDENTITY => CertificateTag::UsbTypeCIdentity,
            other => CertificateTag::Unknown(other),
        }
    }
}

/// Tag (1) + identity length (2) + chain length (3) + certificate length (3)
pub const TLS_IDENTITY_HEADER_LEN: usize = 9;

/// Return the DER certificate held in a certificate data object.
///
/// DER blobs pass through unchanged. A TLS identity has its 9 byte header
/// removed and the certificate moved to the front of the buffer. Any other
/// tag, including the USB Type-C identity, is rejected.
pub fn unwrap_certificate(mut blob: Vec<u8>) -> CommandResult<Vec<u8>> {
    let first = *blob.first().ok_or(CommandError::CertificateTooShort)?;
    match CertificateTag::from(first) {
        CertificateTag::Der => Ok(blob),
        CertificateTag::TlsIdentity => {
            if blob.len() < TLS_IDENTITY_HEADER_LEN {
                return Err(CommandError::CertificateTooShort);
            }
            blob.drain(..TLS_IDENTITY_HEADER_LEN);
            Ok(blob)
        }
        CertificateTag::UsbTypeCIdentity | CertificateTag::Unknown(_) => {
            Err(CommandError::UnsupportedCertificateFormat(first))
        }
    }
}

/// Frame a DER certificate as a single-certificate TLS identity.
pub fn wrap_tls_identity(certificate: &[u8]) -> CommandResult<Vec<u8>> {
    let cert_len = certificate.len();
    let chain_len = cert_len + 3;
    let identity_len = chain_len + 3;
    if identity_len > u16::MAX as usize {
        return Err(CommandError::BufferTooSmall);
    }

    let mut blob = Vec::with_capacity(TLS_IDENTITY_HEADER_LEN + cert_len);
    blob.push(CertificateTag::TLS_IDENTITY);
    blob.extend_from_slice(&(identity_len as u16).to_be_bytes());
    blob.extend_from_slice(&(chain_len as u32).to_be_bytes()[1..]);
    blob.extend_from_slice(&(cert_len as u32).to_be_bytes()[1..]);
    blob.extend_from_slice(certificate);
    Ok(blob)
}
