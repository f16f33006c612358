// Licensed under the Apache-2.0 license

//! Chip authentication
//!
//! Proves that the chip holds the private key certified by a trusted CA:
//! read the device certificate, verify it against the trust anchor, then
//! have the chip sign a fresh host challenge and check the signature with
//! the certified public key. The first failing step aborts the protocol.

use crate::api::crypt::trustm_cmd_ecdsa_sign;
use crate::api::util::trustm_cmd_read_data;
use crate::api::{ChipApiError, ChipResult, CommandSession};
use alloc::vec::Vec;
use log::{debug, error, info};
use trustm_util_host_command_types::{
    unwrap_certificate, DataObjectRef, ObjectId, CHALLENGE_LEN, MAX_CERTIFICATE_LEN,
};
use trustm_util_host_crypto::HostCrypto;

/// Objects used during authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationConfig {
    /// Object holding the device certificate
    pub certificate_oid: ObjectId,
    /// Key slot holding the private key matching the certificate
    pub private_key_oid: ObjectId,
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            certificate_oid: ObjectId::DEVICE_CERTIFICATE,
            private_key_oid: ObjectId::ECC_PRIVATE_KEY_1,
        }
    }
}

/// Result of a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedChip {
    /// DER device certificate
    pub certificate: Vec<u8>,
    /// Subject public key of the device certificate
    pub public_key: Vec<u8>,
}

/// Read the device certificate and return it as DER
///
/// TLS identity objects are unwrapped; other non-DER formats fail with
/// [`ChipApiError::UnsupportedFormat`].
pub fn trustm_cmd_fetch_chip_certificate(
    session: &mut dyn CommandSession,
    certificate_oid: ObjectId,
) -> ChipResult<Vec<u8>> {
    let blob = trustm_cmd_read_data(
        session,
        DataObjectRef::whole(certificate_oid, MAX_CERTIFICATE_LEN),
    )?;
    let tag = blob.first().copied().unwrap_or_default();
    let certificate = unwrap_certificate(blob)?;
    debug!(
        "Certificate {} (tag 0x{:02X}): {} bytes of DER",
        certificate_oid,
        tag,
        certificate.len()
    );
    Ok(certificate)
}

/// Have the chip sign a random challenge and verify it on the host
pub fn trustm_cmd_challenge_response(
    session: &mut dyn CommandSession,
    crypto: &mut dyn HostCrypto,
    public_key: &[u8],
    private_key_oid: ObjectId,
) -> ChipResult<()> {
    let mut challenge = [0u8; CHALLENGE_LEN];
    crypto.random(&mut challenge)?;
    let digest = crypto.sha256(&challenge)?;

    let signature = trustm_cmd_ecdsa_sign(session, private_key_oid, &digest)?;

    crypto
        .verify_signature(public_key, &signature, &digest)
        .map_err(|err| {
            error!("Challenge signature rejected: {}", err);
            ChipApiError::VerificationFailed
        })
}

/// Authenticate the chip against `trust_anchor` (DER CA certificate)
///
/// # Parameters
///
/// - `session`: Open chip session
/// - `crypto`: Host crypto library
/// - `trust_anchor`: DER certificate of the CA that issued the device certificate
/// - `config`: Certificate and private key objects to use
///
/// # Returns
///
/// - `Ok(AuthenticatedChip)` holding the verified certificate and its public key
/// - `Err(ChipApiError::UnsupportedFormat)` if the certificate object is not DER or a TLS identity
/// - `Err(ChipApiError::VerificationFailed)` if the certificate or the challenge signature does not verify
/// - `Err(ChipApiError::Session)` if a chip command fails
///
/// # Example
///
/// ```ignore
/// let mut crypto = RustCryptoProvider::new();
/// let chip = trustm_cmd_authenticate_chip(
///     &mut session,
///     &mut crypto,
///     &OPTIGA_TRUST_CA_101,
///     &AuthenticationConfig::default(),
/// )?;
/// ```
pub fn trustm_cmd_authenticate_chip(
    session: &mut dyn CommandSession,
    crypto: &mut dyn HostCrypto,
    trust_anchor: &[u8],
    config: &AuthenticationConfig,
) -> ChipResult<AuthenticatedChip> {
    crypto.init()?;

    let certificate = trustm_cmd_fetch_chip_certificate(session, config.certificate_oid)?;

    crypto
        .verify_certificate(trust_anchor, &certificate)
        .map_err(|err| {
            error!("Device certificate rejected: {}", err);
            ChipApiError::VerificationFailed
        })?;

    let public_key = crypto.public_key(&certificate)?;

    trustm_cmd_challenge_response(session, crypto, &public_key, config.private_key_oid)?;

    info!("Chip authenticated");
    Ok(AuthenticatedChip {
        certificate,
        public_key,
    })
}
