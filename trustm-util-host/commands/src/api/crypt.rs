// Licensed under the Apache-2.0 license

//! Cryptographic API functions
//!
//! Random numbers and hashing:
//! - `trustm_cmd_get_random` - Random bytes from the chip RNG
//! - `trustm_cmd_hash_sha256` - SHA-256 computed by the chip
//!
//! ECC operations:
//! - `trustm_cmd_ecc_generate_keypair` - Generate a key pair in a key slot
//! - `trustm_cmd_ecdsa_sign` - Sign a digest with a stored private key
//! - `trustm_cmd_ecdsa_verify` - Verify a signature on the chip
//! - `trustm_cmd_ecdh` - Derive a shared secret
//!
//! RSA operations:
//! - `trustm_cmd_rsa_generate_keypair`
//! - `trustm_cmd_rsa_sign` / `trustm_cmd_rsa_verify`
//! - `trustm_cmd_rsa_encrypt_message` / `trustm_cmd_rsa_encrypt_session`
//! - `trustm_cmd_rsa_decrypt_and_export`
//!
//! Key derivation:
//! - `trustm_cmd_tls_prf_sha256`

use crate::api::{ChipApiError, ChipResult, CommandSession};
use alloc::vec::Vec;
use log::debug;
use trustm_util_host_command_types::{
    ChipCommand, CommandError, EccCurve, HashAlgorithm, KeyUsage, ObjectId, PublicKeySource,
    RngType, RsaEncryptionScheme, RsaKeyType, RsaSignatureScheme, MAX_RANDOM_LEN, MIN_RANDOM_LEN,
    SHA256_DIGEST_LEN,
};

/// Key pair returned by a generate command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedKeyPair {
    /// Uncompressed SEC1 point (ECC) or public key encoding (RSA)
    pub public_key: Vec<u8>,
    /// Present only when the private key was exported
    pub private_key: Option<Vec<u8>>,
}

fn expect_len(data: &[u8], expected: usize) -> ChipResult<()> {
    if data.len() != expected {
        return Err(CommandError::InvalidResponseLength {
            expected,
            actual: data.len(),
        }
        .into());
    }
    Ok(())
}

fn check_digest(digest: &[u8]) -> ChipResult<()> {
    if digest.len() != SHA256_DIGEST_LEN {
        return Err(ChipApiError::InvalidParameter("digest must be 32 bytes"));
    }
    Ok(())
}

/// Get `length` random bytes from the chip
///
/// # Parameters
///
/// - `session`: Open chip session
/// - `rng`: TRNG or DRNG
/// - `length`: Number of bytes, 8 to 256
///
/// # Returns
///
/// - `Ok(Vec<u8>)` containing exactly `length` bytes
/// - `Err(ChipApiError)` on failure
pub fn trustm_cmd_get_random(
    session: &mut dyn CommandSession,
    rng: RngType,
    length: u16,
) -> ChipResult<Vec<u8>> {
    if !(MIN_RANDOM_LEN..=MAX_RANDOM_LEN).contains(&length) {
        return Err(ChipApiError::InvalidParameter("random length out of range"));
    }
    let random = session.execute(ChipCommand::GetRandom { rng, length })?;
    expect_len(&random, length as usize)?;
    Ok(random)
}

/// Compute SHA-256 of `data` on the chip
pub fn trustm_cmd_hash_sha256(
    session: &mut dyn CommandSession,
    data: &[u8],
) -> ChipResult<[u8; SHA256_DIGEST_LEN]> {
    let response = session.execute(ChipCommand::CalcHash {
        algorithm: HashAlgorithm::Sha256,
        data: data.to_vec(),
    })?;
    expect_len(&response, SHA256_DIGEST_LEN)?;

    let mut digest = [0u8; SHA256_DIGEST_LEN];
    digest.copy_from_slice(&response);
    Ok(digest)
}

/// Generate an ECC key pair into `key`
///
/// The response holds the public key, followed by the private key when
/// `export_private` is set (in that case `key` is normally the session
/// context).
pub fn trustm_cmd_ecc_generate_keypair(
    session: &mut dyn CommandSession,
    curve: EccCurve,
    usage: KeyUsage,
    key: ObjectId,
    export_private: bool,
) -> ChipResult<GeneratedKeyPair> {
    let mut response = session.execute(ChipCommand::EccGenerateKeyPair {
        curve,
        usage,
        key,
        export_private,
    })?;

    let public_len = curve.public_key_len();
    if response.len() < public_len || (!export_private && response.len() != public_len) {
        return Err(CommandError::InvalidResponseLength {
            expected: public_len,
            actual: response.len(),
        }
        .into());
    }

    let private_key = export_private.then(|| response.split_off(public_len));
    debug!("Generated {:?} key pair in {}", curve, key);
    Ok(GeneratedKeyPair {
        public_key: response,
        private_key,
    })
}

/// Sign a SHA-256 digest with the ECC private key stored in `key`
///
/// # Returns
///
/// - `Ok(Vec<u8>)` containing the DER encoded ECDSA signature
/// - `Err(ChipApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let signature = trustm_cmd_ecdsa_sign(&mut session, ObjectId::ECC_PRIVATE_KEY_1, &digest)?;
/// ```
pub fn trustm_cmd_ecdsa_sign(
    session: &mut dyn CommandSession,
    key: ObjectId,
    digest: &[u8],
) -> ChipResult<Vec<u8>> {
    check_digest(digest)?;
    let signature = session.execute(ChipCommand::EcdsaSign {
        key,
        digest: digest.to_vec(),
    })?;
    if signature.is_empty() {
        return Err(CommandError::InvalidResponse.into());
    }
    Ok(signature)
}

/// Verify a DER ECDSA signature on the chip
///
/// A signature that does not verify is reported by the chip as a device
/// status, see [`ChipApiError::device_status`].
pub fn trustm_cmd_ecdsa_verify(
    session: &mut dyn CommandSession,
    public_key: PublicKeySource,
    digest: &[u8],
    signature: &[u8],
) -> ChipResult<()> {
    check_digest(digest)?;
    session.execute(ChipCommand::EcdsaVerify {
        public_key,
        digest: digest.to_vec(),
        signature: signature.to_vec(),
    })?;
    Ok(())
}

/// ECDH between the private key in `private_key` and a peer public key
///
/// # Returns
///
/// - `Ok(Some(secret))` when `export_shared_secret` is set
/// - `Ok(None)` when the secret stays in the session context
pub fn trustm_cmd_ecdh(
    session: &mut dyn CommandSession,
    curve: EccCurve,
    private_key: ObjectId,
    peer_public_key: &[u8],
    export_shared_secret: bool,
) -> ChipResult<Option<Vec<u8>>> {
    if peer_public_key.len() != curve.public_key_len() {
        return Err(ChipApiError::InvalidParameter("peer public key has wrong length"));
    }
    let secret = session.execute(ChipCommand::Ecdh {
        curve,
        private_key,
        peer_public_key: peer_public_key.to_vec(),
        export_shared_secret,
    })?;
    Ok(export_shared_secret.then_some(secret))
}

/// Generate an RSA key pair into `key`; returns the public key
pub fn trustm_cmd_rsa_generate_keypair(
    session: &mut dyn CommandSession,
    key_type: RsaKeyType,
    usage: KeyUsage,
    key: ObjectId,
) -> ChipResult<Vec<u8>> {
    let public_key = session.execute(ChipCommand::RsaGenerateKeyPair {
        key_type,
        usage,
        key,
        export_private: false,
    })?;
    if public_key.len() < key_type.modulus_len() {
        return Err(CommandError::InvalidResponseLength {
            expected: key_type.modulus_len(),
            actual: public_key.len(),
        }
        .into());
    }
    Ok(public_key)
}

/// RSA PKCS#1 v1.5 signature over a digest with the key stored in `key`
pub fn trustm_cmd_rsa_sign(
    session: &mut dyn CommandSession,
    scheme: RsaSignatureScheme,
    key: ObjectId,
    digest: &[u8],
) -> ChipResult<Vec<u8>> {
    if digest.is_empty() {
        return Err(ChipApiError::InvalidParameter("empty digest"));
    }
    Ok(session.execute(ChipCommand::RsaSign {
        scheme,
        key,
        digest: digest.to_vec(),
    })?)
}

pub fn trustm_cmd_rsa_verify(
    session: &mut dyn CommandSession,
    scheme: RsaSignatureScheme,
    public_key: PublicKeySource,
    digest: &[u8],
    signature: &[u8],
) -> ChipResult<()> {
    session.execute(ChipCommand::RsaVerify {
        scheme,
        public_key,
        digest: digest.to_vec(),
        signature: signature.to_vec(),
    })?;
    Ok(())
}

/// Encrypt a host supplied message with an RSA public key
pub fn trustm_cmd_rsa_encrypt_message(
    session: &mut dyn CommandSession,
    scheme: RsaEncryptionScheme,
    public_key: PublicKeySource,
    message: &[u8],
) -> ChipResult<Vec<u8>> {
    if message.is_empty() {
        return Err(ChipApiError::InvalidParameter("empty message"));
    }
    Ok(session.execute(ChipCommand::RsaEncryptMessage {
        scheme,
        public_key,
        message: message.to_vec(),
    })?)
}

/// Encrypt the secret held in a session context with an RSA public key
pub fn trustm_cmd_rsa_encrypt_session(
    session: &mut dyn CommandSession,
    scheme: RsaEncryptionScheme,
    public_key: PublicKeySource,
    session_context: ObjectId,
) -> ChipResult<Vec<u8>> {
    Ok(session.execute(ChipCommand::RsaEncryptSession {
        scheme,
        public_key,
        session: session_context,
    })?)
}

/// Decrypt with the RSA private key stored in `key` and return the plaintext
pub fn trustm_cmd_rsa_decrypt_and_export(
    session: &mut dyn CommandSession,
    scheme: RsaEncryptionScheme,
    key: ObjectId,
    ciphertext: &[u8],
) -> ChipResult<Vec<u8>> {
    if ciphertext.is_empty() {
        return Err(ChipApiError::InvalidParameter("empty ciphertext"));
    }
    Ok(session.execute(ChipCommand::RsaDecryptAndExport {
        scheme,
        key,
        ciphertext: ciphertext.to_vec(),
    })?)
}

/// Derive key material with the TLS 1.2 PRF (SHA-256)
///
/// # Returns
///
/// - `Ok(Some(key))` of `derived_key_len` bytes when `export` is set
/// - `Ok(None)` when the derived key stays in the session context
pub fn trustm_cmd_tls_prf_sha256(
    session: &mut dyn CommandSession,
    secret: ObjectId,
    label: &[u8],
    seed: &[u8],
    derived_key_len: u16,
    export: bool,
) -> ChipResult<Option<Vec<u8>>> {
    if derived_key_len == 0 {
        return Err(ChipApiError::InvalidParameter("derived key length must be non-zero"));
    }
    let derived = session.execute(ChipCommand::TlsPrfSha256 {
        secret,
        label: label.to_vec(),
        seed: seed.to_vec(),
        derived_key_len,
        export,
    })?;
    if !export {
        return Ok(None);
    }
    expect_len(&derived, derived_key_len as usize)?;
    Ok(Some(derived))
}
