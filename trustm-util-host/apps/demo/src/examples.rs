// Licensed under the Apache-2.0 license

//! Example chip operations
//!
//! Each example runs a short command sequence on the open session and
//! reports a pass/fail status. A failing example does not stop the others.

use log::{error, info};
use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use trustm_util_host::{ChipResult, CommandSession, ObjectId, WriteMode};
use trustm_util_host_command_types::{
    CommandError, EccCurve, KeyUsage, PublicKeyAlgorithm, PublicKeySource, RngType,
    RsaEncryptionScheme, RsaKeyType,
};
use trustm_util_host_commands::api::{
    trustm_cmd_ecc_generate_keypair, trustm_cmd_ecdh, trustm_cmd_get_random,
    trustm_cmd_rsa_decrypt_and_export, trustm_cmd_rsa_encrypt_message,
    trustm_cmd_rsa_encrypt_session, trustm_cmd_rsa_generate_keypair, trustm_cmd_tls_prf_sha256,
    trustm_cmd_write_data,
};

pub type ExampleFn = fn(&mut dyn CommandSession) -> ChipResult<()>;

/// Examples in the order they run
pub const EXAMPLES: [(&str, ExampleFn); 4] = [
    ("tls_prf_sha256", example_tls_prf_sha256),
    ("ecdh", example_ecdh),
    ("rsa_encrypt_session", example_rsa_encrypt_session),
    ("rsa_decrypt_and_export", example_rsa_decrypt_and_export),
];

const PRF_SECRET_LEN: usize = 48;
const PRF_LABEL: &[u8] = b"Firmware update";
const DERIVED_KEY_LEN: u16 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleOutcome {
    pub name: &'static str,
    pub passed: bool,
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

fn host_peer_public_key() -> Vec<u8> {
    SigningKey::random(&mut OsRng)
        .verifying_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec()
}

/// Store a shared secret in a data object and derive a key from it
pub fn example_tls_prf_sha256(session: &mut dyn CommandSession) -> ChipResult<()> {
    let mut secret = trustm_cmd_get_random(session, RngType::Trng, 32)?;
    secret.extend(trustm_cmd_get_random(session, RngType::Trng, 16)?);
    expect_len(&secret, PRF_SECRET_LEN)?;

    trustm_cmd_write_data(
        session,
        ObjectId::APPLICATION_DATA_1,
        0,
        WriteMode::EraseAndWrite,
        &secret,
    )?;

    let seed = trustm_cmd_get_random(session, RngType::Trng, 32)?;
    let derived = trustm_cmd_tls_prf_sha256(
        session,
        ObjectId::APPLICATION_DATA_1,
        PRF_LABEL,
        &seed,
        DERIVED_KEY_LEN,
        true,
    )?
    .ok_or(CommandError::InvalidResponse)?;
    expect_len(&derived, DERIVED_KEY_LEN as usize)
}

/// Ephemeral key pair in the session context, shared secret exported
pub fn example_ecdh(session: &mut dyn CommandSession) -> ChipResult<()> {
    trustm_cmd_ecc_generate_keypair(
        session,
        EccCurve::NistP256,
        KeyUsage::KEY_AGREEMENT,
        ObjectId::SESSION_CONTEXT,
        false,
    )?;

    let secret = trustm_cmd_ecdh(
        session,
        EccCurve::NistP256,
        ObjectId::SESSION_CONTEXT,
        &host_peer_public_key(),
        true,
    )?
    .ok_or(CommandError::InvalidResponse)?;
    expect_len(&secret, 32)
}

/// Encrypt a secret that never leaves the chip with a host RSA key
pub fn example_rsa_encrypt_session(session: &mut dyn CommandSession) -> ChipResult<()> {
    trustm_cmd_ecc_generate_keypair(
        session,
        EccCurve::NistP256,
        KeyUsage::KEY_AGREEMENT,
        ObjectId::SESSION_CONTEXT,
        false,
    )?;
    trustm_cmd_ecdh(
        session,
        EccCurve::NistP256,
        ObjectId::SESSION_CONTEXT,
        &host_peer_public_key(),
        false,
    )?;

    let key_type = RsaKeyType::Rsa1024Exp;
    let public_key = trustm_cmd_rsa_generate_keypair(
        session,
        key_type,
        KeyUsage::ENCRYPTION,
        ObjectId::RSA_PRIVATE_KEY_1,
    )?;
    let ciphertext = trustm_cmd_rsa_encrypt_session(
        session,
        RsaEncryptionScheme::Pkcs1V15,
        PublicKeySource::Host {
            algorithm: PublicKeyAlgorithm::Rsa(key_type),
            key: public_key,
        },
        ObjectId::SESSION_CONTEXT,
    )?;
    expect_len(&ciphertext, key_type.modulus_len())
}

/// Encrypt on the host side, decrypt with the chip's key and compare
pub fn example_rsa_decrypt_and_export(session: &mut dyn CommandSession) -> ChipResult<()> {
    let key_type = RsaKeyType::Rsa1024Exp;
    let public_key = trustm_cmd_rsa_generate_keypair(
        session,
        key_type,
        KeyUsage::ENCRYPTION,
        ObjectId::RSA_PRIVATE_KEY_2,
    )?;

    let message = trustm_cmd_get_random(session, RngType::Trng, 48)?;
    let ciphertext = trustm_cmd_rsa_encrypt_message(
        session,
        RsaEncryptionScheme::Pkcs1V15,
        PublicKeySource::Host {
            algorithm: PublicKeyAlgorithm::Rsa(key_type),
            key: public_key,
        },
        &message,
    )?;

    let plaintext = trustm_cmd_rsa_decrypt_and_export(
        session,
        RsaEncryptionScheme::Pkcs1V15,
        ObjectId::RSA_PRIVATE_KEY_2,
        &ciphertext,
    )?;
    if plaintext != message {
        return Err(CommandError::Custom("decrypted message differs").into());
    }
    Ok(())
}

/// Run every example and log its status
pub fn run_examples(session: &mut dyn CommandSession) -> Vec<ExampleOutcome> {
    EXAMPLES
        .iter()
        .map(|&(name, example)| {
            let passed = match example(session) {
                Ok(()) => {
                    info!("Example {}: passed", name);
                    true
                }
                Err(err) => {
                    error!("Example {}: failed ({})", name, err);
                    false
                }
            };
            ExampleOutcome { name, passed }
        })
        .collect()
}
