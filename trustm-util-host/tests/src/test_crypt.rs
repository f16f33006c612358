// Licensed under the Apache-2.0 license

//! Integration tests for the cryptographic commands
//!
//! Parameter validation and response decoding of the crypto API, driven
//! through a ChipSession over the mock transport.

use crate::common::{build_test_pki, test_constants::*, MockChip, MockTransport, VirtualDelay};
use ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::DerSignature;
use sha2::{Digest, Sha256};
use trustm_util_host_command_types::{
    device_status, EccCurve, KeyUsage, ObjectId, PublicKeyAlgorithm,
    PublicKeySource, RngType, RsaEncryptionScheme, RsaKeyType, RsaSignatureScheme,
};
use trustm_util_host_commands::api::*;
use trustm_util_host_session::{ChipSession, SessionError};

macro_rules! open_session {
    ($chip:expr, $transport:ident, $delay:ident, $session:ident) => {
        let mut $transport = MockTransport::new($chip);
        let $delay = VirtualDelay::new();
        let mut $session = ChipSession::new(&mut $transport, &$delay);
        $session.open().expect("Failed to open session");
    };
}

#[test]
fn test_get_random() {
    open_session!(MockChip::new(), transport, delay, session);

    let random = trustm_cmd_get_random(&mut session, RngType::Trng, 32).expect("get random");
    assert_eq!(random.len(), 32);

    for length in [0u16, 7, 257] {
        assert!(
            matches!(
                trustm_cmd_get_random(&mut session, RngType::Drng, length),
                Err(ChipApiError::InvalidParameter(_))
            ),
            "length {} must be refused",
            length
        );
    }
}

#[test]
fn test_hash_sha256() {
    open_session!(MockChip::new(), transport, delay, session);

    let digest = trustm_cmd_hash_sha256(&mut session, b"abc").expect("hash");
    let expected: [u8; 32] = Sha256::digest(b"abc").into();
    assert_eq!(digest, expected);
}

#[test]
fn test_ecdsa_sign_and_verify_on_chip() {
    println!("Signing and verifying on the chip...");
    let pki = build_test_pki();
    let chip = MockChip::new();
    chip.set_signing_key(ObjectId::ECC_PRIVATE_KEY_1, pki.device_key.clone());
    open_session!(chip, transport, delay, session);

    let digest = Sha256::digest(b"firmware image").to_vec();
    let signature =
        trustm_cmd_ecdsa_sign(&mut session, ObjectId::ECC_PRIVATE_KEY_1, &digest).expect("sign");
    println!("Signature: {} bytes", signature.len());

    let public_key = PublicKeySource::Host {
        algorithm: PublicKeyAlgorithm::Ecc(EccCurve::NistP256),
        key: pki.device_public_key(),
    };
    trustm_cmd_ecdsa_verify(&mut session, public_key.clone(), &digest, &signature)
        .expect("verify");

    // Signature by another key must be refused by the chip
    let other: DerSignature = pki.ca_key.sign_prehash(&digest).expect("sign on host");
    let err = trustm_cmd_ecdsa_verify(&mut session, public_key, &digest, other.as_bytes())
        .expect_err("foreign signature must not verify");
    assert_eq!(
        err.device_status(),
        Some(device_status::SIGNATURE_VERIFICATION_FAILURE)
    );
}

#[test]
fn test_ecdsa_sign_requires_sha256_digest() {
    let chip = MockChip::new();
    open_session!(chip.clone(), transport, delay, session);

    assert!(matches!(
        trustm_cmd_ecdsa_sign(&mut session, ObjectId::ECC_PRIVATE_KEY_1, &[0u8; 20]),
        Err(ChipApiError::InvalidParameter(_))
    ));
    assert_eq!(chip.count("ecdsa_sign"), 0);
}

#[test]
fn test_ecc_generate_keypair() {
    open_session!(MockChip::new(), transport, delay, session);

    let kept = trustm_cmd_ecc_generate_keypair(
        &mut session,
        EccCurve::NistP256,
        KeyUsage::SIGN.union(KeyUsage::AUTHENTICATION),
        ObjectId::ECC_PRIVATE_KEY_2,
        false,
    )
    .expect("generate key pair");
    assert_eq!(kept.public_key.len(), 65);
    assert_eq!(kept.private_key, None);

    let exported = trustm_cmd_ecc_generate_keypair(
        &mut session,
        EccCurve::NistP384,
        KeyUsage::KEY_AGREEMENT,
        ObjectId::SESSION_CONTEXT,
        true,
    )
    .expect("generate key pair");
    assert_eq!(exported.public_key.len(), 97);
    assert_eq!(exported.private_key, Some(vec![0x11; 32]));
}

#[test]
fn test_ecdh() {
    open_session!(MockChip::new(), transport, delay, session);
    let peer = vec![0x04; EccCurve::NistP256.public_key_len()];

    let secret = trustm_cmd_ecdh(
        &mut session,
        EccCurve::NistP256,
        ObjectId::SESSION_CONTEXT,
        &peer,
        true,
    )
    .expect("ecdh");
    assert_eq!(secret, Some(vec![0x5A; MOCK_SHARED_SECRET_LEN]));

    let kept = trustm_cmd_ecdh(
        &mut session,
        EccCurve::NistP256,
        ObjectId::SESSION_CONTEXT,
        &peer,
        false,
    )
    .expect("ecdh");
    assert_eq!(kept, None);

    assert!(matches!(
        trustm_cmd_ecdh(
            &mut session,
            EccCurve::NistP384,
            ObjectId::SESSION_CONTEXT,
            &peer,
            true
        ),
        Err(ChipApiError::InvalidParameter(_))
    ));
}

#[test]
fn test_rsa_operations() {
    println!("Running RSA command sequence...");
    let chip = MockChip::new();
    open_session!(chip.clone(), transport, delay, session);

    let public_key = trustm_cmd_rsa_generate_keypair(
        &mut session,
        RsaKeyType::Rsa1024Exp,
        KeyUsage::ENCRYPTION,
        ObjectId::RSA_PRIVATE_KEY_1,
    )
    .expect("generate RSA key");
    assert!(public_key.len() >= 128);

    let source = PublicKeySource::Host {
        algorithm: PublicKeyAlgorithm::Rsa(RsaKeyType::Rsa1024Exp),
        key: public_key,
    };
    let ciphertext = trustm_cmd_rsa_encrypt_message(
        &mut session,
        RsaEncryptionScheme::Pkcs1V15,
        source.clone(),
        b"secret",
    )
    .expect("encrypt message");
    assert_eq!(ciphertext.len(), MOCK_RSA_CIPHERTEXT_LEN);

    let session_ciphertext = trustm_cmd_rsa_encrypt_session(
        &mut session,
        RsaEncryptionScheme::Pkcs1V15,
        source.clone(),
        ObjectId::SESSION_CONTEXT,
    )
    .expect("encrypt session");
    assert_eq!(session_ciphertext.len(), MOCK_RSA_CIPHERTEXT_LEN);

    let plaintext = trustm_cmd_rsa_decrypt_and_export(
        &mut session,
        RsaEncryptionScheme::Pkcs1V15,
        ObjectId::RSA_PRIVATE_KEY_1,
        &ciphertext,
    )
    .expect("decrypt");
    assert_eq!(plaintext, MOCK_RSA_PLAINTEXT.to_vec());

    let digest = Sha256::digest(b"message").to_vec();
    let signature = trustm_cmd_rsa_sign(
        &mut session,
        RsaSignatureScheme::Pkcs1V15Sha256,
        ObjectId::RSA_PRIVATE_KEY_1,
        &digest,
    )
    .expect("RSA sign");
    trustm_cmd_rsa_verify(
        &mut session,
        RsaSignatureScheme::Pkcs1V15Sha256,
        source,
        &digest,
        &signature,
    )
    .expect("RSA verify");

    assert_eq!(
        chip.command_log(),
        vec![
            "open_application",
            "rsa_generate_keypair",
            "rsa_encrypt_message",
            "rsa_encrypt_session",
            "rsa_decrypt_and_export",
            "rsa_sign",
            "rsa_verify",
        ]
    );
}

#[test]
fn test_rsa_parameter_checks() {
    let chip = MockChip::new();
    open_session!(chip.clone(), transport, delay, session);
    let source = PublicKeySource::Object(ObjectId::USER_CERTIFICATE_1);

    assert!(matches!(
        trustm_cmd_rsa_encrypt_message(&mut session, RsaEncryptionScheme::Pkcs1V15, source, &[]),
        Err(ChipApiError::InvalidParameter(_))
    ));
    assert!(matches!(
        trustm_cmd_rsa_decrypt_and_export(
            &mut session,
            RsaEncryptionScheme::Pkcs1V15,
            ObjectId::RSA_PRIVATE_KEY_1,
            &[]
        ),
        Err(ChipApiError::InvalidParameter(_))
    ));
    assert!(matches!(
        trustm_cmd_rsa_sign(
            &mut session,
            RsaSignatureScheme::Pkcs1V15Sha384,
            ObjectId::RSA_PRIVATE_KEY_1,
            &[]
        ),
        Err(ChipApiError::InvalidParameter(_))
    ));
    assert_eq!(chip.command_log(), vec!["open_application"]);
}

#[test]
fn test_tls_prf_sha256() {
    open_session!(MockChip::new(), transport, delay, session);

    let derived = trustm_cmd_tls_prf_sha256(
        &mut session,
        ObjectId::SESSION_CONTEXT,
        b"master secret",
        &[0x61; 32],
        48,
        true,
    )
    .expect("derive key");
    assert_eq!(derived, Some(vec![0x66; 48]));

    let kept = trustm_cmd_tls_prf_sha256(
        &mut session,
        ObjectId::SESSION_CONTEXT,
        b"key expansion",
        &[0x61; 32],
        64,
        false,
    )
    .expect("derive key");
    assert_eq!(kept, None);

    assert!(matches!(
        trustm_cmd_tls_prf_sha256(
            &mut session,
            ObjectId::SESSION_CONTEXT,
            b"label",
            &[],
            0,
            true
        ),
        Err(ChipApiError::InvalidParameter(_))
    ));
}

#[test]
fn test_crypt_command_errors_propagate() {
    let chip = MockChip::new();
    chip.fail_command("get_random", device_status::DEVICE_ERROR);
    chip.fail_command("calc_hash", device_status::INVALID_LENGTH);
    open_session!(chip, transport, delay, session);

    assert_eq!(
        trustm_cmd_get_random(&mut session, RngType::Trng, 16),
        Err(ChipApiError::Session(SessionError::DeviceError(
            device_status::DEVICE_ERROR
        )))
    );
    assert_eq!(
        trustm_cmd_hash_sha256(&mut session, b"data")
            .expect_err("hash must fail")
            .device_status(),
        Some(device_status::INVALID_LENGTH)
    );
}
