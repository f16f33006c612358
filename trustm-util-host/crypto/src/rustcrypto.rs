// Licensed under the Apache-2.0 license

//! RustCrypto implementation of [`HostCrypto`]

use crate::error::{CryptoError, CryptoResult};
use crate::HostCrypto;
use der::asn1::ObjectIdentifier;
use der::{Decode, Encode};
use ecdsa::signature::hazmat::PrehashVerifier;
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha384};
use x509_cert::Certificate;

const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");

const P256_PUBLIC_KEY_LEN: usize = 65;
const P384_PUBLIC_KEY_LEN: usize = 97;

/// [`HostCrypto`] backed by `x509-cert`, `p256`/`p384` and the OS RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    pub fn new() -> Self {
        Self
    }
}

fn parse_certificate(der: &[u8]) -> CryptoResult<Certificate> {
    Certificate::from_der(der).map_err(|err| {
        debug!("Certificate parse failed: {}", err);
        CryptoError::InvalidCertificate
    })
}

fn subject_public_key(cert: &Certificate) -> &[u8] {
    cert.tbs_certificate
        .subject_public_key_info
        .subject_public_key
        .raw_bytes()
}

/// Verify a DER ECDSA signature over `digest`, choosing the curve from the
/// length of the SEC1 public key.
pub fn verify_ecdsa_prehash(public_key: &[u8], signature: &[u8], digest: &[u8]) -> CryptoResult<()> {
    match public_key.len() {
        P256_PUBLIC_KEY_LEN => {
            let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                .map_err(|_| CryptoError::InvalidPublicKey)?;
            let signature = p256::ecdsa::Signature::from_der(signature)
                .map_err(|_| CryptoError::InvalidSignature)?;
            key.verify_prehash(digest, &signature)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        P384_PUBLIC_KEY_LEN => {
            let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                .map_err(|_| CryptoError::InvalidPublicKey)?;
            let signature = p384::ecdsa::Signature::from_der(signature)
                .map_err(|_| CryptoError::InvalidSignature)?;
            key.verify_prehash(digest, &signature)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        _ => Err(CryptoError::UnsupportedAlgorithm),
    }
}

impl HostCrypto for RustCryptoProvider {
    fn random(&mut self, buffer: &mut [u8]) -> CryptoResult<()> {
        OsRng
            .try_fill_bytes(buffer)
            .map_err(|_| CryptoError::RandomFailure)
    }

    fn sha256(&mut self, data: &[u8]) -> CryptoResult<[u8; 32]> {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(data));
        Ok(digest)
    }

    fn verify_certificate(&mut self, ca_cert: &[u8], cert: &[u8]) -> CryptoResult<()> {
        let issuer = parse_certificate(ca_cert)?;
        let subject = parse_certificate(cert)?;

        if subject.tbs_certificate.issuer != issuer.tbs_certificate.subject {
            return Err(CryptoError::IssuerMismatch);
        }

        let tbs = subject
            .tbs_certificate
            .to_der()
            .map_err(|_| CryptoError::InvalidCertificate)?;
        let algorithm = subject.signature_algorithm.oid;
        let digest = if algorithm == ECDSA_WITH_SHA256 {
            Sha256::digest(&tbs).to_vec()
        } else if algorithm == ECDSA_WITH_SHA384 {
            Sha384::digest(&tbs).to_vec()
        } else {
            debug!("Unsupported certificate signature algorithm {}", algorithm);
            return Err(CryptoError::UnsupportedAlgorithm);
        };
        let signature = subject
            .signature
            .as_bytes()
            .ok_or(CryptoError::InvalidSignature)?;

        verify_ecdsa_prehash(subject_public_key(&issuer), signature, &digest)
    }

    fn public_key(&mut self, cert: &[u8]) -> CryptoResult<Vec<u8>> {
        let cert = parse_certificate(cert)?;
        Ok(subject_public_key(&cert).to_vec())
    }

    fn verify_signature(
        &mut self,
        public_key: &[u8],
        signature: &[u8],
        digest: &[u8],
    ) -> CryptoResult<()> {
        verify_ecdsa_prehash(public_key, signature, digest)
    }
}
