// Licensed under the Apache-2.0 license

//! Simulated chip
//!
//! Stands in for the secure element when no hardware is attached. At
//! start-up it creates its own CA and a device certificate for the key in
//! the first ECC key slot, so the authentication flow runs against real
//! P-256 signatures. Operations whose math is not needed by the demo
//! (ECDH, the TLS PRF and RSA) return deterministic placeholder bytes.

use anyhow::{Context, Result};
use der::asn1::UtcTime;
use der::{DateTime, Decode, Encode};
use ecdsa::signature::hazmat::PrehashSigner;
use log::{debug, info};
use p256::ecdsa::{DerSignature, SigningKey};
use p256::pkcs8::EncodePublicKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::str::FromStr;
use trustm_util_host::{ChipCommand, ChipDevice, ObjectId, WriteMode};
use trustm_util_host_command_types::{
    device_status, wrap_tls_identity, EccCurve, PublicKeySource, CHIP_UID_LEN,
};
use trustm_util_host_crypto::rustcrypto::verify_ecdsa_prehash;
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::{Time, Validity};

const CA_NAME: &str = "CN=Simulated Trust Anchor,O=trustm-demo";
const DEVICE_NAME: &str = "CN=Simulated Trust M,O=trustm-demo";

/// UID reported by the simulator (firmware build 0x1118)
const SIMULATED_UID: [u8; CHIP_UID_LEN] = [
    0xCD, 0x16, 0x33, 0x82, 0x01, 0x00, 0x1C, 0x00, 0x05, 0x00, 0x00, 0x0A, 0x09, 0x1B, 0x5C,
    0x00, 0x07, 0x00, 0x74, 0x00, 0x86, 0x80, 0x10, 0x10, 0x71, 0x11, 0x18,
];

/// Length prefix in front of the message inside a placeholder RSA block
const RSA_LENGTH_PREFIX: usize = 2;

pub struct SimulatedChip {
    objects: HashMap<ObjectId, Vec<u8>>,
    ecc_keys: HashMap<ObjectId, SigningKey>,
    rsa_keys: HashMap<ObjectId, Vec<u8>>,
}

fn utc(year: u16) -> Result<Time> {
    let date = DateTime::new(year, 1, 1, 0, 0, 0).context("Invalid certificate date")?;
    Ok(Time::UtcTime(
        UtcTime::from_date_time(date).context("Certificate date out of range")?,
    ))
}

fn issue_certificate(
    serial: u8,
    subject: &str,
    subject_key: &SigningKey,
    issuer: Option<&str>,
    issuer_key: &SigningKey,
) -> Result<Vec<u8>> {
    let public_key = subject_key
        .verifying_key()
        .to_public_key_der()
        .context("Failed to encode public key")?;
    let spki = SubjectPublicKeyInfoOwned::from_der(public_key.as_bytes())
        .context("Failed to parse public key")?;
    let issuer = issuer
        .map(Name::from_str)
        .transpose()
        .context("Invalid issuer name")?;

    let builder = CertificateBuilder::new(
        Profile::Manual { issuer },
        SerialNumber::new(&[serial]).context("Invalid serial number")?,
        Validity {
            not_before: utc(2020)?,
            not_after: utc(2049)?,
        },
        Name::from_str(subject).context("Invalid subject name")?,
        spki,
        issuer_key,
    )
    .context("Failed to create certificate builder")?;

    builder
        .build::<DerSignature>()
        .context("Failed to sign certificate")?
        .to_der()
        .context("Failed to encode certificate")
}

/// Deterministic byte expansion standing in for real key material
fn expand(parts: &[&[u8]], len: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(len);
    let mut counter = 0u32;
    while output.len() < len {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.update(counter.to_be_bytes());
        output.extend_from_slice(&hasher.finalize());
        counter += 1;
    }
    output.truncate(len);
    output
}

fn xor_in_place(block: &mut [u8], keystream: &[u8]) {
    for (byte, key) in block.iter_mut().zip(keystream) {
        *byte ^= key;
    }
}

impl SimulatedChip {
    /// Create a chip with a freshly issued device certificate.
    ///
    /// Returns the chip and the DER certificate of the CA that issued the
    /// device certificate, to be used as the trust anchor.
    pub fn generate() -> Result<(Self, Vec<u8>)> {
        let ca_key = SigningKey::random(&mut OsRng);
        let device_key = SigningKey::random(&mut OsRng);

        let trust_anchor = issue_certificate(1, CA_NAME, &ca_key, None, &ca_key)?;
        let device_certificate =
            issue_certificate(2, DEVICE_NAME, &device_key, Some(CA_NAME), &ca_key)?;
        info!(
            "Simulated chip provisioned with a {} byte device certificate",
            device_certificate.len()
        );

        let identity = wrap_tls_identity(&device_certificate)
            .map_err(|err| anyhow::anyhow!("Failed to wrap device certificate: {}", err))?;

        let mut chip = Self {
            objects: HashMap::new(),
            ecc_keys: HashMap::new(),
            rsa_keys: HashMap::new(),
        };
        chip.objects.insert(ObjectId::COPROCESSOR_UID, SIMULATED_UID.to_vec());
        chip.objects.insert(ObjectId::DEVICE_CERTIFICATE, identity);
        chip.ecc_keys.insert(ObjectId::ECC_PRIVATE_KEY_1, device_key);

        Ok((chip, trust_anchor))
    }

    fn object(&self, object_id: ObjectId) -> Result<&Vec<u8>, u16> {
        self.objects
            .get(&object_id)
            .ok_or(device_status::INVALID_OBJECT_ID)
    }

    fn ecc_key(&self, key: ObjectId) -> Result<&SigningKey, u16> {
        self.ecc_keys
            .get(&key)
            .ok_or(device_status::INVALID_OBJECT_ID)
    }

    fn rsa_public_key(&self, source: &PublicKeySource) -> Result<Vec<u8>, u16> {
        match source {
            PublicKeySource::Host { key, .. } => Ok(key.clone()),
            PublicKeySource::Object(_) => Err(device_status::INVALID_PARAMETER),
        }
    }

    /// Placeholder RSA: a length-prefixed block masked with a keystream
    /// derived from the public key. Only decryptable by this simulator.
    fn rsa_encrypt(public_key: &[u8], message: &[u8]) -> Result<Vec<u8>, u16> {
        if message.len() + RSA_LENGTH_PREFIX > public_key.len() {
            return Err(device_status::INVALID_LENGTH);
        }
        let mut block = vec![0u8; public_key.len()];
        block[..RSA_LENGTH_PREFIX].copy_from_slice(&(message.len() as u16).to_be_bytes());
        block[RSA_LENGTH_PREFIX..RSA_LENGTH_PREFIX + message.len()].copy_from_slice(message);
        xor_in_place(&mut block, &expand(&[public_key], public_key.len()));
        Ok(block)
    }

    fn rsa_decrypt(public_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, u16> {
        if ciphertext.len() != public_key.len() {
            return Err(device_status::INVALID_LENGTH);
        }
        let mut block = ciphertext.to_vec();
        xor_in_place(&mut block, &expand(&[public_key], public_key.len()));
        let len = u16::from_be_bytes([block[0], block[1]]) as usize;
        block
            .get(RSA_LENGTH_PREFIX..RSA_LENGTH_PREFIX + len)
            .map(<[u8]>::to_vec)
            .ok_or(device_status::DEVICE_ERROR)
    }

    fn run(&mut self, command: &ChipCommand) -> Result<Vec<u8>, u16> {
        match command {
            ChipCommand::OpenApplication { .. }
            | ChipCommand::CloseApplication { .. }
            | ChipCommand::UpdateCount { .. } => Ok(Vec::new()),
            ChipCommand::ReadData { object } => {
                let data = self.object(object.object_id)?;
                let start = object.offset as usize;
                if start > data.len() {
                    return Err(device_status::DATA_OBJECT_BOUNDARY_EXCEEDED);
                }
                let end = (start + object.length as usize).min(data.len());
                Ok(data[start..end].to_vec())
            }
            ChipCommand::WriteData {
                object_id,
                offset,
                mode,
                data,
            } => {
                let object = self.objects.entry(*object_id).or_default();
                if *mode == WriteMode::EraseAndWrite {
                    object.clear();
                }
                let end = *offset as usize + data.len();
                if object.len() < end {
                    object.resize(end, 0);
                }
                object[*offset as usize..end].copy_from_slice(data);
                Ok(Vec::new())
            }
            ChipCommand::GetRandom { length, .. } => {
                let mut random = vec![0u8; *length as usize];
                OsRng.fill_bytes(&mut random);
                Ok(random)
            }
            ChipCommand::CalcHash { data, .. } => Ok(Sha256::digest(data).to_vec()),
            ChipCommand::EcdsaSign { key, digest } => {
                let signature: DerSignature = self
                    .ecc_key(*key)?
                    .sign_prehash(digest)
                    .map_err(|_| device_status::DEVICE_ERROR)?;
                Ok(signature.as_bytes().to_vec())
            }
            ChipCommand::EcdsaVerify {
                public_key,
                digest,
                signature,
            } => match public_key {
                PublicKeySource::Host { key, .. } => verify_ecdsa_prehash(key, signature, digest)
                    .map(|_| Vec::new())
                    .map_err(|_| device_status::SIGNATURE_VERIFICATION_FAILURE),
                PublicKeySource::Object(_) => Err(device_status::INVALID_PARAMETER),
            },
            ChipCommand::EccGenerateKeyPair {
                curve,
                key,
                export_private,
                ..
            } => {
                if *curve != EccCurve::NistP256 {
                    return Err(device_status::INVALID_PARAMETER);
                }
                let signing_key = SigningKey::random(&mut OsRng);
                let mut response = signing_key
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec();
                if *export_private {
                    response.extend_from_slice(&signing_key.to_bytes());
                }
                self.ecc_keys.insert(*key, signing_key);
                Ok(response)
            }
            ChipCommand::Ecdh {
                private_key,
                peer_public_key,
                export_shared_secret,
                ..
            } => {
                let private = self.ecc_key(*private_key)?.to_bytes();
                let secret = expand(&[private.as_slice(), peer_public_key.as_slice()], 32);
                if *export_shared_secret {
                    return Ok(secret);
                }
                self.objects.insert(ObjectId::SESSION_CONTEXT, secret);
                Ok(Vec::new())
            }
            ChipCommand::RsaGenerateKeyPair { key_type, key, .. } => {
                let mut public_key = vec![0u8; key_type.modulus_len()];
                OsRng.fill_bytes(&mut public_key);
                self.rsa_keys.insert(*key, public_key.clone());
                Ok(public_key)
            }
            ChipCommand::RsaSign { key, digest, .. } => {
                let public_key = self
                    .rsa_keys
                    .get(key)
                    .ok_or(device_status::INVALID_OBJECT_ID)?;
                Ok(expand(&[public_key.as_slice(), digest.as_slice()], public_key.len()))
            }
            ChipCommand::RsaVerify {
                public_key,
                digest,
                signature,
                ..
            } => {
                let public_key = self.rsa_public_key(public_key)?;
                if expand(&[public_key.as_slice(), digest.as_slice()], public_key.len()) == *signature {
                    Ok(Vec::new())
                } else {
                    Err(device_status::SIGNATURE_VERIFICATION_FAILURE)
                }
            }
            ChipCommand::RsaEncryptMessage {
                public_key,
                message,
                ..
            } => Self::rsa_encrypt(&self.rsa_public_key(public_key)?, message),
            ChipCommand::RsaEncryptSession {
                public_key,
                session,
                ..
            } => {
                let secret = self.object(*session)?.clone();
                Self::rsa_encrypt(&self.rsa_public_key(public_key)?, &secret)
            }
            ChipCommand::RsaDecryptAndExport {
                key, ciphertext, ..
            } => {
                let public_key = self
                    .rsa_keys
                    .get(key)
                    .ok_or(device_status::INVALID_OBJECT_ID)?;
                Self::rsa_decrypt(public_key, ciphertext)
            }
            ChipCommand::TlsPrfSha256 {
                secret,
                label,
                seed,
                derived_key_len,
                export,
            } => {
                let secret = self.object(*secret)?;
                let derived = expand(
                    &[secret.as_slice(), label.as_slice(), seed.as_slice()],
                    *derived_key_len as usize,
                );
                if *export {
                    return Ok(derived);
                }
                self.objects.insert(ObjectId::SESSION_CONTEXT, derived);
                Ok(Vec::new())
            }
        }
    }
}

impl ChipDevice for SimulatedChip {
    fn execute(&mut self, command: &ChipCommand) -> Result<Vec<u8>, u16> {
        let outcome = self.run(command);
        if let Err(status) = outcome {
            debug!("Simulated {} failed with 0x{:04X}", command.name(), status);
        }
        outcome
    }
}
