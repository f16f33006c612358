// Licensed under the Apache-2.0 license

//! Cryptographic parameter types carried by chip commands

use alloc::vec::Vec;

/// Elliptic curves supported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccCurve {
    NistP256,
    NistP384,
}

impl EccCurve {
    /// Length of an uncompressed SEC1 public key on this curve.
    pub const fn public_key_len(self) -> usize {
        match self {
            EccCurve::NistP256 => 0x41,
            EccCurve::NistP384 => 0x61,
        }
    }
}

/// RSA key sizes supported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaKeyType {
    Rsa1024Exp,
    Rsa2048Exp,
}

impl RsaKeyType {
    pub const fn modulus_len(self) -> usize {
        match self {
            RsaKeyType::Rsa1024Exp => 128,
            RsaKeyType::Rsa2048Exp => 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyAlgorithm {
    Ecc(EccCurve),
    Rsa(RsaKeyType),
}

/// Where the chip finds the public key for a verify or encrypt operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    /// Key supplied by the host
    Host {
        algorithm: PublicKeyAlgorithm,
        key: Vec<u8>,
    },
    /// Key taken from a certificate stored in a data object
    Object(crate::ObjectId),
}

/// Permitted uses of a generated key (bit flags)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub u8);

impl KeyUsage {
    pub const AUTHENTICATION: KeyUsage = KeyUsage(0x01);
    pub const ENCRYPTION: KeyUsage = KeyUsage(0x02);
    pub const SIGN: KeyUsage = KeyUsage(0x10);
    pub const KEY_AGREEMENT: KeyUsage = KeyUsage(0x20);

    pub const fn union(self, other: KeyUsage) -> KeyUsage {
        KeyUsage(self.0 | other.0)
    }

    pub const fn contains(self, other: KeyUsage) -> bool {
        self.0 & other.0 == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaEncryptionScheme {
    Pkcs1V15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaSignatureScheme {
    Pkcs1V15Sha256,
    Pkcs1V15Sha384,
}

/// Random number generator flavour requested from the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngType {
    Trng,
    Drng,
}

/// Raw SHA-256 digest length
pub const SHA256_DIGEST_LEN: usize = 32;

/// Length of the authentication challenge
pub const CHALLENGE_LEN: usize = 32;

/// Smallest random request the chip accepts
pub const MIN_RANDOM_LEN: u16 = 8;
/// Largest random request the chip accepts
pub const MAX_RANDOM_LEN: u16 = 256;

/// Upper bound of a DER encoded P-256 ECDSA signature
pub const MAX_ECDSA_P256_SIGNATURE_LEN: usize = 0x40 + 8;
