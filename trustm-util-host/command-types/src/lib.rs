// Licensed under the Apache-2.0 license

//! Trust M Command Types
//!
//! Shared command definitions and data layouts for the Trust M Utility Host
//! Library. Commands are plain owned values: the transport decides how they
//! reach the chip, and every command completes with either a response
//! payload or a 16-bit device status code.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

pub mod certificate;
pub mod crypto;
pub mod device_info;
pub mod error;
pub mod object;

// Re-export all types
pub use certificate::*;
pub use crypto::*;
pub use device_info::*;
pub use error::*;
pub use object::*;

/// Chip command codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipCommandId {
    // Data object access
    GetDataObject = 0x81,
    SetDataObject = 0x82,
    GetRandom = 0x8C,

    // Asymmetric crypto
    EncryptAsym = 0x9E,
    DecryptAsym = 0x9F,
    CalcHash = 0xB0,
    CalcSign = 0xB1,
    VerifySign = 0xB2,
    CalcSSec = 0xB3,
    DeriveKey = 0xB4,
    GenKeyPair = 0xB8,

    // Application management
    OpenApplication = 0xF0,
    CloseApplication = 0xF1,
}

/// A command addressed to the chip application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipCommand {
    /// Open the chip application, optionally restoring a hibernated context
    OpenApplication { restore_context: bool },
    /// Close the chip application, optionally hibernating its context
    CloseApplication { hibernate: bool },
    /// Read a range of a data object; responds with the bytes read
    ReadData { object: DataObjectRef },
    /// Write into a data object; empty response
    WriteData {
        object_id: ObjectId,
        offset: u16,
        mode: WriteMode,
        data: Vec<u8>,
    },
    /// Advance a monotonic counter; empty response
    UpdateCount { object_id: ObjectId, count: u8 },
    /// Responds with `length` random bytes
    GetRandom { rng: RngType, length: u16 },
    /// Responds with the digest
    CalcHash {
        algorithm: HashAlgorithm,
        data: Vec<u8>,
    },
    /// Responds with a DER encoded ECDSA signature over `digest`
    EcdsaSign { key: ObjectId, digest: Vec<u8> },
    /// Empty response on success
    EcdsaVerify {
        public_key: PublicKeySource,
        digest: Vec<u8>,
        signature: Vec<u8>,
    },
    /// Responds with the public key, followed by the private key if exported
    EccGenerateKeyPair {
        curve: EccCurve,
        usage: KeyUsage,
        key: ObjectId,
        export_private: bool,
    },
    /// Responds with the shared secret when exported, otherwise empty and the
    /// secret stays in the session context
    Ecdh {
        curve: EccCurve,
        private_key: ObjectId,
        peer_public_key: Vec<u8>,
        export_shared_secret: bool,
    },
    /// Responds with the public key
    RsaGenerateKeyPair {
        key_type: RsaKeyType,
        usage: KeyUsage,
        key: ObjectId,
        export_private: bool,
    },
    /// Responds with the signature
    RsaSign {
        scheme: RsaSignatureScheme,
        key: ObjectId,
        digest: Vec<u8>,
    },
    /// Empty response on success
    RsaVerify {
        scheme: RsaSignatureScheme,
        public_key: PublicKeySource,
        digest: Vec<u8>,
        signature: Vec<u8>,
    },
    /// Responds with the ciphertext
    RsaEncryptMessage {
        scheme: RsaEncryptionScheme,
        public_key: PublicKeySource,
        message: Vec<u8>,
    },
    /// Encrypt the secret held in a session context; responds with the ciphertext
    RsaEncryptSession {
        scheme: RsaEncryptionScheme,
        public_key: PublicKeySource,
        session: ObjectId,
    },
    /// Responds with the plaintext
    RsaDecryptAndExport {
        scheme: RsaEncryptionScheme,
        key: ObjectId,
        ciphertext: Vec<u8>,
    },
    /// TLS 1.2 PRF (SHA-256) key derivation from a stored secret; responds
    /// with the derived key when exported
    TlsPrfSha256 {
        secret: ObjectId,
        label: Vec<u8>,
        seed: Vec<u8>,
        derived_key_len: u16,
        export: bool,
    },
}

impl ChipCommand {
    /// Chip command code carrying this command
    pub fn id(&self) -> ChipCommandId {
        match self {
            ChipCommand::OpenApplication { .. } => ChipCommandId::OpenApplication,
            ChipCommand::CloseApplication { .. } => ChipCommandId::CloseApplication,
            ChipCommand::ReadData { .. } => ChipCommandId::GetDataObject,
            ChipCommand::WriteData { .. } | ChipCommand::UpdateCount { .. } => {
                ChipCommandId::SetDataObject
            }
            ChipCommand::GetRandom { .. } => ChipCommandId::GetRandom,
            ChipCommand::CalcHash { .. } => ChipCommandId::CalcHash,
            ChipCommand::EcdsaSign { .. } | ChipCommand::RsaSign { .. } => ChipCommandId::CalcSign,
            ChipCommand::EcdsaVerify { .. } | ChipCommand::RsaVerify { .. } => {
                ChipCommandId::VerifySign
            }
            ChipCommand::EccGenerateKeyPair { .. } | ChipCommand::RsaGenerateKeyPair { .. } => {
                ChipCommandId::GenKeyPair
            }
            ChipCommand::Ecdh { .. } => ChipCommandId::CalcSSec,
            ChipCommand::RsaEncryptMessage { .. } | ChipCommand::RsaEncryptSession { .. } => {
                ChipCommandId::EncryptAsym
            }
            ChipCommand::RsaDecryptAndExport { .. } => ChipCommandId::DecryptAsym,
            ChipCommand::TlsPrfSha256 { .. } => ChipCommandId::DeriveKey,
        }
    }

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            ChipCommand::OpenApplication { .. } => "open_application",
            ChipCommand::CloseApplication { .. } => "close_application",
            ChipCommand::ReadData { .. } => "read_data",
            ChipCommand::WriteData { .. } => "write_data",
            ChipCommand::UpdateCount { .. } => "update_count",
            ChipCommand::GetRandom { .. } => "get_random",
            ChipCommand::CalcHash { .. } => "calc_hash",
            ChipCommand::EcdsaSign { .. } => "ecdsa_sign",
            ChipCommand::EcdsaVerify { .. } => "ecdsa_verify",
            ChipCommand::EccGenerateKeyPair { .. } => "ecc_generate_keypair",
            ChipCommand::Ecdh { .. } => "ecdh",
            ChipCommand::RsaGenerateKeyPair { .. } => "rsa_generate_keypair",
            ChipCommand::RsaSign { .. } => "rsa_sign",
            ChipCommand::RsaVerify { .. } => "rsa_verify",
            ChipCommand::RsaEncryptMessage { .. } => "rsa_encrypt_message",
            ChipCommand::RsaEncryptSession { .. } => "rsa_encrypt_session",
            ChipCommand::RsaDecryptAndExport { .. } => "rsa_decrypt_and_export",
            ChipCommand::TlsPrfSha256 { .. } => "tls_prf_sha256",
        }
    }
}
