// Licensed under the Apache-2.0 license

//! Host-side cryptography for chip authentication
//!
//! Everything the host must compute itself when authenticating the chip:
//! challenge randomness, SHA-256, X.509 chain verification and ECDSA
//! signature checks. The [`HostCrypto`] trait is the seam; the default
//! implementation uses the RustCrypto crates.

pub mod error;
pub mod rustcrypto;
pub mod trust_anchor;

pub use error::{CryptoError, CryptoResult};
pub use rustcrypto::RustCryptoProvider;
pub use trust_anchor::{OPTIGA_TRUST_CA_101, OPTIGA_TRUST_TEST_CA};

/// Host crypto library
pub trait HostCrypto {
    /// Prepare the library for use. Called once per authentication.
    fn init(&mut self) -> CryptoResult<()> {
        Ok(())
    }

    /// Fill `buffer` with random bytes.
    fn random(&mut self, buffer: &mut [u8]) -> CryptoResult<()>;

    fn sha256(&mut self, data: &[u8]) -> CryptoResult<[u8; 32]>;

    /// Verify that the DER certificate `cert` is signed by the DER CA
    /// certificate `ca_cert`.
    fn verify_certificate(&mut self, ca_cert: &[u8], cert: &[u8]) -> CryptoResult<()>;

    /// Extract the subject public key (uncompressed SEC1 point) from a DER
    /// certificate.
    fn public_key(&mut self, cert: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Verify a DER ECDSA `signature` over a precomputed `digest`.
    fn verify_signature(
        &mut self,
        public_key: &[u8],
        signature: &[u8],
        digest: &[u8],
    ) -> CryptoResult<()>;
}
