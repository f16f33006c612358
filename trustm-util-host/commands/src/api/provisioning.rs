// Licensed under the Apache-2.0 license

//! Credential provisioning hand-off
//!
//! After the chip has been authenticated its certificate, together with a
//! reference to the private key that never leaves the chip, is handed to the
//! device's credential store (for example a TLS client key provisioning
//! routine).

use crate::api::{ChipApiError, ChipResult};
use alloc::string::{String, ToString};
use der::pem::LineEnding;
use log::info;
use trustm_util_host_command_types::ObjectId;

const CERTIFICATE_PEM_LABEL: &str = "CERTIFICATE";

/// Key algorithm of the provisioned credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Ec,
    Rsa,
}

/// Location of the credential's private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKeySource {
    /// Key slot on the secure element
    SecureElement(ObjectId),
    /// PEM encoded key held by the host
    Pem(String),
}

/// Credential handed to a [`CredentialProvisioner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningParams {
    pub key_type: KeyType,
    pub private_key: PrivateKeySource,
    /// PEM encoded client certificate
    pub certificate_pem: String,
}

/// Device credential store receiving the chip credentials
pub trait CredentialProvisioner {
    type Error: core::fmt::Display;

    fn provision(&mut self, params: &ProvisioningParams) -> Result<(), Self::Error>;
}

/// Build EC provisioning parameters for a DER certificate whose private key
/// lives in `private_key_oid`
pub fn trustm_build_provisioning_params(
    certificate_der: &[u8],
    private_key_oid: ObjectId,
) -> ChipResult<ProvisioningParams> {
    if certificate_der.is_empty() {
        return Err(ChipApiError::InvalidParameter("empty certificate"));
    }
    let certificate_pem = der::pem::encode_string(CERTIFICATE_PEM_LABEL, LineEnding::LF, certificate_der)
        .map_err(|_| ChipApiError::InvalidParameter("certificate cannot be PEM encoded"))?;

    Ok(ProvisioningParams {
        key_type: KeyType::Ec,
        private_key: PrivateKeySource::SecureElement(private_key_oid),
        certificate_pem,
    })
}

/// Build the parameters and pass them to `provisioner`
pub fn trustm_provision_credentials<P: CredentialProvisioner>(
    provisioner: &mut P,
    certificate_der: &[u8],
    private_key_oid: ObjectId,
) -> ChipResult<ProvisioningParams> {
    let params = trustm_build_provisioning_params(certificate_der, private_key_oid)?;
    provisioner
        .provision(&params)
        .map_err(|err| ChipApiError::Provisioning(err.to_string()))?;
    info!(
        "Provisioned EC credential (key in {}, {} byte certificate)",
        private_key_oid,
        certificate_der.len()
    );
    Ok(params)
}
