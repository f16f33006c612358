// Licensed under the Apache-2.0 license

//! File based credential store
//!
//! Writes the client certificate as PEM and a reference to the private key
//! slot, standing in for the TLS stack's credential provisioning.

use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use trustm_util_host::{CredentialProvisioner, ProvisioningParams};
use trustm_util_host_commands::api::{KeyType, PrivateKeySource};

pub const CERTIFICATE_FILE: &str = "client-certificate.pem";
pub const PRIVATE_KEY_FILE: &str = "client-key.txt";

pub struct FileProvisioner {
    output_dir: PathBuf,
}

impl FileProvisioner {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn certificate_path(&self) -> PathBuf {
        self.output_dir.join(CERTIFICATE_FILE)
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.output_dir.join(PRIVATE_KEY_FILE)
    }
}

fn describe_key(key_type: KeyType, private_key: &PrivateKeySource) -> String {
    let algorithm = match key_type {
        KeyType::Ec => "EC",
        KeyType::Rsa => "RSA",
    };
    match private_key {
        PrivateKeySource::SecureElement(object_id) => {
            format!("type = {}\nsecure-element-object = {}\n", algorithm, object_id)
        }
        PrivateKeySource::Pem(pem) => format!("type = {}\n{}", algorithm, pem),
    }
}

impl CredentialProvisioner for FileProvisioner {
    type Error = io::Error;

    fn provision(&mut self, params: &ProvisioningParams) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.certificate_path(), &params.certificate_pem)?;
        fs::write(
            self.private_key_path(),
            describe_key(params.key_type, &params.private_key),
        )?;
        info!("Credentials written to {:?}", self.output_dir);
        Ok(())
    }
}
