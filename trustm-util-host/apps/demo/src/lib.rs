// Licensed under the Apache-2.0 license

//! Trust M Demo Application
//!
//! Runs the complete host-side flow against a simulated chip: wait for the
//! start signal, open the chip application, report the chip identity,
//! authenticate the chip, run the example operations, close the
//! application and hand the chip credentials to a credential store.

pub mod config;
pub mod examples;
pub mod provisioner;
pub mod sim;
pub mod startup;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;
use trustm_util_host::{
    trustm_cmd_authenticate_chip, trustm_cmd_read_uid, trustm_provision_credentials, ChipSession,
    RustCryptoProvider, StdDelay, WorkerTransport,
};

pub use config::DemoConfig;
pub use examples::{run_examples, ExampleOutcome};
pub use provisioner::FileProvisioner;
pub use sim::SimulatedChip;
pub use startup::StartGate;

/// Summary of a demo run
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub firmware_version: &'static str,
    pub certificate_len: usize,
    pub examples: Vec<ExampleOutcome>,
    /// Directory the credentials were written to
    pub provisioned: Option<PathBuf>,
}

impl DemoReport {
    pub fn all_examples_passed(&self) -> bool {
        self.examples.iter().all(|example| example.passed)
    }
}

/// Run the demo flow described by `config`
pub fn run_demo(config: &DemoConfig) -> Result<DemoReport> {
    let gate = StartGate::arm(Duration::from_millis(config.startup.release_delay_ms))?;
    gate.wait(Duration::from_millis(config.startup.semaphore_wait_ms))?;

    let (chip, trust_anchor) = SimulatedChip::generate()?;
    let mut transport = WorkerTransport::spawn(chip, config.simulator.worker_config())
        .map_err(|err| anyhow!("Failed to start chip transport: {}", err))?;
    let delay = StdDelay;

    let (uid, authenticated, examples) = {
        let mut session =
            ChipSession::with_config(&mut transport, &delay, config.session.session_config());
        session
            .open()
            .map_err(|err| anyhow!("Failed to open chip application: {}", err))?;

        let uid = trustm_cmd_read_uid(&mut session)
            .map_err(|err| anyhow!("Failed to read chip information: {}", err))?;

        let mut crypto = RustCryptoProvider::new();
        let authenticated = trustm_cmd_authenticate_chip(
            &mut session,
            &mut crypto,
            &trust_anchor,
            &config.objects.authentication_config(),
        )
        .map_err(|err| anyhow!("Chip authentication failed: {}", err))?;

        let examples = run_examples(&mut session);

        session
            .close()
            .map_err(|err| anyhow!("Failed to close chip application: {}", err))?;
        info!("Session statistics: {:?}", session.statistics());
        (uid, authenticated, examples)
    };

    let provisioned = if config.provisioning.enabled {
        let mut provisioner = FileProvisioner::new(&config.provisioning.output_dir);
        trustm_provision_credentials(
            &mut provisioner,
            &authenticated.certificate,
            config.objects.authentication_config().private_key_oid,
        )
        .map_err(|err| anyhow!("{}", err))
        .context("Credential provisioning failed")?;
        Some(config.provisioning.output_dir.clone())
    } else {
        warn!("Credential provisioning disabled");
        None
    };

    Ok(DemoReport {
        firmware_version: uid.firmware_version(),
        certificate_len: authenticated.certificate.len(),
        examples,
        provisioned,
    })
}
