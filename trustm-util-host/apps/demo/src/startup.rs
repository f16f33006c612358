// Licensed under the Apache-2.0 license

//! Start-up gating
//!
//! The chip task does not start on its own: a one-shot timer releases it
//! once the rest of the system is up. The task gives up if the release does
//! not arrive within its wait budget.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Receiving end of the start signal
pub struct StartGate {
    receiver: mpsc::Receiver<()>,
}

impl StartGate {
    /// Arm a one-shot timer that opens the gate after `release_after`
    pub fn arm(release_after: Duration) -> Result<Self> {
        let (sender, receiver) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("trustm-start-timer".into())
            .spawn(move || {
                thread::sleep(release_after);
                debug!("Start timer expired");
                // The chip task may already have given up
                let _ = sender.send(());
            })
            .context("Failed to spawn start timer")?;
        Ok(Self { receiver })
    }

    /// Block until the gate opens, for at most `timeout`
    pub fn wait(&self, timeout: Duration) -> Result<()> {
        match self.receiver.recv_timeout(timeout) {
            Ok(()) => {
                info!("Chip task released");
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => {
                bail!("Start signal not received within {:?}", timeout)
            }
            Err(RecvTimeoutError::Disconnected) => bail!("Start timer exited without releasing"),
        }
    }
}
