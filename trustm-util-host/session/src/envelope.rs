// Licensed under the Apache-2.0 license

//! Command envelope
//!
//! Issue one command, then wait cooperatively for its completion within a
//! fixed poll budget. The caller is blocked for at most
//! `max_polls * poll_interval`.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;
use log::{trace, warn};
use trustm_util_host_osal::{Delay, OsalError};
use trustm_util_host_transport::{
    Completion, CompletionLatch, LatchStatus, TransportError, TransportResult,
};

/// Why an enveloped command did not produce a response
#[derive(Clone)]
pub enum EnvelopeError {
    /// The transport refused the command; nothing was waited for
    Rejected(TransportError),
    /// The poll budget ran out while the command was still in progress.
    /// The latch is handed back because a late completion may still land.
    Timeout {
        polls: u32,
        latch: Arc<CompletionLatch>,
    },
    /// The chip completed the command with an error status
    Device(u16),
    /// The delay primitive failed; the command may still be in progress
    Delay {
        error: OsalError,
        latch: Arc<CompletionLatch>,
    },
}

impl fmt::Debug for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::Rejected(err) => f.debug_tuple("Rejected").field(err).finish(),
            EnvelopeError::Timeout { polls, .. } => {
                f.debug_struct("Timeout").field("polls", polls).finish()
            }
            EnvelopeError::Device(code) => f.debug_tuple("Device").field(code).finish(),
            EnvelopeError::Delay { error, .. } => {
                f.debug_struct("Delay").field("error", error).finish()
            }
        }
    }
}

/// Wait budget and delay source for one command
pub struct CommandEnvelope<'d> {
    delay: &'d dyn Delay,
    max_polls: u32,
    poll_interval: Duration,
}

impl<'d> CommandEnvelope<'d> {
    pub fn new(delay: &'d dyn Delay, max_polls: u32, poll_interval: Duration) -> Self {
        Self {
            delay,
            max_polls,
            poll_interval,
        }
    }

    /// Longest time [`CommandEnvelope::run`] can block
    pub fn budget(&self) -> Duration {
        self.poll_interval * self.max_polls
    }

    /// Issue a command through `issue` and wait for its outcome.
    ///
    /// `issue` receives the completion for a fresh Busy latch. It must return
    /// promptly: `Err` if the command was not accepted, `Ok` once the command
    /// is on its way. Every poll yields through the delay primitive before
    /// re-reading the latch. The result is never Busy.
    pub fn run<F>(&self, issue: F) -> Result<Vec<u8>, EnvelopeError>
    where
        F: FnOnce(Completion) -> TransportResult<()>,
    {
        let (latch, completion) = CompletionLatch::arm();

        issue(completion).map_err(EnvelopeError::Rejected)?;

        let mut polls = 0u32;
        while latch.status().is_busy() && polls < self.max_polls {
            if let Err(error) = self.delay.delay(self.poll_interval) {
                warn!("Delay failed after {} polls: {}", polls, error);
                return Err(EnvelopeError::Delay { error, latch });
            }
            polls += 1;
        }

        match latch.status() {
            LatchStatus::Busy => {
                warn!(
                    "Command still busy after {} polls ({:?})",
                    polls,
                    self.budget()
                );
                Err(EnvelopeError::Timeout { polls, latch })
            }
            LatchStatus::Success => {
                trace!("Command completed after {} polls", polls);
                Ok(latch.take_response().unwrap_or_default())
            }
            LatchStatus::DeviceError(code) => Err(EnvelopeError::Device(code)),
        }
    }
}
