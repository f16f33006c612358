// Licensed under the Apache-2.0 license

//! Trust M Transport Layer
//!
//! Asynchronous command transport for the chip. A transport accepts a
//! command together with a [`Completion`] and returns immediately; the
//! outcome is delivered later through the completion, possibly from another
//! execution context.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod latch;
pub mod transports;

use trustm_util_host_command_types::ChipCommand;

// Re-export commonly used types
pub use error::{TransportError, TransportResult};
pub use latch::{Completion, CompletionLatch, CompletionOutcome, LatchStatus};

#[cfg(feature = "std")]
pub use transports::worker::{ChipDevice, WorkerConfig, WorkerTransport};

/// Handle to a command context created by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceHandle(pub u16);

impl core::fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Asynchronous command transport
pub trait ChipTransport: Send {
    /// Allocate a command context. Fails when the transport has no free slot.
    fn create_instance(&mut self) -> TransportResult<InstanceHandle>;

    /// Release a command context.
    fn destroy_instance(&mut self, instance: InstanceHandle) -> TransportResult<()>;

    /// Hand `command` to the chip.
    ///
    /// An `Err` means the command was rejected and `completion` will never
    /// fire. `Ok` means it was accepted and `completion` will be settled
    /// exactly once with the chip's result.
    fn issue(
        &mut self,
        instance: InstanceHandle,
        command: ChipCommand,
        completion: Completion,
    ) -> TransportResult<()>;
}
