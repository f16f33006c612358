// Licensed under the Apache-2.0 license

//! Scoped command instances
//!
//! A [`ScopedInstance`] owns one transport instance for the duration of a
//! single operation and destroys it when dropped, whichever way the
//! operation exits.

use core::mem::ManuallyDrop;
use log::{trace, warn};
use trustm_util_host_command_types::ChipCommand;
use trustm_util_host_transport::{
    ChipTransport, Completion, InstanceHandle, TransportResult,
};

pub struct ScopedInstance<'a> {
    transport: &'a mut dyn ChipTransport,
    handle: InstanceHandle,
}

impl<'a> ScopedInstance<'a> {
    /// Create a new instance on `transport`.
    pub fn create(transport: &'a mut dyn ChipTransport) -> TransportResult<Self> {
        let handle = transport.create_instance()?;
        trace!("Created instance {}", handle);
        Ok(Self { transport, handle })
    }

    /// Take ownership of an instance created earlier.
    pub fn adopt(transport: &'a mut dyn ChipTransport, handle: InstanceHandle) -> Self {
        Self { transport, handle }
    }

    pub fn handle(&self) -> InstanceHandle {
        self.handle
    }

    pub fn issue(&mut self, command: ChipCommand, completion: Completion) -> TransportResult<()> {
        self.transport.issue(self.handle, command, completion)
    }

    /// Keep the instance alive past this scope and return its handle.
    pub fn into_handle(self) -> InstanceHandle {
        let this = ManuallyDrop::new(self);
        this.handle
    }
}

impl Drop for ScopedInstance<'_> {
    fn drop(&mut self) {
        match self.transport.destroy_instance(self.handle) {
            Ok(()) => trace!("Destroyed instance {}", self.handle),
            Err(err) => warn!("Failed to destroy instance {}: {}", self.handle, err),
        }
    }
}
