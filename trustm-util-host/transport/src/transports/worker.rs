// Licensed under the Apache-2.0 license

//! Worker Thread Transport
//!
//! Adapts a synchronous chip model (a simulator, or a driver that blocks on
//! the bus) to the asynchronous transport contract. Commands are queued to a
//! dedicated thread which executes them in order and settles each completion
//! from that thread.

use crate::{ChipTransport, Completion, InstanceHandle, TransportError, TransportResult};
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::time::Duration;
use log::{debug, trace, warn};
use std::sync::mpsc;
use std::thread;
use trustm_util_host_command_types::ChipCommand;
use trustm_util_host_osal::OsalError;

/// Synchronous chip model executed on the worker thread
pub trait ChipDevice: Send + 'static {
    /// Execute one command, returning the response payload or a chip status
    /// code.
    fn execute(&mut self, command: &ChipCommand) -> Result<Vec<u8>, u16>;
}

/// Worker transport configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Number of command contexts that may exist at once
    pub max_instances: usize,
    /// Time the worker waits before executing each command
    pub response_latency: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_instances: 4,
            response_latency: Duration::from_millis(5),
        }
    }
}

impl WorkerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_instances(mut self, max_instances: usize) -> Self {
        self.max_instances = max_instances;
        self
    }

    pub fn with_response_latency(mut self, latency: Duration) -> Self {
        self.response_latency = latency;
        self
    }
}

struct Job {
    instance: InstanceHandle,
    command: ChipCommand,
    completion: Completion,
}

/// Transport that runs a [`ChipDevice`] on its own thread
pub struct WorkerTransport {
    config: WorkerConfig,
    sender: Option<mpsc::Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
    instances: BTreeSet<InstanceHandle>,
    next_handle: u16,
}

impl WorkerTransport {
    pub fn spawn<D: ChipDevice>(device: D, config: WorkerConfig) -> TransportResult<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let latency = config.response_latency;
        let worker = thread::Builder::new()
            .name("trustm-worker".into())
            .spawn(move || run_worker(device, receiver, latency))
            .map_err(|_| TransportError::OsalError(OsalError::ResourceUnavailable))?;

        Ok(Self {
            config,
            sender: Some(sender),
            worker: Some(worker),
            instances: BTreeSet::new(),
            next_handle: 1,
        })
    }

    /// Number of instances currently allocated
    pub fn active_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    fn allocate_handle(&mut self) -> InstanceHandle {
        loop {
            let candidate = InstanceHandle(self.next_handle);
            self.next_handle = self.next_handle.checked_add(1).unwrap_or(1);
            if !self.instances.contains(&candidate) {
                return candidate;
            }
        }
    }
}

fn run_worker<D: ChipDevice>(mut device: D, receiver: mpsc::Receiver<Job>, latency: Duration) {
    for job in receiver {
        if !latency.is_zero() {
            thread::sleep(latency);
        }
        let outcome = device.execute(&job.command);
        match &outcome {
            Ok(payload) => trace!(
                "{} on {} completed with {} bytes",
                job.command.name(),
                job.instance,
                payload.len()
            ),
            Err(code) => debug!(
                "{} on {} failed with status 0x{:04X}",
                job.command.name(),
                job.instance,
                code
            ),
        }
        job.completion.complete(outcome);
    }
}

impl ChipTransport for WorkerTransport {
    fn create_instance(&mut self) -> TransportResult<InstanceHandle> {
        if self.instances.len() >= self.config.max_instances {
            warn!(
                "All {} worker instances in use",
                self.config.max_instances
            );
            return Err(TransportError::ResourceExhausted);
        }
        let handle = self.allocate_handle();
        self.instances.insert(handle);
        Ok(handle)
    }

    fn destroy_instance(&mut self, instance: InstanceHandle) -> TransportResult<()> {
        if self.instances.remove(&instance) {
            Ok(())
        } else {
            Err(TransportError::InstanceNotFound(instance.0))
        }
    }

    fn issue(
        &mut self,
        instance: InstanceHandle,
        command: ChipCommand,
        completion: Completion,
    ) -> TransportResult<()> {
        if !self.instances.contains(&instance) {
            return Err(TransportError::InstanceNotFound(instance.0));
        }
        let sender = self.sender.as_ref().ok_or(TransportError::Disconnected)?;
        sender
            .send(Job {
                instance,
                command,
                completion,
            })
            .map_err(|_| TransportError::Disconnected)
    }
}

impl Drop for WorkerTransport {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once queued jobs drain.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Worker thread panicked");
            }
        }
    }
}
