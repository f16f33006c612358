// Licensed under the Apache-2.0 license

//! Scriptable transport
//!
//! Completes commands synchronously through a [`MockChip`] by default. A
//! test can queue replies to hold a completion back (to be released later
//! through the [`TransportProbe`]) or to reject the command outright.

use super::chip::MockChip;
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use trustm_util_host_command_types::ChipCommand;
use trustm_util_host_transport::{
    ChipDevice, ChipTransport, Completion, CompletionOutcome, InstanceHandle, TransportError,
    TransportResult,
};

/// What the transport does with the next issued command
#[derive(Debug, Clone)]
pub enum Reply {
    /// Execute on the chip and complete before `issue` returns
    Complete,
    /// Accept the command and keep its completion pending
    Hold,
    /// Refuse the command
    Reject(TransportError),
}

#[derive(Default)]
struct TransportState {
    max_instances: usize,
    live: BTreeSet<InstanceHandle>,
    next_handle: u16,
    created: usize,
    destroyed: usize,
    fail_create: bool,
    fail_destroy: bool,
    replies: VecDeque<Reply>,
    issued: Vec<ChipCommand>,
    busy_at_issue: Vec<bool>,
    held: VecDeque<Completion>,
}

/// Inspection and control handle shared with a [`MockTransport`]
#[derive(Clone)]
pub struct TransportProbe {
    state: Arc<Mutex<TransportState>>,
}

impl TransportProbe {
    pub fn push_reply(&self, reply: Reply) {
        self.state.lock().unwrap().replies.push_back(reply);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn set_fail_destroy(&self, fail: bool) {
        self.state.lock().unwrap().fail_destroy = fail;
    }

    pub fn created(&self) -> usize {
        self.state.lock().unwrap().created
    }

    pub fn destroyed(&self) -> usize {
        self.state.lock().unwrap().destroyed
    }

    pub fn live_instances(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    /// Names of all accepted commands, in order
    pub fn issued(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .unwrap()
            .issued
            .iter()
            .map(|command| command.name())
            .collect()
    }

    pub fn issued_commands(&self) -> Vec<ChipCommand> {
        self.state.lock().unwrap().issued.clone()
    }

    /// Whether each accepted command's latch was Busy when it was issued
    pub fn busy_at_issue(&self) -> Vec<bool> {
        self.state.lock().unwrap().busy_at_issue.clone()
    }

    pub fn held(&self) -> usize {
        self.state.lock().unwrap().held.len()
    }

    /// Deliver the oldest held completion. Returns false if none is held.
    pub fn release(&self, outcome: CompletionOutcome) -> bool {
        let completion = self.state.lock().unwrap().held.pop_front();
        match completion {
            Some(completion) => {
                completion.complete(outcome);
                true
            }
            None => false,
        }
    }
}

/// Transport driving a [`MockChip`]
pub struct MockTransport {
    chip: MockChip,
    state: Arc<Mutex<TransportState>>,
}

impl MockTransport {
    pub fn new(chip: MockChip) -> Self {
        Self::with_max_instances(chip, 4)
    }

    pub fn with_max_instances(chip: MockChip, max_instances: usize) -> Self {
        Self {
            chip,
            state: Arc::new(Mutex::new(TransportState {
                max_instances,
                next_handle: 1,
                ..Default::default()
            })),
        }
    }

    pub fn probe(&self) -> TransportProbe {
        TransportProbe {
            state: self.state.clone(),
        }
    }
}

impl ChipTransport for MockTransport {
    fn create_instance(&mut self) -> TransportResult<InstanceHandle> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create || state.live.len() >= state.max_instances {
            return Err(TransportError::ResourceExhausted);
        }
        let handle = InstanceHandle(state.next_handle);
        state.next_handle += 1;
        state.live.insert(handle);
        state.created += 1;
        Ok(handle)
    }

    fn destroy_instance(&mut self, instance: InstanceHandle) -> TransportResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.live.remove(&instance) {
            return Err(TransportError::InstanceNotFound(instance.0));
        }
        state.destroyed += 1;
        if state.fail_destroy {
            return Err(TransportError::Custom("destroy failed"));
        }
        Ok(())
    }

    fn issue(
        &mut self,
        instance: InstanceHandle,
        command: ChipCommand,
        completion: Completion,
    ) -> TransportResult<()> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            if !state.live.contains(&instance) {
                return Err(TransportError::InstanceNotFound(instance.0));
            }
            let reply = state.replies.pop_front().unwrap_or(Reply::Complete);
            if let Reply::Reject(err) = reply {
                return Err(err);
            }
            state.issued.push(command.clone());
            state.busy_at_issue.push(completion.is_pending());
            reply
        };

        match reply {
            Reply::Hold => self.state.lock().unwrap().held.push_back(completion),
            _ => completion.complete(self.chip.execute(&command)),
        }
        Ok(())
    }
}
