// Licensed under the Apache-2.0 license

//! Session Management
//!
//! Tracks whether the chip application is open, owns the application
//! instance while it is, and runs every command through the
//! [`CommandEnvelope`] on a per-operation [`ScopedInstance`].

#![no_std]

extern crate alloc;

pub mod envelope;
pub mod scoped;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;
use log::{debug, error, info, warn};
use trustm_util_host_command_types::ChipCommand;
use trustm_util_host_osal::{Delay, OsalError};
use trustm_util_host_transport::{ChipTransport, CompletionLatch, InstanceHandle, TransportError};

pub use envelope::{CommandEnvelope, EnvelopeError};
pub use scoped::ScopedInstance;

/// Session error enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The transport could not allocate a command instance
    InstanceCreationFailed(TransportError),

    /// The transport refused to accept the command
    CommandRejected(TransportError),

    /// The command did not complete within the poll budget
    Timeout { polls: u32 },

    /// The chip completed the command with an error status
    DeviceError(u16),

    /// An earlier command timed out and has not completed yet
    CommandInFlight,

    /// The chip application is not open
    NotOpen,

    /// Invalid session state
    InvalidState {
        current: SessionState,
        expected: SessionState,
    },

    /// OSAL error
    OsalError(OsalError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InstanceCreationFailed(err) => {
                write!(f, "Instance creation failed: {}", err)
            }
            SessionError::CommandRejected(err) => write!(f, "Command rejected: {}", err),
            SessionError::Timeout { polls } => {
                write!(f, "Command timed out after {} polls", polls)
            }
            SessionError::DeviceError(code) => write!(f, "Device error 0x{:04X}", code),
            SessionError::CommandInFlight => write!(f, "A previous command is still in flight"),
            SessionError::NotOpen => write!(f, "Chip application not open"),
            SessionError::InvalidState { current, expected } => write!(
                f,
                "Invalid session state: {:?} (expected {:?})",
                current, expected
            ),
            SessionError::OsalError(err) => write!(f, "OSAL error: {}", err),
        }
    }
}

/// Session result type
pub type SessionResult<T> = Result<T, SessionError>;

/// Session state enumeration
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed = 0,
    Opening = 1,
    Open = 2,
    Closing = 3,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Polls before an in-progress command is reported as timed out
    pub max_polls: u32,
    /// Delay between polls
    pub poll_interval: Duration,
    /// Ask the chip to restore a hibernated context on open
    pub restore_context: bool,
    /// Ask the chip to hibernate its context on close
    pub hibernate_on_close: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_polls: 50,
            poll_interval: Duration::from_millis(50),
            restore_context: false,
            hibernate_on_close: false,
        }
    }
}

impl SessionConfig {
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_restore_context(mut self, restore: bool) -> Self {
        self.restore_context = restore;
        self
    }

    pub fn with_hibernate_on_close(mut self, hibernate: bool) -> Self {
        self.hibernate_on_close = hibernate;
        self
    }

    /// Longest time a single command can block the caller
    pub fn command_budget(&self) -> Duration {
        self.poll_interval * self.max_polls
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatistics {
    pub commands_sent: u64,
    pub commands_succeeded: u64,
    pub commands_failed: u64,
    pub timeouts: u64,
    /// Timed out commands whose completion was observed later
    pub late_completions: u64,
}

/// Trait for session types that can execute commands
/// This allows the API layer to remain transport-agnostic while working with sessions
pub trait CommandSession {
    /// Execute a command on the open chip application and return its
    /// response payload
    fn execute(&mut self, command: ChipCommand) -> SessionResult<Vec<u8>>;

    fn state(&self) -> SessionState;
}

/// Chip application session borrowing a transport and a delay primitive
pub struct ChipSession<'t> {
    transport: &'t mut dyn ChipTransport,
    delay: &'t dyn Delay,
    config: SessionConfig,
    state: SessionState,
    instance: Option<InstanceHandle>,
    in_flight: Option<Arc<CompletionLatch>>,
    stats: SessionStatistics,
}

impl<'t> ChipSession<'t> {
    /// Create a closed session with the default configuration
    pub fn new(transport: &'t mut dyn ChipTransport, delay: &'t dyn Delay) -> Self {
        Self::with_config(transport, delay, SessionConfig::default())
    }

    pub fn with_config(
        transport: &'t mut dyn ChipTransport,
        delay: &'t dyn Delay,
        config: SessionConfig,
    ) -> Self {
        Self {
            transport,
            delay,
            config,
            state: SessionState::Closed,
            instance: None,
            in_flight: None,
            stats: SessionStatistics::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.stats
    }

    /// Instance held for the open application
    pub fn application_instance(&self) -> Option<InstanceHandle> {
        self.instance
    }

    /// True while a timed out command has not completed
    pub fn has_command_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|latch| latch.status().is_busy())
    }

    /// Open the chip application.
    ///
    /// On failure the session stays closed and no instance is retained.
    pub fn open(&mut self) -> SessionResult<()> {
        if self.state != SessionState::Closed {
            return Err(SessionError::InvalidState {
                current: self.state,
                expected: SessionState::Closed,
            });
        }
        self.check_in_flight()?;

        self.state = SessionState::Opening;
        debug!("Opening chip application");

        let envelope = self.envelope();
        let command = ChipCommand::OpenApplication {
            restore_context: self.config.restore_context,
        };
        let mut scoped = match ScopedInstance::create(&mut *self.transport) {
            Ok(scoped) => scoped,
            Err(err) => {
                self.state = SessionState::Closed;
                error!("Failed to create application instance: {}", err);
                return Err(SessionError::InstanceCreationFailed(err));
            }
        };

        self.stats.commands_sent += 1;
        let outcome = envelope
            .run(|completion| scoped.issue(command, completion))
            .map(|_| scoped.into_handle());

        match outcome {
            Ok(handle) => {
                self.stats.commands_succeeded += 1;
                self.instance = Some(handle);
                self.state = SessionState::Open;
                info!("Chip application open on instance {}", handle);
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Closed;
                let err = self.record_failure(err);
                error!("Failed to open chip application: {}", err);
                Err(err)
            }
        }
    }

    /// Close the chip application.
    ///
    /// A session that is not open is left untouched. Otherwise the session
    /// ends up closed with its instance released, even when the close
    /// command itself fails.
    pub fn close(&mut self) -> SessionResult<()> {
        if self.state != SessionState::Open {
            return Err(SessionError::NotOpen);
        }

        self.state = SessionState::Closing;
        debug!("Closing chip application");

        let result = match self.instance.take() {
            Some(handle) => self.close_instance(handle),
            None => Ok(()),
        };
        self.state = SessionState::Closed;

        match &result {
            Ok(()) => info!("Chip application closed"),
            Err(err) => warn!("Chip application closed with error: {}", err),
        }
        result
    }

    fn close_instance(&mut self, handle: InstanceHandle) -> SessionResult<()> {
        let in_flight = self.check_in_flight();
        let envelope = self.envelope();
        let command = ChipCommand::CloseApplication {
            hibernate: self.config.hibernate_on_close,
        };
        let mut scoped = ScopedInstance::adopt(&mut *self.transport, handle);
        in_flight?;

        self.stats.commands_sent += 1;
        let outcome = envelope.run(|completion| scoped.issue(command, completion));
        drop(scoped);
        self.finish(outcome).map(|_| ())
    }

    /// Execute one command on a fresh instance that is released before
    /// returning.
    pub fn execute(&mut self, command: ChipCommand) -> SessionResult<Vec<u8>> {
        if self.state != SessionState::Open {
            return Err(SessionError::NotOpen);
        }
        self.check_in_flight()?;

        let name = command.name();
        let envelope = self.envelope();
        let mut scoped = ScopedInstance::create(&mut *self.transport)
            .map_err(SessionError::InstanceCreationFailed)?;

        self.stats.commands_sent += 1;
        debug!("Issuing {} on instance {}", name, scoped.handle());
        let outcome = envelope.run(|completion| scoped.issue(command, completion));
        drop(scoped);

        self.finish(outcome).inspect_err(|err| debug!("{} failed: {}", name, err))
    }

    fn envelope(&self) -> CommandEnvelope<'t> {
        CommandEnvelope::new(self.delay, self.config.max_polls, self.config.poll_interval)
    }

    fn finish(&mut self, outcome: Result<Vec<u8>, EnvelopeError>) -> SessionResult<Vec<u8>> {
        match outcome {
            Ok(payload) => {
                self.stats.commands_succeeded += 1;
                Ok(payload)
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    fn record_failure(&mut self, err: EnvelopeError) -> SessionError {
        self.stats.commands_failed += 1;
        match err {
            EnvelopeError::Rejected(err) => SessionError::CommandRejected(err),
            EnvelopeError::Device(code) => SessionError::DeviceError(code),
            EnvelopeError::Timeout { polls, latch } => {
                self.stats.timeouts += 1;
                self.in_flight = Some(latch);
                SessionError::Timeout { polls }
            }
            EnvelopeError::Delay { error, latch } => {
                self.in_flight = Some(latch);
                SessionError::OsalError(error)
            }
        }
    }

    /// Refuse to issue while a timed out command is still running.
    fn check_in_flight(&mut self) -> SessionResult<()> {
        if let Some(latch) = self.in_flight.as_ref() {
            let status = latch.status();
            if status.is_busy() {
                warn!("Refusing new command: previous command still in flight");
                return Err(SessionError::CommandInFlight);
            }
            debug!("Discarding late completion ({:?})", status);
            self.stats.late_completions += 1;
            self.in_flight = None;
        }
        Ok(())
    }
}

impl CommandSession for ChipSession<'_> {
    fn execute(&mut self, command: ChipCommand) -> SessionResult<Vec<u8>> {
        ChipSession::execute(self, command)
    }

    fn state(&self) -> SessionState {
        self.state
    }
}

impl Drop for ChipSession<'_> {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            if let Err(err) = self.close() {
                warn!("Close on drop failed: {}", err);
            }
        }
    }
}
