// Licensed under the Apache-2.0 license

//! Async completion latch
//!
//! Each issued command gets its own latch. The issuing task keeps the latch
//! and polls it; the transport receives the matching [`Completion`] and
//! writes the terminal outcome exactly once, from whatever context the chip
//! response arrives in.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

const STATUS_BUSY: u32 = u32::MAX;
const STATUS_SUCCESS: u32 = 0;
const STATUS_DEVICE_ERROR: u32 = 0x0001_0000;

/// Terminal outcome written by a completion: the response payload or the
/// chip's status code.
pub type CompletionOutcome = Result<Vec<u8>, u16>;

/// Status observed through a latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchStatus {
    /// The command has been issued and has not completed yet
    Busy,
    Success,
    /// The chip completed the command with an error status
    DeviceError(u16),
}

impl LatchStatus {
    pub fn is_busy(self) -> bool {
        self == LatchStatus::Busy
    }

    fn encode(self) -> u32 {
        match self {
            LatchStatus::Busy => STATUS_BUSY,
            LatchStatus::Success => STATUS_SUCCESS,
            LatchStatus::DeviceError(code) => STATUS_DEVICE_ERROR | code as u32,
        }
    }

    fn decode(raw: u32) -> Self {
        match raw {
            STATUS_BUSY => LatchStatus::Busy,
            STATUS_SUCCESS => LatchStatus::Success,
            other => LatchStatus::DeviceError((other & 0xFFFF) as u16),
        }
    }
}

/// One-shot status cell shared between the waiting task and the completion.
pub struct CompletionLatch {
    status: AtomicU32,
    response: Mutex<CriticalSectionRawMutex, RefCell<Option<Vec<u8>>>>,
}

impl Default for CompletionLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionLatch {
    /// A new latch is already Busy.
    pub fn new() -> Self {
        Self {
            status: AtomicU32::new(STATUS_BUSY),
            response: Mutex::new(RefCell::new(None)),
        }
    }

    /// Allocate a Busy latch together with the completion that settles it.
    pub fn arm() -> (Arc<CompletionLatch>, Completion) {
        let latch = Arc::new(CompletionLatch::new());
        let completion = Completion {
            latch: latch.clone(),
        };
        (latch, completion)
    }

    /// Return the latch to Busy and drop any stored payload.
    pub fn reset(&self) {
        self.status.store(STATUS_BUSY, Ordering::Release);
        self.response.lock(|cell| cell.borrow_mut().take());
    }

    /// Read the current status without blocking.
    pub fn status(&self) -> LatchStatus {
        LatchStatus::decode(self.status.load(Ordering::Acquire))
    }

    /// Take the response payload of a successful command.
    ///
    /// Returns `None` while Busy, after an error, or once already taken.
    pub fn take_response(&self) -> Option<Vec<u8>> {
        if self.status() != LatchStatus::Success {
            return None;
        }
        self.response.lock(|cell| cell.borrow_mut().take())
    }

    fn publish(&self, outcome: CompletionOutcome) {
        let status = match outcome {
            Ok(payload) => {
                self.response
                    .lock(|cell| *cell.borrow_mut() = Some(payload));
                LatchStatus::Success
            }
            Err(code) => LatchStatus::DeviceError(code),
        };
        // Payload must be visible before the status leaves Busy.
        self.status.store(status.encode(), Ordering::Release);
    }
}

/// Write side of a [`CompletionLatch`].
///
/// Consumed by [`Completion::complete`], so a completion can settle its
/// latch at most once.
pub struct Completion {
    latch: Arc<CompletionLatch>,
}

impl Completion {
    /// True until the completion has been delivered.
    pub fn is_pending(&self) -> bool {
        self.latch.status().is_busy()
    }

    /// Status of the owning latch
    pub fn status(&self) -> LatchStatus {
        self.latch.status()
    }

    pub fn complete(self, outcome: CompletionOutcome) {
        self.latch.publish(outcome);
    }

    pub fn succeed(self, payload: Vec<u8>) {
        self.complete(Ok(payload))
    }

    pub fn fail(self, status_code: u16) {
        self.complete(Err(status_code))
    }
}

impl core::fmt::Debug for Completion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Completion")
            .field("status", &self.latch.status())
            .finish()
    }
}
