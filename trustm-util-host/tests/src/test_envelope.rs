// Licensed under the Apache-2.0 license

//! Tests for the command envelope
//!
//! Issue, bounded wait and outcome collection, measured against a virtual
//! clock so the poll budget can be checked exactly.

use crate::common::VirtualDelay;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use trustm_util_host_osal::OsalError;
use trustm_util_host_session::{CommandEnvelope, EnvelopeError};
use trustm_util_host_transport::{Completion, LatchStatus, TransportError};

const MAX_POLLS: u32 = 50;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Slot = Rc<RefCell<Option<Completion>>>;

#[test]
fn test_envelope_budget() {
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);
    assert_eq!(envelope.budget(), Duration::from_millis(2500));
}

#[test]
fn test_envelope_immediate_completion_does_not_wait() {
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let response = envelope
        .run(|completion| {
            assert!(completion.is_pending(), "latch must be Busy at issue");
            completion.succeed(vec![1, 2, 3]);
            Ok(())
        })
        .expect("command should succeed");

    assert_eq!(response, vec![1, 2, 3]);
    assert_eq!(delay.polls(), 0);
}

#[test]
fn test_envelope_completion_during_wait() {
    println!("Delivering completion on the third poll...");
    let slot: Slot = Rc::new(RefCell::new(None));
    let hook_slot = slot.clone();
    let delay = VirtualDelay::with_hook(move |poll| {
        if poll == 3 {
            if let Some(completion) = hook_slot.borrow_mut().take() {
                completion.succeed(vec![0xAB; 4]);
            }
        }
    });
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let response = envelope
        .run(|completion| {
            *slot.borrow_mut() = Some(completion);
            Ok(())
        })
        .expect("command should succeed");

    assert_eq!(response, vec![0xAB; 4]);
    assert_eq!(delay.polls(), 3);
    assert_eq!(delay.elapsed(), Duration::from_millis(150));
}

#[test]
fn test_envelope_timeout_after_exact_budget() {
    println!("Waiting on a command that never completes...");
    let slot: Slot = Rc::new(RefCell::new(None));
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let result = envelope.run(|completion| {
        *slot.borrow_mut() = Some(completion);
        Ok(())
    });

    let latch = match result {
        Err(EnvelopeError::Timeout { polls, latch }) => {
            assert_eq!(polls, MAX_POLLS);
            latch
        }
        other => panic!("expected timeout, got {:?}", other),
    };
    println!(
        "Timed out after {} polls, {:?} of virtual time",
        delay.polls(),
        delay.elapsed()
    );
    assert_eq!(delay.polls(), 50);
    assert_eq!(delay.elapsed(), Duration::from_millis(2500));
    assert_eq!(latch.status(), LatchStatus::Busy);

    // The completion can still land after the caller gave up
    let completion = slot.borrow_mut().take().expect("completion held");
    completion.succeed(vec![9]);
    assert_eq!(latch.status(), LatchStatus::Success);
}

#[test]
fn test_envelope_rejection_fails_without_waiting() {
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let result = envelope.run(|_completion| Err(TransportError::Busy));

    assert!(matches!(
        result,
        Err(EnvelopeError::Rejected(TransportError::Busy))
    ));
    assert_eq!(delay.polls(), 0, "a rejected command must not be waited on");
}

#[test]
fn test_envelope_device_error_is_not_timeout() {
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let result = envelope.run(|completion| {
        completion.fail(0x8004);
        Ok(())
    });

    assert!(matches!(result, Err(EnvelopeError::Device(0x8004))));
    assert_eq!(delay.polls(), 0);
}

#[test]
fn test_envelope_delay_failure_returns_latch() {
    let slot: Slot = Rc::new(RefCell::new(None));
    let delay = VirtualDelay::failing_at(2);
    let envelope = CommandEnvelope::new(&delay, MAX_POLLS, POLL_INTERVAL);

    let result = envelope.run(|completion| {
        *slot.borrow_mut() = Some(completion);
        Ok(())
    });

    match result {
        Err(EnvelopeError::Delay { error, latch }) => {
            assert_eq!(error, OsalError::Interrupted);
            assert!(latch.status().is_busy());
        }
        other => panic!("expected delay failure, got {:?}", other),
    }
    assert_eq!(delay.polls(), 1);
}

#[test]
fn test_envelope_zero_poll_budget_times_out_immediately() {
    let slot: Slot = Rc::new(RefCell::new(None));
    let delay = VirtualDelay::new();
    let envelope = CommandEnvelope::new(&delay, 0, POLL_INTERVAL);

    let result = envelope.run(|completion| {
        *slot.borrow_mut() = Some(completion);
        Ok(())
    });

    assert!(matches!(result, Err(EnvelopeError::Timeout { polls: 0, .. })));
    assert_eq!(delay.polls(), 0);
}
