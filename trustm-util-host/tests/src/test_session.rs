// Licensed under the Apache-2.0 license

//! Integration tests for the chip session
//!
//! Lifecycle, per-operation instances and recovery from commands that time
//! out, using the scriptable transport and a virtual clock.

use crate::common::{test_constants::*, MockChip, MockTransport, Reply, VirtualDelay};
use std::time::Duration;
use trustm_util_host_command_types::{
    device_status, ChipCommand, DataObjectRef, ObjectId, CHIP_UID_LEN,
};
use trustm_util_host_osal::OsalError;
use trustm_util_host_session::{ChipSession, SessionConfig, SessionError, SessionState};
use trustm_util_host_transport::TransportError;

fn read_uid_command() -> ChipCommand {
    ChipCommand::ReadData {
        object: DataObjectRef::whole(ObjectId::COPROCESSOR_UID, CHIP_UID_LEN as u16),
    }
}

#[test]
fn test_session_open_close_open() {
    println!("Testing session lifecycle...");
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(session.state(), SessionState::Closed);

    session.open().expect("Failed to open session");
    assert_eq!(session.state(), SessionState::Open);
    assert!(session.application_instance().is_some());
    assert_eq!(probe.live_instances(), 1, "open session holds one instance");

    session.close().expect("Failed to close session");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.application_instance().is_none());
    assert_eq!(probe.live_instances(), 0);

    session.open().expect("Failed to reopen session");
    assert_eq!(session.state(), SessionState::Open);
    session.close().expect("Failed to close session");

    assert_eq!(
        probe.issued(),
        vec![
            "open_application",
            "close_application",
            "open_application",
            "close_application"
        ]
    );
    println!("Lifecycle commands: {:?}", probe.issued());
}

#[test]
fn test_session_close_when_closed_is_noop() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(session.close(), Err(SessionError::NotOpen));
    assert_eq!(session.state(), SessionState::Closed);

    drop(session);
    assert_eq!(probe.created(), 0, "no transport call expected");
    assert!(probe.issued().is_empty());
}

#[test]
fn test_session_open_twice_is_rejected() {
    let mut transport = MockTransport::new(MockChip::new());
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    assert_eq!(
        session.open(),
        Err(SessionError::InvalidState {
            current: SessionState::Open,
            expected: SessionState::Closed,
        })
    );
    assert_eq!(session.state(), SessionState::Open);
}

#[test]
fn test_session_open_instance_creation_failure() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    probe.set_fail_create(true);
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(
        session.open(),
        Err(SessionError::InstanceCreationFailed(
            TransportError::ResourceExhausted
        ))
    );
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.application_instance().is_none());
    assert!(probe.issued().is_empty());
}

#[test]
fn test_session_open_device_error_releases_instance() {
    let chip = MockChip::new();
    chip.fail_command("open_application", device_status::DEVICE_ERROR);
    let mut transport = MockTransport::new(chip);
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(
        session.open(),
        Err(SessionError::DeviceError(device_status::DEVICE_ERROR))
    );
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.application_instance().is_none());
    assert_eq!(probe.live_instances(), 0);
    assert_eq!(probe.destroyed(), 1);
}

#[test]
fn test_session_open_rejected_does_not_wait() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    probe.push_reply(Reply::Reject(TransportError::Busy));
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(
        session.open(),
        Err(SessionError::CommandRejected(TransportError::Busy))
    );
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(delay.polls(), 0);
    assert_eq!(probe.live_instances(), 0);
}

#[test]
fn test_session_open_timeout_then_late_completion() {
    println!("Testing open timeout and recovery...");
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    probe.push_reply(Reply::Hold);
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(session.open(), Err(SessionError::Timeout { polls: 50 }));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(probe.live_instances(), 0, "timed out open keeps no instance");
    assert_eq!(delay.elapsed(), Duration::from_millis(2500));
    assert!(session.has_command_in_flight());

    // Still running on the chip: nothing new may be issued
    assert_eq!(session.open(), Err(SessionError::CommandInFlight));
    assert_eq!(probe.issued().len(), 1);

    assert!(probe.release(Ok(Vec::new())));
    assert!(!session.has_command_in_flight());

    session.open().expect("open after late completion");
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(session.statistics().late_completions, 1);
    assert_eq!(session.statistics().timeouts, 1);
    println!("Statistics: {:?}", session.statistics());
}

#[test]
fn test_session_execute_requires_open() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    assert_eq!(
        session.execute(read_uid_command()),
        Err(SessionError::NotOpen)
    );
    drop(session);
    assert_eq!(probe.created(), 0);
}

#[test]
fn test_session_instance_per_operation() {
    println!("Testing per-operation instance release...");
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    for _ in 0..3 {
        let uid = session
            .execute(read_uid_command())
            .expect("Failed to read UID");
        assert_eq!(uid, TEST_CHIP_UID.to_vec());
        assert_eq!(probe.live_instances(), 1, "only the application instance stays");
    }

    assert_eq!(probe.created(), 4);
    assert_eq!(probe.destroyed(), 3);
    assert!(
        probe.busy_at_issue().iter().all(|busy| *busy),
        "every latch must be Busy when its command is issued"
    );
}

#[test]
fn test_session_execute_failure_releases_instance() {
    let chip = MockChip::new();
    let mut transport = MockTransport::new(chip.clone());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);
    session.open().expect("Failed to open session");

    let missing = ChipCommand::ReadData {
        object: DataObjectRef::whole(ObjectId::APPLICATION_DATA_1, 16),
    };
    assert_eq!(
        session.execute(missing),
        Err(SessionError::DeviceError(device_status::INVALID_OBJECT_ID))
    );
    assert_eq!(probe.live_instances(), 1);
    assert_eq!(session.state(), SessionState::Open);

    probe.push_reply(Reply::Reject(TransportError::Busy));
    assert_eq!(
        session.execute(read_uid_command()),
        Err(SessionError::CommandRejected(TransportError::Busy))
    );
    assert_eq!(probe.live_instances(), 1);
}

#[test]
fn test_session_execute_timeout_blocks_until_completed() {
    println!("Testing in-flight guard after a command timeout...");
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);
    session.open().expect("Failed to open session");

    probe.push_reply(Reply::Hold);
    assert_eq!(
        session.execute(read_uid_command()),
        Err(SessionError::Timeout { polls: 50 })
    );
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(probe.live_instances(), 1);

    assert_eq!(
        session.execute(read_uid_command()),
        Err(SessionError::CommandInFlight)
    );

    // A late device error is discarded like a late success
    assert!(probe.release(Err(device_status::DEVICE_ERROR)));
    let uid = session
        .execute(read_uid_command())
        .expect("command after late completion");
    assert_eq!(uid.len(), CHIP_UID_LEN);

    let stats = session.statistics();
    assert_eq!(stats.timeouts, 1);
    assert_eq!(stats.late_completions, 1);
}

#[test]
fn test_session_close_failure_still_closes() {
    let chip = MockChip::new();
    chip.fail_command("close_application", device_status::DEVICE_ERROR);
    let mut transport = MockTransport::new(chip);
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    assert_eq!(
        session.close(),
        Err(SessionError::DeviceError(device_status::DEVICE_ERROR))
    );
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.application_instance().is_none());
    assert_eq!(probe.live_instances(), 0);
}

#[test]
fn test_session_close_timeout_still_closes() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    probe.push_reply(Reply::Hold);
    assert_eq!(session.close(), Err(SessionError::Timeout { polls: 50 }));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(probe.live_instances(), 0);
}

#[test]
fn test_session_close_with_command_in_flight() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    probe.push_reply(Reply::Hold);
    assert!(session.execute(read_uid_command()).is_err());

    assert_eq!(session.close(), Err(SessionError::CommandInFlight));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(probe.live_instances(), 0, "instance released regardless");
    assert!(!probe.issued().contains(&"close_application"));
}

#[test]
fn test_session_delay_failure() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::failing_at(1);
    let mut session = ChipSession::new(&mut transport, &delay);

    probe.push_reply(Reply::Hold);
    assert_eq!(
        session.open(),
        Err(SessionError::OsalError(OsalError::Interrupted))
    );
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.has_command_in_flight());
}

#[test]
fn test_session_drop_closes_application() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();

    {
        let mut session = ChipSession::new(&mut transport, &delay);
        session.open().expect("Failed to open session");
    }

    assert_eq!(probe.issued(), vec!["open_application", "close_application"]);
    assert_eq!(probe.live_instances(), 0);
}

#[test]
fn test_session_config_reaches_chip() {
    let mut transport = MockTransport::new(MockChip::new());
    let probe = transport.probe();
    let delay = VirtualDelay::new();
    let config = SessionConfig::default()
        .with_restore_context(true)
        .with_hibernate_on_close(true)
        .with_max_polls(10)
        .with_poll_interval(Duration::from_millis(5));
    assert_eq!(config.command_budget(), Duration::from_millis(50));

    let mut session = ChipSession::with_config(&mut transport, &delay, config);
    session.open().expect("Failed to open session");
    session.close().expect("Failed to close session");

    assert_eq!(
        probe.issued_commands(),
        vec![
            ChipCommand::OpenApplication {
                restore_context: true
            },
            ChipCommand::CloseApplication { hibernate: true },
        ]
    );

    probe.push_reply(Reply::Hold);
    assert_eq!(session.open(), Err(SessionError::Timeout { polls: 10 }));
    assert_eq!(delay.elapsed(), Duration::from_millis(50));
}

#[test]
fn test_session_statistics() {
    let chip = MockChip::new();
    let mut transport = MockTransport::new(chip.clone());
    let delay = VirtualDelay::new();
    let mut session = ChipSession::new(&mut transport, &delay);

    session.open().expect("Failed to open session");
    session.execute(read_uid_command()).expect("read UID");
    chip.fail_command("read_data", device_status::ACCESS_CONDITION_NOT_SATISFIED);
    assert!(session.execute(read_uid_command()).is_err());

    let stats = session.statistics().clone();
    println!("Statistics: {:?}", stats);
    assert_eq!(stats.commands_sent, 3);
    assert_eq!(stats.commands_succeeded, 2);
    assert_eq!(stats.commands_failed, 1);
    assert_eq!(stats.timeouts, 0);
}
