// Licensed under the Apache-2.0 license

//! Trust M Utility Host Library
//!
//! Host-side driver core for an OPTIGA Trust M style secure element. Every
//! chip command is asynchronous: the host issues it, waits cooperatively for
//! a completion within a bounded poll budget, then collects the result.
//!
//! - **command-types**: Object ids, chip commands, UID layout, certificate formats
//! - **transport**: Completion latch and the asynchronous transport trait
//! - **session**: Command envelope and the chip application session
//! - **crypto**: Host-side certificate and signature verification
//! - **commands**: High-level API functions, chip authentication, provisioning
//! - **osal**: Cooperative delay primitives
//!
//! ## Architecture Overview
//!
//! ```text
//!     ┌─────────────────┐    ┌─────────────────┐
//!     │ trustm-         │    │ trustm-         │
//!     │ commands        │───►│ crypto          │
//!     │ (High-level API)│    │ (HostCrypto)    │
//!     └─────────────────┘    └─────────────────┘
//!              │
//!     ┌──────────────────┐
//!     │ trustm-session   │         ┌─────────────────┐
//!     │ (ChipSession,    │◄────────│ Delay           │
//!     │  envelope)       │         │ (std, RTOS tick)│
//!     └──────────────────┘         └─────────────────┘
//!              │
//!     ┌──────────────────┐         ┌─────────────────┐
//!     │ trustm-transport │◄────────│ ChipDevice      │
//!     │ (latch, worker)  │         │ (driver, sim)   │
//!     └──────────────────┘         └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trustm_util_host::*;
//!
//! let mut transport = WorkerTransport::spawn(my_device, WorkerConfig::default())?;
//! let delay = StdDelay;
//! let mut session = ChipSession::new(&mut transport, &delay);
//! session.open()?;
//!
//! let mut crypto = RustCryptoProvider::new();
//! let chip = trustm_cmd_authenticate_chip(
//!     &mut session,
//!     &mut crypto,
//!     &OPTIGA_TRUST_CA_101,
//!     &AuthenticationConfig::default(),
//! )?;
//!
//! session.close()?;
//! ```

// Re-export main public APIs for convenience
pub use trustm_util_host_command_types::{
    ChipCommand, ChipCommandId, ChipUid, DataObjectRef, ObjectId, WriteMode,
};
pub use trustm_util_host_commands::api::{
    trustm_cmd_authenticate_chip, trustm_cmd_fetch_chip_certificate, trustm_cmd_read_data,
    trustm_cmd_read_uid, trustm_cmd_write_data, trustm_provision_credentials,
    AuthenticatedChip, AuthenticationConfig, ChipApiError, ChipResult, CredentialProvisioner,
    ProvisioningParams,
};
pub use trustm_util_host_crypto::{
    HostCrypto, RustCryptoProvider, OPTIGA_TRUST_CA_101, OPTIGA_TRUST_TEST_CA,
};
pub use trustm_util_host_osal::{Delay, StdDelay, TickDelay};
pub use trustm_util_host_session::{ChipSession, CommandSession, SessionConfig, SessionState};
pub use trustm_util_host_transport::{
    ChipDevice, ChipTransport, Completion, CompletionLatch, LatchStatus, WorkerConfig,
    WorkerTransport,
};

// Re-export error types
pub use trustm_util_host_crypto::CryptoError;
pub use trustm_util_host_session::SessionError;
pub use trustm_util_host_transport::TransportError;
