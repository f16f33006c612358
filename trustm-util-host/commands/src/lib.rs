// Licensed under the Apache-2.0 license

//! Trust M Commands Layer
//!
//! High-level operations built on an open chip session: data object access,
//! cryptographic commands, chip authentication and credential hand-off.

#![no_std]

extern crate alloc;

// Re-export command types for convenience
pub use trustm_util_host_command_types::*;

pub mod api;
