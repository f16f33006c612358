// Licensed under the Apache-2.0 license

//! OS Abstraction Layer (OSAL) for the Trust M Utility Host Library
//!
//! The chip protocol only needs one service from the host operating system:
//! a way to give up the processor for a bounded amount of time while an
//! asynchronous command is in progress. This crate provides that primitive
//! for hosted (std) and RTOS (no_std, tick based) environments.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod time;

pub use core::time::Duration;
pub use error::{OsalError, OsalResult};
#[cfg(feature = "std")]
pub use time::StdDelay;
pub use time::{Delay, TickDelay};

/// Get OSAL version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
