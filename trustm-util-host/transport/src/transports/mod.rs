// Licensed under the Apache-2.0 license

//! Transport implementations

#[cfg(feature = "std")]
pub mod worker;
