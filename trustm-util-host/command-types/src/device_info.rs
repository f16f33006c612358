// Licensed under the Apache-2.0 license

//! Chip identity
//!
//! Layout of the coprocessor UID data object and the mapping from the
//! embedded software build number to a firmware release.

use crate::error::{CommandError, CommandResult};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Coprocessor UID record as stored in object `0xE0C2`.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
pub struct ChipUid {
    pub cim_identifier: u8,
    pub platform_identifier: u8,
    pub model_identifier: u8,
    pub rom_code: [u8; 2],
    pub chip_type: [u8; 6],
    pub batch_number: [u8; 6],
    pub chip_position_x: [u8; 2],
    pub chip_position_y: [u8; 2],
    pub firmware_identifier: [u8; 4],
    pub esw_build: [u8; 2],
}

pub const CHIP_UID_LEN: usize = core::mem::size_of::<ChipUid>();

impl ChipUid {
    pub fn from_bytes(data: &[u8]) -> CommandResult<Self> {
        Self::read_from_bytes(data).map_err(|_| CommandError::InvalidResponseLength {
            expected: CHIP_UID_LEN,
            actual: data.len(),
        })
    }

    /// Firmware release matching the embedded software build.
    pub fn firmware_version(&self) -> &'static str {
        match self.esw_build {
            [0x05, 0x10] => "V1.0.510",
            [0x07, 0x15] => "V1.1.715",
            [0x10, 0x48] => "V1.2.1048",
            [0x11, 0x12] => "V1.30.1112",
            [0x11, 0x18] => "V1.40.1118",
            _ => "Unknown",
        }
    }
}
