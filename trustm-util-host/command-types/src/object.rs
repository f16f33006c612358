// Licensed under the Apache-2.0 license

//! Data object addressing
//!
//! Everything the chip stores (certificates, keys, counters, identity) lives
//! in a data object named by a 16-bit object identifier.

use core::fmt;

/// Identifier of a data object or key slot on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u16);

impl ObjectId {
    /// Coprocessor unique identifier
    pub const COPROCESSOR_UID: ObjectId = ObjectId(0xE0C2);
    /// Device certificate provisioned at manufacturing
    pub const DEVICE_CERTIFICATE: ObjectId = ObjectId(0xE0E0);
    /// User certificate slots
    pub const USER_CERTIFICATE_1: ObjectId = ObjectId(0xE0E1);
    pub const USER_CERTIFICATE_2: ObjectId = ObjectId(0xE0E2);
    pub const USER_CERTIFICATE_3: ObjectId = ObjectId(0xE0E3);
    /// Device private key paired with the device certificate
    pub const DEVICE_PRIVATE_KEY: ObjectId = ObjectId(0xE0F0);
    /// User ECC private key slots
    pub const ECC_PRIVATE_KEY_1: ObjectId = ObjectId(0xE0F1);
    pub const ECC_PRIVATE_KEY_2: ObjectId = ObjectId(0xE0F2);
    pub const ECC_PRIVATE_KEY_3: ObjectId = ObjectId(0xE0F3);
    /// RSA private key slots
    pub const RSA_PRIVATE_KEY_1: ObjectId = ObjectId(0xE0FC);
    pub const RSA_PRIVATE_KEY_2: ObjectId = ObjectId(0xE0FD);
    /// Volatile session context used for intermediate secrets
    pub const SESSION_CONTEXT: ObjectId = ObjectId(0xE100);
    /// Monotonic counters
    pub const MONOTONIC_COUNTER_1: ObjectId = ObjectId(0xE120);
    pub const MONOTONIC_COUNTER_2: ObjectId = ObjectId(0xE121);
    /// Application data object
    pub const APPLICATION_DATA_1: ObjectId = ObjectId(0xF1D0);

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl From<u16> for ObjectId {
    fn from(value: u16) -> Self {
        ObjectId(value)
    }
}

/// Largest data object the chip can hold.
pub const MAX_DATA_OBJECT_LEN: u16 = 1728;

/// Buffer size used when reading the device certificate.
pub const MAX_CERTIFICATE_LEN: u16 = 512;

/// A range inside a data object.
///
/// The chip validates the object id and the offset; the host only bounds the
/// requested length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataObjectRef {
    pub object_id: ObjectId,
    pub offset: u16,
    pub length: u16,
}

impl DataObjectRef {
    pub const fn new(object_id: ObjectId, offset: u16, length: u16) -> Self {
        Self {
            object_id,
            offset,
            length,
        }
    }

    /// Whole object starting at offset 0, up to `max_length` bytes.
    pub const fn whole(object_id: ObjectId, max_length: u16) -> Self {
        Self::new(object_id, 0, max_length)
    }
}

/// How a write is applied to the target object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite bytes starting at the offset
    #[default]
    Write,
    /// Erase the object first, then write
    EraseAndWrite,
}

/// Status codes reported by the chip when a command completes with an error.
pub mod device_status {
    /// Generic failure raised by the chip library itself
    pub const DEVICE_ERROR: u16 = 0x0107;
    pub const INVALID_OBJECT_ID: u16 = 0x8001;
    pub const INVALID_PARAMETER: u16 = 0x8003;
    pub const INVALID_LENGTH: u16 = 0x8004;
    pub const ACCESS_CONDITION_NOT_SATISFIED: u16 = 0x8007;
    pub const DATA_OBJECT_BOUNDARY_EXCEEDED: u16 = 0x8008;
    pub const INVALID_COMMAND: u16 = 0x800A;
    pub const SIGNATURE_VERIFICATION_FAILURE: u16 = 0x802C;
}
