// Licensed under the Apache-2.0 license

//! Data object API functions
//!
//! - `trustm_cmd_read_data` - Read a range of a data object
//! - `trustm_cmd_write_data` - Write into a data object
//! - `trustm_cmd_read_uid` - Read and decode the coprocessor UID
//! - `trustm_cmd_update_count` - Advance a monotonic counter

use crate::api::{ChipApiError, ChipResult, CommandSession};
use alloc::vec::Vec;
use log::{debug, info};
use trustm_util_host_command_types::{
    ChipCommand, ChipUid, CommandError, DataObjectRef, ObjectId, WriteMode, CHIP_UID_LEN,
    MAX_DATA_OBJECT_LEN,
};

/// Read up to `object.length` bytes of a data object
///
/// # Parameters
///
/// - `session`: Open chip session
/// - `object`: Object id, offset and maximum length to read
///
/// # Returns
///
/// - `Ok(Vec<u8>)` with the bytes the chip returned (may be shorter than requested)
/// - `Err(ChipApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let cert = trustm_cmd_read_data(
///     &mut session,
///     DataObjectRef::whole(ObjectId::DEVICE_CERTIFICATE, MAX_CERTIFICATE_LEN),
/// )?;
/// ```
pub fn trustm_cmd_read_data(
    session: &mut dyn CommandSession,
    object: DataObjectRef,
) -> ChipResult<Vec<u8>> {
    if object.length == 0 || object.length > MAX_DATA_OBJECT_LEN {
        return Err(ChipApiError::InvalidParameter("read length out of range"));
    }

    let data = session.execute(ChipCommand::ReadData { object })?;
    if data.len() > object.length as usize {
        return Err(CommandError::InvalidResponse.into());
    }
    debug!("Read {} bytes from {}", data.len(), object.object_id);
    Ok(data)
}

/// Write `data` into a data object starting at `offset`
pub fn trustm_cmd_write_data(
    session: &mut dyn CommandSession,
    object_id: ObjectId,
    offset: u16,
    mode: WriteMode,
    data: &[u8],
) -> ChipResult<()> {
    if data.is_empty() {
        return Err(ChipApiError::InvalidParameter("nothing to write"));
    }
    if offset as usize + data.len() > MAX_DATA_OBJECT_LEN as usize {
        return Err(ChipApiError::InvalidParameter("write exceeds object size"));
    }

    session.execute(ChipCommand::WriteData {
        object_id,
        offset,
        mode,
        data: data.to_vec(),
    })?;
    debug!("Wrote {} bytes to {}", data.len(), object_id);
    Ok(())
}

/// Read the coprocessor UID and log the chip information report
///
/// # Returns
///
/// - `Ok(ChipUid)` decoded from object `0xE0C2`
/// - `Err(ChipApiError)` on failure or when the record has the wrong size
pub fn trustm_cmd_read_uid(session: &mut dyn CommandSession) -> ChipResult<ChipUid> {
    let raw = trustm_cmd_read_data(
        session,
        DataObjectRef::whole(ObjectId::COPROCESSOR_UID, CHIP_UID_LEN as u16),
    )?;
    let uid = ChipUid::from_bytes(&raw)?;

    info!("CIM identifier:      {:02x}", uid.cim_identifier);
    info!("Platform identifier: {:02x}", uid.platform_identifier);
    info!("Model identifier:    {:02x}", uid.model_identifier);
    info!("ROM mask id:         {}", hex::encode(&uid.rom_code));
    info!("Chip type:           {}", hex::encode(&uid.chip_type));
    info!("Batch number:        {}", hex::encode(&uid.batch_number));
    info!(
        "Wafer position:      x={} y={}",
        hex::encode(&uid.chip_position_x),
        hex::encode(&uid.chip_position_y)
    );
    info!("Firmware identifier: {}", hex::encode(&uid.firmware_identifier));
    info!(
        "Build number:        {} ({})",
        hex::encode(&uid.esw_build),
        uid.firmware_version()
    );

    Ok(uid)
}

/// Advance a monotonic counter object by `count`
pub fn trustm_cmd_update_count(
    session: &mut dyn CommandSession,
    object_id: ObjectId,
    count: u8,
) -> ChipResult<()> {
    if count == 0 {
        return Err(ChipApiError::InvalidParameter("count must be non-zero"));
    }
    session.execute(ChipCommand::UpdateCount { object_id, count })?;
    Ok(())
}
