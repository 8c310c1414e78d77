pub mod enums;

use tetra_core::{BitBuffer, BurstType, PhyBlockNum, TdmaTime};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// The TMV-UNITDATA indication delivers a received MAC block (type-1 bits)
/// from the lower MAC to the upper MAC.
#[derive(Debug)]
pub struct TmvUnitdataInd {
    pub pdu: BitBuffer,
    pub logical_channel: LogicalChannel,
    /// Not in the standard; the upper MAC needs the slot position to tell
    /// the two half-slot blocks of a stolen burst apart.
    pub block_num: PhyBlockNum,
    /// Not in the standard either; threaded through so the SYNC report can
    /// name the burst type it arrived on.
    pub burst_type: BurstType,
    /// True when no CRC exists for the block type (AACH)
    pub crc_pass: bool,
    pub scrambling_code: u32,
}

/// Clause 23.2.1 TMV-CONFIGURE: the upper MAC informs the lower MAC about
/// the channel configuration or the format of the slot being received.
#[derive(Debug, Default)]
pub struct TmvConfigureReq {
    /// New scrambling code, after a BSCH decode changed the cell identity
    pub scrambling_code: Option<u32>,
    /// TDMA time recovered from a SYNC PDU
    pub time: Option<TdmaTime>,
    /// Downlink usage from the AACH: traffic or signalling
    pub is_traffic: Option<bool>,
    /// MAC-RESOURCE announced that the second half slot is stolen too
    pub second_half_stolen: Option<bool>,
}
