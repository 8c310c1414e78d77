use tetra_core::{BitBuffer, TetraAddress};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// Clause 20.4.1.1.4 TMA-UNITDATA indication: the MAC delivers a received
/// TM-SDU together with the address and channel it arrived on.
#[derive(Debug)]
pub struct TmaUnitdataInd {
    pub pdu: BitBuffer,
    pub logical_channel: LogicalChannel,
    pub main_address: TetraAddress,
    /// Air-interface encryption mode, recorded but never applied
    pub encryption_mode: u8,
    pub usage_marker: u8,
}
