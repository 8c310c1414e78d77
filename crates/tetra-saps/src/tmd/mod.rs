use tetra_core::BitBuffer;

use crate::tmv::enums::logical_chans::LogicalChannel;

/// Circuit-mode traffic handed to the U-plane sink: one slot's worth of
/// descrambled type-4 bits, bypassing the signalling FEC chain.
#[derive(Debug)]
pub struct TmdCircuitDataInd {
    pub block: BitBuffer,
    pub logical_channel: LogicalChannel,
    pub usage_marker: u8,
    /// Encryption mode last assigned to this usage marker
    pub encryption_mode: u8,
}
