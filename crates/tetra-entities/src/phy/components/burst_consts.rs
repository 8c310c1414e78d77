//! Block boundaries inside the 510-bit continuous downlink burst
//! (Clause 9.4.4, bit offsets into the burst window).

/// Burst length in bits
pub const FRAME_LEN: usize = 510;

// Synchronization burst (SB)
pub const SB_BKN1_OFFSET: usize = 94;
pub const SB_BKN1_BITS: usize = 120;
pub const SB_BBK_OFFSET: usize = 252;
pub const SB_BKN2_OFFSET: usize = 282;

// Normal downlink burst (NDB); the broadcast block is split around the
// training sequence
pub const NDB_BKN1_OFFSET: usize = 14;
pub const NDB_BKN_BITS: usize = 216;
pub const NDB_BBK1_OFFSET: usize = 230;
pub const NDB_BBK1_BITS: usize = 14;
pub const NDB_BBK2_OFFSET: usize = 266;
pub const NDB_BBK2_BITS: usize = 16;
pub const NDB_BKN2_OFFSET: usize = 282;

/// Broadcast block length (both burst types)
pub const BBK_BITS: usize = 30;
