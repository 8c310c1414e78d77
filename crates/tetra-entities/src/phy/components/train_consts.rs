//! Training sequences (Clause 9.4.4.3) and their positions inside a
//! 510-bit continuous downlink burst.

/* 9.4.4.3.2 Normal training sequences */
/// 22 n-bits
pub const SEQ_NORM1: [u8; 22] = [1, 1, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0];
/// 22 p-bits
pub const SEQ_NORM2: [u8; 22] = [0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 0];
/// q11..q22, opening a continuous downlink burst
pub const SEQ_NORM3_BEGIN: [u8; 12] = [0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1];
/// q1..q10, closing a continuous downlink burst
pub const SEQ_NORM3_END: [u8; 10] = [1, 0, 1, 1, 0, 1, 1, 1, 0, 0];

/* 9.4.4.3.4 Synchronization training sequence */
/// 38 y-bits
pub const SEQ_SYNC: [u8; 38] = [
    1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 1, 1, 1,
];

/// Offsets of the sequences within the burst window
pub const SEQ_NORM3_BEGIN_OFFSET: usize = 0;
pub const SEQ_NORM3_END_OFFSET: usize = 500;
pub const SEQ_SYNC_OFFSET: usize = 214;
pub const SEQ_NORM_OFFSET: usize = 244;
