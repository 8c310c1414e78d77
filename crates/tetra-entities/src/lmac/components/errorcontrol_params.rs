use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

/// Error control parameters per logical channel (Clause 8, tables 8.1/8.2
/// for phase modulation). type1 = MAC bits, type2 = type1 + CRC + tail,
/// type345 = punctured and interleaved block as transmitted.
#[derive(Debug)]
pub struct ErrorControlParams {
    pub type345_bits: usize,
    pub type2_bits: usize,
    pub type1_bits: usize,
    pub interleave_a: usize,
}

/// BSCH (Broadcast Synchronization Channel)
pub const BSCH_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 120,
    type2_bits: 80,
    type1_bits: 60,
    interleave_a: 11,
};

/// SCH/HD half-slot signalling, also STCH and BNCH
pub const SCH_HD_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 216,
    type2_bits: 144,
    type1_bits: 124,
    interleave_a: 101,
};

/// SCH/F full-slot signalling
pub const SCH_F_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 432,
    type2_bits: 288,
    type1_bits: 268,
    interleave_a: 103,
};

/// BBK (AACH): Reed-Muller coded, no interleaving or puncturing
pub const AACH_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 30,
    type2_bits: 30,
    type1_bits: 14,
    interleave_a: 0,
};

/// Parameters for a downlink signalling channel.
pub fn get_params(lchan: LogicalChannel) -> &'static ErrorControlParams {
    match lchan {
        LogicalChannel::Bsch => &BSCH_PARAMS,
        LogicalChannel::SchHd | LogicalChannel::Stch | LogicalChannel::Bnch => &SCH_HD_PARAMS,
        LogicalChannel::SchF => &SCH_F_PARAMS,
        LogicalChannel::Aach => &AACH_PARAMS,
        other => panic!("no error control params for {:?}", other),
    }
}
