use tetra_core::{BitBuffer, BurstType, PhyBlockNum, PhyBlockType, TrainingSequence};

/// Signals that a 510-bit burst window elapsed on the downlink, before any
/// blocks of that window are delivered. The lower MAC advances TDMA time
/// on this primitive, so time also advances for windows whose burst type
/// could not be recognized (`burst_type == None`).
///
/// Not a primitive of the standard; the continuous downlink makes every
/// burst a timeslot, and the lower MAC needs to count them.
#[derive(Debug)]
pub struct TpTimeslotInd {
    pub burst_type: Option<BurstType>,
}

/// One received physical block (type-5 bits), as carved out of a burst by
/// the synchronizer.
#[derive(Debug)]
pub struct TpUnitdataInd {
    pub train_type: TrainingSequence,
    pub burst_type: BurstType,
    pub block_type: PhyBlockType,
    /// Undefined for BBK. For all others: Block1 | Block2 | Both
    pub block_num: PhyBlockNum,
    pub block: BitBuffer,
}
