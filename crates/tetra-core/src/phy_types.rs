//! PHY-layer types shared by the burst synchronizer, the lower MAC and the
//! SAP primitives between them.

/// Continuous downlink burst types (Clause 9.4.4.1).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BurstType {
    /// Synchronization Downlink Burst
    Sb,
    /// Normal Downlink Burst, one full block
    Ndb,
    /// Normal Downlink Burst with the slot-flag training sequence
    /// (two half blocks, second possibly stolen)
    NdbSf,
}

/// Which physical block of a burst a bit sequence came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PhyBlockType {
    /// Broadcast block (AACH), 30 bits
    Bbk,
    /// First block of an SB burst (BSCH), 120 bits
    Sb1,
    /// Second block of an SB burst, 216 bits
    Sb2,
    /// Normal downlink block, 216 or 432 bits
    Ndb,
}

/// Position of a block within its timeslot.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PhyBlockNum {
    /// Full slot
    Both,
    /// First half slot
    Block1,
    /// Second half slot
    Block2,
    /// Not applicable (BBK)
    Undefined,
}

/// Training sequences recognized on the downlink (Clause 9.4.4.3).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TrainingSequence {
    /// 22 n bits
    NormalTrainSeq1,
    /// 22 p bits
    NormalTrainSeq2,
    /// 12 + 10 q bits framing a continuous downlink burst
    NormalTrainSeq3,
    /// 38 y bits
    SyncTrainSeq,
    #[default]
    NotFound,
}
