use std::collections::VecDeque;

use tetra_config::SharedConfig;
use tetra_core::{BitBuffer, BurstType, PhyBlockNum, PhyBlockType, Sap, TdmaTime, TetraEntity, TrainingSequence};
use tetra_saps::tp::{TpTimeslotInd, TpUnitdataInd};
use tetra_saps::{SapMsg, SapMsgInner};

use super::components::burst_consts::*;
use super::components::train_consts::*;
use crate::MessageQueue;

/// Grace period after the last training sequence match: keep processing
/// this many burst windows on the counter alone before declaring loss of
/// synchronization.
const SYNC_GRACE_BURSTS: i64 = 50;

/// Highest acceptable Hamming distance when classifying a burst by its
/// training sequence.
const MAX_TRAIN_SEQ_ERRORS: u32 = 5;

/// Burst synchronizer: consumes one demodulated hard bit at a time,
/// recognizes 510-bit burst windows by the q-bits framing every
/// continuous downlink burst, classifies the burst by its training
/// sequence and slices it into physical blocks for the lower MAC.
///
/// Not a routed entity: it only produces messages, driven directly by the
/// input loop.
pub struct PhyMon {
    config: SharedConfig,

    /// Sliding window over the last up-to-510 received bits
    frame: VecDeque<u8>,

    synchronized: bool,
    /// Counts down once per received symbol while synchronized; burst
    /// windows are processed whenever it is a multiple of 510, so a fade
    /// does not move the burst grid
    sync_bit_counter: i64,

    /// Processed burst windows (matched or on the grace counter)
    bursts_processed: u64,
    /// Windows with a training sequence match
    bursts_matched: u64,
}

impl PhyMon {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            frame: VecDeque::with_capacity(FRAME_LEN),
            synchronized: false,
            sync_bit_counter: 0,
            bursts_processed: 0,
            bursts_matched: 0,
        }
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    pub fn bursts_processed(&self) -> u64 {
        self.bursts_processed
    }

    pub fn bursts_matched(&self) -> u64 {
        self.bursts_matched
    }

    /// Hamming distance between the window at `offset` and `pattern`.
    fn pattern_score(&self, offset: usize, pattern: &[u8]) -> u32 {
        pattern
            .iter()
            .enumerate()
            .map(|(i, &p)| (p ^ self.frame[offset + i]) as u32)
            .sum()
    }

    /// Burst matched: (re)arm the grace counter.
    fn reset_synchronizer(&mut self) {
        self.synchronized = true;
        self.sync_bit_counter = (FRAME_LEN as i64) * SYNC_GRACE_BURSTS;
    }

    /// Tick the grace counter; runs once per received symbol.
    fn count_down_sync(&mut self) {
        if !self.synchronized {
            return;
        }
        self.sync_bit_counter -= 1;
        if self.sync_bit_counter <= 0 {
            tracing::info!("synchronization lost");
            self.synchronized = false;
            self.sync_bit_counter = 0;
        }
    }

    /// Feed one hard bit. Returns true when a burst was recognized by its
    /// training sequence at this symbol.
    pub fn rx_symbol(&mut self, queue: &mut MessageQueue, sym: u8) -> bool {
        self.frame.push_back(sym & 1);

        if self.frame.len() < FRAME_LEN {
            self.count_down_sync();
            return false;
        }

        let score_begin = self.pattern_score(SEQ_NORM3_BEGIN_OFFSET, &SEQ_NORM3_BEGIN);
        let score_end = self.pattern_score(SEQ_NORM3_END_OFFSET, &SEQ_NORM3_END);
        let matched = score_begin == 0 && score_end < 2;

        if matched {
            self.reset_synchronizer();
        }

        if matched || (self.synchronized && self.sync_bit_counter % (FRAME_LEN as i64) == 0) {
            self.process_burst(queue);
            self.frame.clear();
        } else {
            self.frame.pop_front();
        }

        self.count_down_sync();
        matched
    }

    /// Classify a full window by its training sequence and hand its blocks
    /// to the lower MAC. Every processed window advances TDMA time, also
    /// when no burst is recognized in it.
    fn process_burst(&mut self, queue: &mut MessageQueue) {
        self.bursts_processed += 1;

        let score_sync = self.pattern_score(SEQ_SYNC_OFFSET, &SEQ_SYNC);
        let score_norm1 = self.pattern_score(SEQ_NORM_OFFSET, &SEQ_NORM1);
        let score_norm2 = self.pattern_score(SEQ_NORM_OFFSET, &SEQ_NORM2);

        let mut score_min = score_sync;
        let mut burst_type = BurstType::Sb;
        if score_norm1 < score_min {
            score_min = score_norm1;
            burst_type = BurstType::Ndb;
        }
        if score_norm2 < score_min {
            score_min = score_norm2;
            burst_type = BurstType::NdbSf;
        }

        let accepted = if score_min <= MAX_TRAIN_SEQ_ERRORS {
            Some(burst_type)
        } else {
            None
        };
        self.submit(
            queue,
            SapMsgInner::TpTimeslotInd(TpTimeslotInd { burst_type: accepted }),
        );

        let Some(burst_type) = accepted else {
            tracing::trace!("window rejected, best training sequence score {}", score_min);
            return;
        };
        self.bursts_matched += 1;

        let frame = self.frame.make_contiguous();
        match burst_type {
            BurstType::Sb => {
                // the SYNC block goes first so a fresh scrambling code is
                // in place for the rest of the burst
                let bkn1 = &frame[SB_BKN1_OFFSET..SB_BKN1_OFFSET + SB_BKN1_BITS];
                let bbk = &frame[SB_BBK_OFFSET..SB_BBK_OFFSET + BBK_BITS];
                let bkn2 = &frame[SB_BKN2_OFFSET..SB_BKN2_OFFSET + NDB_BKN_BITS];

                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::SyncTrainSeq,
                    PhyBlockType::Sb1,
                    PhyBlockNum::Block1,
                    BitBuffer::from_bits(bkn1),
                );
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::SyncTrainSeq,
                    PhyBlockType::Bbk,
                    PhyBlockNum::Undefined,
                    BitBuffer::from_bits(bbk),
                );
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::SyncTrainSeq,
                    PhyBlockType::Sb2,
                    PhyBlockNum::Block2,
                    BitBuffer::from_bits(bkn2),
                );
            }
            BurstType::Ndb => {
                // AACH first: it decides traffic or signalling mode for
                // the payload of this very burst
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::NormalTrainSeq1,
                    PhyBlockType::Bbk,
                    PhyBlockNum::Undefined,
                    Self::extract_bbk(frame),
                );

                // one full 432-bit block around the training sequence
                let mut both = Vec::with_capacity(2 * NDB_BKN_BITS);
                both.extend_from_slice(&frame[NDB_BKN1_OFFSET..NDB_BKN1_OFFSET + NDB_BKN_BITS]);
                both.extend_from_slice(&frame[NDB_BKN2_OFFSET..NDB_BKN2_OFFSET + NDB_BKN_BITS]);
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::NormalTrainSeq1,
                    PhyBlockType::Ndb,
                    PhyBlockNum::Both,
                    BitBuffer::from_bits(&both),
                );
            }
            BurstType::NdbSf => {
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::NormalTrainSeq2,
                    PhyBlockType::Bbk,
                    PhyBlockNum::Undefined,
                    Self::extract_bbk(frame),
                );

                let bkn1 = &frame[NDB_BKN1_OFFSET..NDB_BKN1_OFFSET + NDB_BKN_BITS];
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::NormalTrainSeq2,
                    PhyBlockType::Ndb,
                    PhyBlockNum::Block1,
                    BitBuffer::from_bits(bkn1),
                );

                let bkn2 = &frame[NDB_BKN2_OFFSET..NDB_BKN2_OFFSET + NDB_BKN_BITS];
                Self::submit_block(
                    queue,
                    burst_type,
                    TrainingSequence::NormalTrainSeq2,
                    PhyBlockType::Ndb,
                    PhyBlockNum::Block2,
                    BitBuffer::from_bits(bkn2),
                );
            }
        }
    }

    /// The NDB broadcast block sits in two pieces around the training
    /// sequence.
    fn extract_bbk(frame: &[u8]) -> BitBuffer {
        let mut bbk = Vec::with_capacity(BBK_BITS);
        bbk.extend_from_slice(&frame[NDB_BBK1_OFFSET..NDB_BBK1_OFFSET + NDB_BBK1_BITS]);
        bbk.extend_from_slice(&frame[NDB_BBK2_OFFSET..NDB_BBK2_OFFSET + NDB_BBK2_BITS]);
        BitBuffer::from_bits(&bbk)
    }

    fn submit_block(
        queue: &mut MessageQueue,
        burst_type: BurstType,
        train_type: TrainingSequence,
        block_type: PhyBlockType,
        block_num: PhyBlockNum,
        block: BitBuffer,
    ) {
        let prim = TpUnitdataInd {
            train_type,
            burst_type,
            block_type,
            block_num,
            block,
        };
        queue.push_back(SapMsg {
            sap: Sap::TpSap,
            src: TetraEntity::Phy,
            dest: TetraEntity::Lmac,
            // the lower MAC owns TDMA time; it restamps everything
            dltime: TdmaTime::default(),
            msg: SapMsgInner::TpUnitdataInd(prim),
        });
    }

    fn submit(&self, queue: &mut MessageQueue, msg: SapMsgInner) {
        queue.push_back(SapMsg {
            sap: Sap::TpSap,
            src: TetraEntity::Phy,
            dest: TetraEntity::Lmac,
            dltime: TdmaTime::default(),
            msg,
        });
    }
}
