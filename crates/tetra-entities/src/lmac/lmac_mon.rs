use tetra_config::SharedConfig;
use tetra_core::cell::SCRAMB_INIT;
use tetra_core::{PhyBlockNum, PhyBlockType, Sap, TdmaTime, TetraEntity};
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::tp::TpUnitdataInd;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::lmac::components::errorcontrol;
use crate::{MessagePrio, MessageQueue, TetraEntityTrait};

/// Per-burst state; the stolen flag lives for the current burst only.
#[derive(Default)]
struct CurBurst {
    blk2_stolen: bool,
}

/// Lower MAC of the monitor: consumes physical blocks, runs the channel
/// decoding chain and hands type-1 bits with their logical channel to the
/// upper MAC. Owns the TDMA time, advancing it once per received burst
/// window and adopting the time from decoded SYNC PDUs.
pub struct LmacMon {
    config: SharedConfig,

    /// Current cell scrambling code; the predefined BSCH code until the
    /// upper MAC derives the real one from a SYNC PDU
    scrambling_code: u32,

    dltime: TdmaTime,

    /// Downlink usage from the most recent AACH
    is_traffic: bool,

    cur_burst: CurBurst,
}

impl LmacMon {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            scrambling_code: SCRAMB_INIT,
            dltime: TdmaTime::default(),
            is_traffic: false,
            cur_burst: CurBurst::default(),
        }
    }

    /// Current TDMA time, for inspection by tests
    pub fn time(&self) -> TdmaTime {
        self.dltime
    }

    pub fn scrambling_code(&self) -> u32 {
        self.scrambling_code
    }

    /// A burst window elapsed: advance time and reset per-burst state.
    fn rx_timeslot_ind(&mut self, message: &SapMsg) {
        let SapMsgInner::TpTimeslotInd(prim) = &message.msg else {
            panic!()
        };

        self.dltime = self.dltime.add_timeslots(1);
        self.cur_burst = CurBurst::default();
        tracing::debug!("burst window at {}: {:?}", self.dltime, prim.burst_type);
    }

    /// Logical channel for a received block, Clause 9.5.1.
    fn determine_logical_channel_dl(&self, blk: &TpUnitdataInd) -> LogicalChannel {
        match blk.block_type {
            // BBK is always AACH
            PhyBlockType::Bbk => LogicalChannel::Aach,
            // the first block of an SB burst is always the SYNC PDU
            PhyBlockType::Sb1 => LogicalChannel::Bsch,
            // the second half of an SB burst carries half-slot signalling
            PhyBlockType::Sb2 => LogicalChannel::SchHd,
            PhyBlockType::Ndb => {
                if self.is_traffic && self.dltime.f <= 17 {
                    match blk.block_num {
                        // a full traffic slot is TCH/S
                        PhyBlockNum::Both => LogicalChannel::TchS,
                        // the first half of a slot-flagged traffic burst is stolen
                        PhyBlockNum::Block1 => LogicalChannel::Stch,
                        // the second half only if the first block said so
                        PhyBlockNum::Block2 => {
                            if self.cur_burst.blk2_stolen {
                                LogicalChannel::Stch
                            } else {
                                // half-slot TCH; not decoded
                                LogicalChannel::Tch
                            }
                        }
                        PhyBlockNum::Undefined => LogicalChannel::Unknown,
                    }
                } else {
                    match blk.block_num {
                        PhyBlockNum::Both => LogicalChannel::SchF,
                        PhyBlockNum::Block1 => LogicalChannel::SchHd,
                        PhyBlockNum::Block2 => {
                            if self.dltime.is_mandatory_bnch() {
                                LogicalChannel::Bnch
                            } else {
                                LogicalChannel::SchHd
                            }
                        }
                        PhyBlockNum::Undefined => LogicalChannel::Unknown,
                    }
                }
            }
        }
    }

    fn submit_to_umac(&self, queue: &mut MessageQueue, prim: TmvUnitdataInd) {
        let m = SapMsg {
            sap: Sap::TmvSap,
            src: TetraEntity::Lmac,
            dest: TetraEntity::Umac,
            dltime: self.dltime,
            msg: SapMsgInner::TmvUnitdataInd(prim),
        };
        // The upper MAC must see this block before we decode the next one
        // of the same burst: the AACH decides traffic vs signalling, BSCH
        // refreshes the scrambling code, and a stolen first half announces
        // whether the second half is stolen too.
        queue.push_prio(m, MessagePrio::Immediate);
    }

    fn rx_bbk(&mut self, queue: &mut MessageQueue, bbk: TpUnitdataInd) {
        let type1 = errorcontrol::decode_aach(bbk.block, self.scrambling_code);

        self.submit_to_umac(
            queue,
            TmvUnitdataInd {
                pdu: type1,
                logical_channel: LogicalChannel::Aach,
                block_num: PhyBlockNum::Undefined,
                burst_type: bbk.burst_type,
                crc_pass: true,
                scrambling_code: self.scrambling_code,
            },
        );
    }

    fn rx_blk_traffic(&mut self, queue: &mut MessageQueue, blk: TpUnitdataInd, lchan: LogicalChannel) {
        if lchan != LogicalChannel::TchS {
            // TCH/4.8, TCH/2.4 and half-slot speech are not decoded
            tracing::trace!("rx_blk_traffic: ignoring {:?} block", lchan);
            return;
        }

        // traffic bypasses the signalling FEC chain: descramble only
        let type4 = errorcontrol::descramble_traffic(blk.block, self.scrambling_code);

        self.submit_to_umac(
            queue,
            TmvUnitdataInd {
                pdu: type4,
                logical_channel: lchan,
                block_num: blk.block_num,
                burst_type: blk.burst_type,
                crc_pass: true,
                scrambling_code: self.scrambling_code,
            },
        );
    }

    fn rx_blk_cp(&mut self, queue: &mut MessageQueue, blk: TpUnitdataInd, lchan: LogicalChannel) {
        let block_num = blk.block_num;
        let burst_type = blk.burst_type;

        // the BSCH is always scrambled with the predefined code
        let scrambling_code = if blk.block_type == PhyBlockType::Sb1 {
            SCRAMB_INIT
        } else {
            self.scrambling_code
        };

        let (type1, crc_pass) = errorcontrol::decode_cp(lchan, blk.block, scrambling_code);

        if !crc_pass {
            // drop the block; the burst's other blocks decode on their own
            tracing::debug!("rx_blk_cp {:?} at {}: CRC failed, block dropped", lchan, self.dltime);
            return;
        }
        tracing::debug!("rx_blk_cp {:?} CRC ok, type1 {}", lchan, type1.dump_bin());

        self.submit_to_umac(
            queue,
            TmvUnitdataInd {
                pdu: type1,
                logical_channel: lchan,
                block_num,
                burst_type,
                crc_pass,
                scrambling_code,
            },
        );
    }

    fn rx_tp_unitdata(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::TpUnitdataInd(prim) = message.msg else {
            panic!()
        };

        let lchan = self.determine_logical_channel_dl(&prim);
        tracing::trace!("rx_tp_unitdata: {:?} block -> {:?}", prim.block_type, lchan);

        match lchan {
            LogicalChannel::Aach => self.rx_bbk(queue, prim),
            lchan if lchan.is_traffic() => self.rx_blk_traffic(queue, prim, lchan),
            LogicalChannel::Unknown => {
                tracing::warn!("rx_tp_unitdata: unclassifiable block {:?}", prim.block_type);
            }
            _ => self.rx_blk_cp(queue, prim, lchan),
        }
    }

    fn rx_tmv_configure(&mut self, message: SapMsg) {
        let SapMsgInner::TmvConfigureReq(prim) = message.msg else {
            panic!()
        };

        if let Some(code) = prim.scrambling_code {
            if code != self.scrambling_code {
                tracing::debug!("scrambling code {:#010x} -> {:#010x}", self.scrambling_code, code);
            }
            self.scrambling_code = code;
        }

        if let Some(time) = prim.time {
            if time != self.dltime {
                tracing::debug!("TDMA time {} -> {} (SYNC)", self.dltime, time);
            }
            self.dltime = time;
        }

        if let Some(is_traffic) = prim.is_traffic {
            self.is_traffic = is_traffic;
        }

        if let Some(true) = prim.second_half_stolen {
            tracing::debug!("second half slot stolen at {}", self.dltime);
            self.cur_burst.blk2_stolen = true;
        }
    }

    fn rx_tp_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        if matches!(message.msg, SapMsgInner::TpTimeslotInd(_)) {
            self.rx_timeslot_ind(&message);
        } else {
            self.rx_tp_unitdata(queue, message);
        }
    }
}

impl TetraEntityTrait for LmacMon {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Lmac
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.sap {
            Sap::TpSap => self.rx_tp_prim(queue, message),
            Sap::TmvSap => self.rx_tmv_configure(message),
            _ => panic!("LmacMon: unexpected message on {:?}", message.sap),
        }
    }
}
