use tetra_config::SharedConfig;
use tetra_core::{BitBuffer, CellState, MacAddress, Sap, SsiType, TdmaTime, TetraEntity};
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmd::TmdCircuitDataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::tmv::{TmvConfigureReq, TmvUnitdataInd};
use tetra_saps::{SapMsg, SapMsgInner};

use tetra_pdus::mle::pdus::d_mle_sync::DMleSync;
use tetra_pdus::umac::enums::broadcast_type::BroadcastType;
use tetra_pdus::umac::enums::downlink_usage::DownlinkUsage;
use tetra_pdus::umac::enums::mac_pdu_type::MacPduType;
use tetra_pdus::umac::pdus::access_assign::AccessAssign;
use tetra_pdus::umac::pdus::access_define::AccessDefine;
use tetra_pdus::umac::pdus::mac_d_blck::{MAC_D_BLCK_BITS, MacDBlck};
use tetra_pdus::umac::pdus::mac_end::MacEndDl;
use tetra_pdus::umac::pdus::mac_frag::MacFragDl;
use tetra_pdus::umac::pdus::mac_resource::{LEN_SECOND_HALF_STOLEN, LEN_START_FRAG, MacResource, decode_length};
use tetra_pdus::umac::pdus::mac_sync::{MacSync, SYNC_TM_SDU_OFFSET};
use tetra_pdus::umac::pdus::mac_sysinfo::{MacSysinfo, SYSINFO_MIN_BITS, SYSINFO_TM_SDU_BITS};

use crate::umac::subcomp::defrag::MacDefrag;
use crate::umac::subcomp::fillbits;
use crate::{MessagePrio, MessageQueue, TetraEntityTrait};

/// A NULL PDU is 16 bits; anything shorter than this is not worth another
/// dissociation round (21.4.3.1).
const MIN_MAC_RESOURCE_BITS: usize = 40;

/// Hard cap on MAC PDUs dissociated out of one block.
const MAX_DISSOCIATED_PDUS: usize = 32;

/// Downlink usage state, refreshed by the AACH on every burst
/// (23.3.1.1).
#[derive(Debug, Clone, Copy)]
pub struct MacState {
    pub downlink_usage: DownlinkUsage,
    pub downlink_usage_marker: u8,
    pub logical_channel: LogicalChannel,
}

impl Default for MacState {
    fn default() -> Self {
        Self {
            downlink_usage: DownlinkUsage::CommonControl,
            downlink_usage_marker: 0,
            logical_channel: LogicalChannel::Unknown,
        }
    }
}

/// Upper MAC of the monitor: dissects MAC PDUs out of the logical
/// channels, maintains cell and addressing state, reassembles fragmented
/// TM-SDUs and hands them to the report sink.
pub struct UmacMon {
    config: SharedConfig,
    remove_fill_bits: bool,

    cell: CellState,
    mac_state: MacState,
    mac_address: MacAddress,
    /// Encryption mode per usage marker, for the U-plane (MAC traffic)
    usage_marker_encryption: [u8; 64],

    defrag: MacDefrag,
}

impl UmacMon {
    pub fn new(config: SharedConfig) -> Self {
        let remove_fill_bits = config.config().remove_fill_bits;
        Self {
            config,
            remove_fill_bits,
            cell: CellState::default(),
            mac_state: MacState::default(),
            mac_address: MacAddress::default(),
            usage_marker_encryption: [0; 64],
            defrag: MacDefrag::new(),
        }
    }

    // State accessors for tests

    pub fn cell(&self) -> &CellState {
        &self.cell
    }

    pub fn mac_state(&self) -> &MacState {
        &self.mac_state
    }

    pub fn mac_address(&self) -> &MacAddress {
        &self.mac_address
    }

    pub fn usage_marker_encryption(&self, marker: u8) -> u8 {
        self.usage_marker_encryption[marker as usize]
    }

    fn send_configure(&self, queue: &mut MessageQueue, dltime: TdmaTime, cfg: TmvConfigureReq) {
        let m = SapMsg {
            sap: Sap::TmvSap,
            src: TetraEntity::Umac,
            dest: TetraEntity::Lmac,
            dltime,
            msg: SapMsgInner::TmvConfigureReq(cfg),
        };
        // must reach the lower MAC before the next block of this burst
        queue.push_prio(m, MessagePrio::Immediate);
    }

    fn send_tm_sdu(
        &self,
        queue: &mut MessageQueue,
        dltime: TdmaTime,
        lchan: LogicalChannel,
        sdu: BitBuffer,
        encryption_mode: u8,
    ) {
        let m = SapMsg {
            sap: Sap::TmaSap,
            src: TetraEntity::Umac,
            dest: TetraEntity::Report,
            dltime,
            msg: SapMsgInner::TmaUnitdataInd(TmaUnitdataInd {
                pdu: sdu,
                logical_channel: lchan,
                main_address: self.mac_address.main_address(),
                encryption_mode,
                usage_marker: self.mac_address.usage_marker,
            }),
        };
        queue.push_back(m);
    }

    /// ACCESS-ASSIGN, Clause 21.4.7 / 23.3.1.1. Refreshes the downlink
    /// usage; frame 18 is control signalling by definition.
    fn rx_tmv_aach(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let dltime = message.dltime;
        let SapMsgInner::TmvUnitdataInd(mut prim) = message.msg else {
            panic!()
        };

        let pdu = match AccessAssign::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing AccessAssign: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::trace!("<- {}", pdu);

        self.mac_state.downlink_usage_marker = 0;
        if dltime.f == 18 {
            // frame 18 is reserved for control signalling (23.3.1.3)
            self.mac_state.downlink_usage = DownlinkUsage::CommonControl;
        } else {
            self.mac_state.downlink_usage = pdu.dl_usage();
            if let Some(marker) = pdu.dl_usage_marker() {
                self.mac_state.downlink_usage_marker = marker;
            }
        }

        self.send_configure(
            queue,
            dltime,
            TmvConfigureReq {
                is_traffic: Some(self.mac_state.downlink_usage == DownlinkUsage::Traffic),
                ..Default::default()
            },
        );
    }

    /// SYNC PDU on the BSCH, Clause 21.4.4.2. Recovers TDMA time and the
    /// cell scrambling code; the MLE part is forwarded as TM-SDU.
    fn rx_tmv_bsch(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let dltime = message.dltime;
        let SapMsgInner::TmvUnitdataInd(mut prim) = message.msg else {
            panic!()
        };

        let sync = match MacSync::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacSync: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        // the MCC/MNC belong to the MLE, but the scrambling code needs them
        let mle_sync = match DMleSync::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing DMleSync: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {} {}", sync, mle_sync);

        self.cell.update_identity(mle_sync.mcc, mle_sync.mnc, sync.colour_code);

        self.send_configure(
            queue,
            dltime,
            TmvConfigureReq {
                scrambling_code: Some(self.cell.scrambling_code),
                time: Some(sync.time),
                ..Default::default()
            },
        );

        if sync.time.is_mandatory_bsch() {
            tracing::info!(
                "BSCH {} MAC-SYNC colour_code {} MCC/MNC {}/{} freq {:.6} MHz burst {:?}",
                sync.time,
                self.cell.colour_code,
                self.cell.mcc,
                self.cell.mnc,
                self.cell.dl_freq_mhz(),
                prim.burst_type,
            );
        } else {
            tracing::debug!("BSCH {} MAC-SYNC outside the mandatory slot, burst {:?}", sync.time, prim.burst_type);
        }

        // TM-SDU: the 29 D-MLE-SYNC bits
        prim.pdu.seek(SYNC_TM_SDU_OFFSET);
        let sdu = BitBuffer::from_cursor(&prim.pdu);
        self.send_tm_sdu(queue, dltime, LogicalChannel::Bsch, sdu, self.mac_address.encryption_mode);
    }

    /// Full TCH/S slot: forwarded raw to the U-plane sink together with
    /// the encryption mode assigned to the current usage marker.
    fn rx_tmv_tch(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let dltime = message.dltime;
        let SapMsgInner::TmvUnitdataInd(prim) = message.msg else {
            panic!()
        };

        let marker = self.mac_state.downlink_usage_marker;
        let encryption_mode = self.usage_marker_encryption[marker as usize];
        tracing::info!(
            "TCH/S {} dl_usage_marker {} encr {}",
            dltime,
            marker,
            encryption_mode
        );

        let m = SapMsg {
            sap: Sap::TmdSap,
            src: TetraEntity::Umac,
            dest: TetraEntity::Report,
            dltime,
            msg: SapMsgInner::TmdCircuitDataInd(TmdCircuitDataInd {
                block: prim.pdu,
                logical_channel: prim.logical_channel,
                usage_marker: marker,
                encryption_mode,
            }),
        };
        queue.push_back(m);
    }

    /// Signalling block dissection with MAC PDU dissociation (23.4.3.3):
    /// after a complete MAC-RESOURCE, another PDU may follow in the same
    /// block. The window of `prim.pdu` is advanced past each dissociated
    /// PDU; everything else terminates the loop.
    fn rx_tmv_sch(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let dltime = message.dltime;
        let SapMsgInner::TmvUnitdataInd(mut prim) = message.msg else {
            panic!()
        };

        let mut pdu_count = 0;
        loop {
            pdu_count += 1;
            if pdu_count > MAX_DISSOCIATED_PDUS {
                tracing::warn!("dissociation stopped after {} PDUs in one block", MAX_DISSOCIATED_PDUS);
                break;
            }

            let Some(bits) = prim.pdu.peek_bits(3) else {
                tracing::warn!("insufficient bits for a MAC PDU header: {}", prim.pdu.dump_bin());
                break;
            };
            let pdu_type = MacPduType::try_from(bits >> 1).unwrap(); // 2 bits, total

            let continue_dissection = match pdu_type {
                MacPduType::MacResource => self.rx_mac_resource(queue, &mut prim, dltime),
                MacPduType::MacFragMacEnd => {
                    if bits & 1 == 0 {
                        self.rx_mac_frag(&mut prim, dltime);
                    } else {
                        self.rx_mac_end(queue, &mut prim, dltime);
                    }
                    false
                }
                MacPduType::Broadcast => {
                    self.rx_broadcast(queue, &mut prim, dltime);
                    false
                }
                MacPduType::MacDBlck => {
                    self.rx_mac_d_blck(queue, &mut prim, dltime);
                    false
                }
            };

            if !continue_dissection {
                break;
            }
            if prim.pdu.len() < MIN_MAC_RESOURCE_BITS {
                break;
            }
        }
    }

    /// MAC-RESOURCE, Clause 21.4.3.1. Returns true when dissociation may
    /// continue behind this PDU.
    fn rx_mac_resource(&mut self, queue: &mut MessageQueue, prim: &mut TmvUnitdataInd, dltime: TdmaTime) -> bool {
        assert!(prim.pdu.pos() == 0);

        let pdu = match MacResource::from_bitbuf(&mut prim.pdu, dltime.f == 18) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacResource: {:?} {}", e, prim.pdu.dump_bin());
                return false;
            }
        };
        tracing::debug!("<- {}", pdu);

        if pdu.is_null_pdu() {
            // every other field of a NULL PDU is discarded, and so is the
            // rest of the block
            tracing::trace!("MAC-RESOURCE NULL PDU");
            return false;
        }

        // refresh addressing state
        self.mac_address.address_type = pdu.addr_type.into_raw() as u8;
        self.mac_address.encryption_mode = pdu.encryption_mode;
        if let Some(addr) = pdu.addr {
            match addr.ssi_type {
                SsiType::Ssi => self.mac_address.ssi = addr.ssi,
                SsiType::Ussi => self.mac_address.ussi = addr.ssi,
                SsiType::Smi => self.mac_address.smi = addr.ssi,
                _ => {}
            }
        }
        if let Some(event_label) = pdu.event_label {
            self.mac_address.event_label = event_label;
        }
        if let Some(usage_marker) = pdu.usage_marker {
            // usage marker assignment also fixes its encryption mode
            self.mac_address.usage_marker = usage_marker;
            self.usage_marker_encryption[usage_marker as usize] = pdu.encryption_mode;
        }

        if pdu.length_ind == LEN_SECOND_HALF_STOLEN {
            self.send_configure(
                queue,
                dltime,
                TmvConfigureReq {
                    second_half_stolen: Some(true),
                    ..Default::default()
                },
            );
        }

        let header_bits = prim.pdu.pos();
        let mut pdu_len_bits = match pdu.length_ind {
            // a fragmenting PDU and a stolen-slot announcement both own
            // the rest of the block
            LEN_START_FRAG | LEN_SECOND_HALF_STOLEN => prim.pdu.len(),
            v => decode_length(v) as usize * 8,
        };
        if pdu_len_bits == 0 {
            tracing::debug!("MAC-RESOURCE with reserved length indication {}", pdu.length_ind);
            return false;
        }
        if pdu_len_bits > prim.pdu.len() {
            tracing::warn!(
                "MAC-RESOURCE length {} exceeds the block, truncating to {}",
                pdu_len_bits,
                prim.pdu.len()
            );
            pdu_len_bits = prim.pdu.len();
        }

        let num_fill_bits = if pdu.fill_bits && self.remove_fill_bits {
            fillbits::removal::get_num_fill_bits(&prim.pdu, pdu_len_bits, false)
        } else {
            0
        };
        if pdu_len_bits - num_fill_bits < header_bits {
            tracing::warn!("MAC-RESOURCE length {} shorter than its header", pdu_len_bits);
            return false;
        }

        // carve the SDU window out of the block
        let orig_end = prim.pdu.raw_end();
        prim.pdu.set_raw_end(prim.pdu.raw_start() + pdu_len_bits - num_fill_bits);

        if pdu.length_ind == LEN_START_FRAG {
            // first fragment; held back until MAC-END
            self.defrag
                .start(self.mac_address.main_address(), self.mac_address.usage_marker, dltime);
            let mut frag = BitBuffer::from_cursor(&prim.pdu);
            self.defrag.append(&mut frag, self.mac_address.main_address());
            prim.pdu.set_raw_end(orig_end);
            return false;
        }

        if prim.pdu.remaining() > 0 {
            let sdu = BitBuffer::from_cursor(&prim.pdu);
            self.send_tm_sdu(queue, dltime, prim.logical_channel, sdu, pdu.encryption_mode);
        } else {
            tracing::debug!("MAC-RESOURCE without TM-SDU");
        }

        // advance the window for a possibly following PDU
        prim.pdu.set_raw_end(orig_end);
        let next_start = prim.pdu.raw_start() + pdu_len_bits;
        prim.pdu.set_raw_pos(next_start);
        prim.pdu.set_raw_start(next_start);
        true
    }

    /// MAC-FRAG, Clause 21.4.3.2: continuation of a fragmented TM-SDU.
    fn rx_mac_frag(&mut self, prim: &mut TmvUnitdataInd, _dltime: TdmaTime) {
        assert!(prim.pdu.pos() == 0);

        let pdu = match MacFragDl::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacFragDl: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);

        // the fragment fills the block, minus fill bits
        let pdu_len_bits = prim.pdu.len();
        let num_fill_bits = if pdu.fill_bits && self.remove_fill_bits {
            fillbits::removal::get_num_fill_bits(&prim.pdu, pdu_len_bits, false)
        } else {
            0
        };
        prim.pdu.set_raw_end(prim.pdu.raw_start() + pdu_len_bits - num_fill_bits);

        let mut frag = BitBuffer::from_cursor(&prim.pdu);
        self.defrag.append(&mut frag, self.mac_address.main_address());
    }

    /// MAC-END, Clause 21.4.3.3: final fragment, releases the TM-SDU.
    fn rx_mac_end(&mut self, queue: &mut MessageQueue, prim: &mut TmvUnitdataInd, dltime: TdmaTime) {
        assert!(prim.pdu.pos() == 0);

        let pdu = match MacEndDl::from_bitbuf(&mut prim.pdu, dltime.f == 18) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacEndDl: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);

        if !pdu.length_valid() {
            tracing::debug!("MAC-END with reserved length indication {}, dropped", pdu.length_ind);
            self.defrag.stop();
            return;
        }

        let header_bits = prim.pdu.pos();
        let mut pdu_len_bits = decode_length(pdu.length_ind) as usize * 8;
        if pdu_len_bits > prim.pdu.len() {
            tracing::warn!(
                "MAC-END length {} exceeds the block, truncating to {}",
                pdu_len_bits,
                prim.pdu.len()
            );
            pdu_len_bits = prim.pdu.len();
        }
        let num_fill_bits = if pdu.fill_bits && self.remove_fill_bits {
            fillbits::removal::get_num_fill_bits(&prim.pdu, pdu_len_bits, false)
        } else {
            0
        };
        if pdu_len_bits - num_fill_bits < header_bits {
            tracing::warn!("MAC-END length {} shorter than its header", pdu_len_bits);
            self.defrag.stop();
            return;
        }
        prim.pdu.set_raw_end(prim.pdu.raw_start() + pdu_len_bits - num_fill_bits);

        let mut frag = BitBuffer::from_cursor(&prim.pdu);
        self.defrag.append(&mut frag, self.mac_address.main_address());

        let Some((sdu, address, usage_marker)) = self.defrag.take_sdu() else {
            tracing::debug!("MAC-END without a reassembled TM-SDU");
            return;
        };

        // the encryption mode in effect at MAC-END wins over whatever the
        // earlier fragments carried
        let encryption_mode = self.mac_address.encryption_mode;
        self.usage_marker_encryption[usage_marker as usize] = encryption_mode;

        let m = SapMsg {
            sap: Sap::TmaSap,
            src: TetraEntity::Umac,
            dest: TetraEntity::Report,
            dltime,
            msg: SapMsgInner::TmaUnitdataInd(TmaUnitdataInd {
                pdu: sdu,
                logical_channel: prim.logical_channel,
                main_address: address,
                encryption_mode,
                usage_marker,
            }),
        };
        queue.push_back(m);
    }

    /// Broadcast PDUs (21.4.4): SYSINFO or ACCESS-DEFINE.
    fn rx_broadcast(&mut self, queue: &mut MessageQueue, prim: &mut TmvUnitdataInd, dltime: TdmaTime) {
        let Some(bits) = prim.pdu.peek_bits_at(2, 2) else {
            tracing::warn!("broadcast PDU too short");
            return;
        };
        match BroadcastType::try_from(bits) {
            Ok(BroadcastType::Sysinfo) => self.rx_sysinfo(queue, prim, dltime),
            Ok(BroadcastType::AccessDefine) => self.rx_access_define(prim),
            _ => tracing::debug!("reserved broadcast type {}", bits),
        }
    }

    /// SYSINFO, Clause 21.4.4.1: adopt the downlink frequency, forward the
    /// 42-bit D-MLE-SYSINFO TM-SDU.
    fn rx_sysinfo(&mut self, queue: &mut MessageQueue, prim: &mut TmvUnitdataInd, dltime: TdmaTime) {
        if prim.pdu.len() < SYSINFO_MIN_BITS {
            tracing::warn!("SYSINFO of {} bits, minimum is {}", prim.pdu.len(), SYSINFO_MIN_BITS);
            return;
        }

        let pdu = match MacSysinfo::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacSysinfo: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);

        self.cell
            .update_dl_freq(pdu.freq_band, pdu.main_carrier, pdu.freq_offset_index);

        // TM-SDU: the 42 D-MLE-SYSINFO bits behind the MAC header
        let sdu_end = prim.pdu.raw_pos() + SYSINFO_TM_SDU_BITS;
        if sdu_end > prim.pdu.raw_end() {
            tracing::warn!("SYSINFO too short for its TM-SDU");
            return;
        }
        let orig_end = prim.pdu.raw_end();
        prim.pdu.set_raw_end(sdu_end);
        let sdu = BitBuffer::from_cursor(&prim.pdu);
        prim.pdu.set_raw_end(orig_end);
        self.send_tm_sdu(queue, dltime, LogicalChannel::Bnch, sdu, self.mac_address.encryption_mode);
    }

    /// ACCESS-DEFINE, Clause 21.4.4.3: no TM-SDU, dissected for logging.
    fn rx_access_define(&mut self, prim: &mut TmvUnitdataInd) {
        match AccessDefine::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => tracing::debug!("<- {}", pdu),
            Err(e) => tracing::warn!("failed parsing AccessDefine: {:?} {}", e, prim.pdu.dump_bin()),
        }
    }

    /// MAC-D-BLCK, Clause 21.4.3.4: implicit 268-bit PDU, only on SCH/F.
    fn rx_mac_d_blck(&mut self, queue: &mut MessageQueue, prim: &mut TmvUnitdataInd, dltime: TdmaTime) {
        if prim.logical_channel != LogicalChannel::SchF {
            tracing::warn!(
                "MAC error at {}: supplementary block on {}",
                dltime,
                prim.logical_channel
            );
            return;
        }
        if prim.pdu.len() < MAC_D_BLCK_BITS {
            tracing::warn!("MAC-D-BLCK of {} bits, implicit size is {}", prim.pdu.len(), MAC_D_BLCK_BITS);
            return;
        }

        let pdu = match MacDBlck::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("failed parsing MacDBlck: {:?} {}", e, prim.pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);
        tracing::info!("MAC-D-BLCK {}", dltime);

        self.mac_address.encryption_mode = pdu.encryption_mode;
        self.mac_address.event_label = pdu.event_label;

        let pdu_len_bits = MAC_D_BLCK_BITS;
        let num_fill_bits = if pdu.fill_bits && self.remove_fill_bits {
            fillbits::removal::get_num_fill_bits(&prim.pdu, pdu_len_bits, false)
        } else {
            0
        };
        prim.pdu.set_raw_end(prim.pdu.raw_start() + pdu_len_bits - num_fill_bits);

        let sdu = BitBuffer::from_cursor(&prim.pdu);
        self.send_tm_sdu(queue, dltime, prim.logical_channel, sdu, pdu.encryption_mode);
    }

    fn rx_tmv_unitdata(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::TmvUnitdataInd(prim) = &message.msg else {
            panic!()
        };
        self.mac_state.logical_channel = prim.logical_channel;

        match prim.logical_channel {
            LogicalChannel::Aach => self.rx_tmv_aach(queue, message),
            LogicalChannel::Bsch => self.rx_tmv_bsch(queue, message),
            LogicalChannel::TchS => self.rx_tmv_tch(queue, message),
            LogicalChannel::SchF | LogicalChannel::SchHd | LogicalChannel::Stch | LogicalChannel::Bnch => {
                self.rx_tmv_sch(queue, message)
            }
            other => tracing::warn!("rx_tmv_unitdata: unexpected logical channel {:?}", other),
        }
    }
}

impl TetraEntityTrait for UmacMon {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Umac
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.sap {
            Sap::TmvSap => self.rx_tmv_unitdata(queue, message),
            _ => panic!("UmacMon: unexpected message on {:?}", message.sap),
        }
    }
}
