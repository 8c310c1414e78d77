//! Upper MAC dissection tests: blocks are injected at the TMV SAP as the
//! lower MAC would deliver them, and the report sink is inspected.

mod common;

use common::component_test::{MonTest, tmv_ind};

use tetra_core::{BitBuffer, PhyBlockNum, SsiType, TdmaTime, TetraAddress};
use tetra_pdus::umac::enums::downlink_usage::DownlinkUsage;
use tetra_pdus::umac::enums::mac_resource_addr_type::MacResourceAddrType;
use tetra_pdus::umac::pdus::access_assign::AccessAssign;
use tetra_pdus::umac::pdus::mac_d_blck::MacDBlck;
use tetra_pdus::umac::pdus::mac_end::MacEndDl;
use tetra_pdus::umac::pdus::mac_frag::MacFragDl;
use tetra_pdus::umac::pdus::mac_resource::{LEN_SECOND_HALF_STOLEN, LEN_START_FRAG, MacResource};
use tetra_pdus::umac::pdus::mac_sysinfo::MacSysinfo;
use tetra_saps::SapMsgInner;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

const SCH_F_BITS: usize = 268;
const SCH_HD_BITS: usize = 124;

fn dltime() -> TdmaTime {
    TdmaTime { t: 1, f: 5, m: 1 }
}

fn ssi_resource(ssi: u32) -> MacResource {
    MacResource {
        addr_type: MacResourceAddrType::Ssi,
        addr: Some(TetraAddress::new(ssi, SsiType::Ssi)),
        ..Default::default()
    }
}

fn bit_pattern(len: usize, seed: usize) -> String {
    (0..len).map(|i| if (i * 31 + seed) % 3 == 0 { '1' } else { '0' }).collect()
}

fn write_bitstr(buf: &mut BitBuffer, s: &str) {
    for c in s.chars() {
        buf.write_bit(if c == '1' { 1 } else { 0 });
    }
}

/// A signalling block holding the given (header, payload) PDUs followed
/// by zero bits (which dissect as a NULL PDU).
fn resource_block(pdus: &[(MacResource, String)], block_bits: usize) -> BitBuffer {
    let mut buf = BitBuffer::new(block_bits);
    for (pdu, payload) in pdus {
        let mut pdu = pdu.clone();
        let fill = pdu.update_len_and_fill_ind(payload.len());
        pdu.to_bitbuf(&mut buf);
        write_bitstr(&mut buf, payload);
        if fill > 0 {
            buf.write_bit(1);
            buf.write_zeroes(fill - 1);
        }
    }
    buf.seek(0);
    buf
}

fn sdu_of(msg: &tetra_saps::SapMsg) -> (&tetra_saps::tma::TmaUnitdataInd, String) {
    let SapMsgInner::TmaUnitdataInd(prim) = &msg.msg else {
        panic!("expected TmaUnitdataInd, got {:?}", msg.msg);
    };
    (prim, prim.pdu.to_bitstr())
}

#[test]
fn test_mac_resource_tm_sdu() {
    let mut t = MonTest::new();
    let payload = bit_pattern(37, 1);
    let block = resource_block(&[(ssi_resource(0x123456), payload.clone())], SCH_F_BITS);

    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));

    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    let (prim, bits) = sdu_of(&msgs[0]);
    assert_eq!(bits, payload);
    assert_eq!(prim.main_address.ssi, 0x123456);
    assert_eq!(prim.logical_channel, LogicalChannel::SchF);
    assert_eq!(prim.encryption_mode, 0);
    assert_eq!(t.umac().mac_address().ssi, 0x123456);
}

#[test]
fn test_dissociation_of_two_resources() {
    let mut t = MonTest::new();
    let payload_a = bit_pattern(21, 2);
    let payload_b = bit_pattern(30, 3);
    let block = resource_block(
        &[
            (ssi_resource(0x111111), payload_a.clone()),
            (ssi_resource(0x222222), payload_b.clone()),
        ],
        SCH_F_BITS,
    );

    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));

    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 2);
    let (prim_a, bits_a) = sdu_of(&msgs[0]);
    let (prim_b, bits_b) = sdu_of(&msgs[1]);
    assert_eq!(bits_a, payload_a);
    assert_eq!(prim_a.main_address.ssi, 0x111111);
    assert_eq!(bits_b, payload_b);
    assert_eq!(prim_b.main_address.ssi, 0x222222);
}

#[test]
fn test_null_pdu_suppression() {
    let mut t = MonTest::new();
    // an all-zero block starts with a NULL PDU; nothing may come out
    let block = BitBuffer::new(SCH_F_BITS);
    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));
    assert!(t.dump_sink().is_empty());
}

#[test]
fn test_dissociation_cap() {
    let mut t = MonTest::new();
    // 40 back-to-back 48-bit MAC-RESOURCEs; far beyond any real block,
    // the dissector must stop at 32
    let pdus: Vec<(MacResource, String)> = (0..40)
        .map(|i| (ssi_resource(1000 + i), bit_pattern(5, i as usize)))
        .collect();
    let block = resource_block(&pdus, 40 * 48);

    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));
    assert_eq!(t.dump_sink().len(), 32);
}

#[test]
fn test_fragmentation_reassembly() {
    let mut t = MonTest::new();
    let p1 = bit_pattern(81, 4);
    let p2 = bit_pattern(120, 5);
    let p3 = bit_pattern(19, 6);

    // fragmenting MAC-RESOURCE: owns the rest of the half-slot block
    let mut start = ssi_resource(0x123456);
    start.encryption_mode = 2;
    start.length_ind = LEN_START_FRAG;
    let mut block1 = BitBuffer::new(SCH_HD_BITS);
    start.to_bitbuf(&mut block1);
    write_bitstr(&mut block1, &p1);
    block1.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block1, dltime()));
    assert!(t.dump_sink().is_empty());

    // MAC-FRAG continuation
    let mut block2 = BitBuffer::new(SCH_HD_BITS);
    MacFragDl { fill_bits: false }.to_bitbuf(&mut block2);
    write_bitstr(&mut block2, &p2);
    block2.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block2, block2, dltime()));
    assert!(t.dump_sink().is_empty());

    // MAC-END releases the reassembled TM-SDU
    let mut block3 = BitBuffer::new(SCH_HD_BITS);
    MacEndDl {
        fill_bits: false,
        pos_of_grant: 0,
        length_ind: 4, // 32 bits: 13 header + 19 payload
        slot_granting_element: None,
        chan_alloc_element: None,
    }
    .to_bitbuf(&mut block3);
    write_bitstr(&mut block3, &p3);
    block3.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block3, dltime()));

    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    let (prim, bits) = sdu_of(&msgs[0]);
    assert_eq!(bits, format!("{}{}{}", p1, p2, p3));
    assert_eq!(prim.main_address.ssi, 0x123456);
    // the encryption mode seen at MAC-END wins
    assert_eq!(prim.encryption_mode, 2);
}

#[test]
fn test_fragmentation_ssi_change_discards() {
    let mut t = MonTest::new();

    let mut start = ssi_resource(0x0000AA);
    start.length_ind = LEN_START_FRAG;
    let mut block1 = BitBuffer::new(SCH_HD_BITS);
    start.to_bitbuf(&mut block1);
    write_bitstr(&mut block1, &bit_pattern(81, 7));
    block1.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block1, dltime()));

    // a complete MAC-RESOURCE from another SSI moves the MAC address on
    let other = resource_block(&[(ssi_resource(0x0000BB), bit_pattern(21, 8))], SCH_HD_BITS);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block2, other, dltime()));
    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    assert_eq!(sdu_of(&msgs[0]).0.main_address.ssi, 0x0000BB);

    // the fragment now arrives under the wrong SSI: reassembly stops
    let mut block2 = BitBuffer::new(SCH_HD_BITS);
    MacFragDl { fill_bits: false }.to_bitbuf(&mut block2);
    write_bitstr(&mut block2, &bit_pattern(120, 9));
    block2.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block2, dltime()));

    let mut block3 = BitBuffer::new(SCH_HD_BITS);
    MacEndDl {
        fill_bits: false,
        pos_of_grant: 0,
        length_ind: 4,
        slot_granting_element: None,
        chan_alloc_element: None,
    }
    .to_bitbuf(&mut block3);
    write_bitstr(&mut block3, &bit_pattern(19, 10));
    block3.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block2, block3, dltime()));

    // nothing reassembled
    assert!(t.dump_sink().is_empty());
}

#[test]
fn test_mac_end_reserved_length_drops() {
    let mut t = MonTest::new();

    let mut start = ssi_resource(0x0000CC);
    start.length_ind = LEN_START_FRAG;
    let mut block1 = BitBuffer::new(SCH_HD_BITS);
    start.to_bitbuf(&mut block1);
    write_bitstr(&mut block1, &bit_pattern(81, 11));
    block1.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block1, dltime()));

    // MAC-END with a length below the valid range
    let mut block2 = BitBuffer::new(SCH_HD_BITS);
    MacEndDl {
        fill_bits: false,
        pos_of_grant: 0,
        length_ind: 1,
        slot_granting_element: None,
        chan_alloc_element: None,
    }
    .to_bitbuf(&mut block2);
    block2.seek(0);
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block2, block2, dltime()));

    assert!(t.dump_sink().is_empty());
}

#[test]
fn test_second_half_stolen_announcement() {
    let mut t = MonTest::new();
    let mut pdu = ssi_resource(0x00DDEE);
    pdu.length_ind = LEN_SECOND_HALF_STOLEN;
    let mut block = BitBuffer::new(SCH_HD_BITS);
    pdu.to_bitbuf(&mut block);
    write_bitstr(&mut block, &bit_pattern(81, 12));
    block.seek(0);

    t.submit(tmv_ind(LogicalChannel::Stch, PhyBlockNum::Block1, block, dltime()));

    // the announcement still carries an SDU covering the rest of the block
    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    assert_eq!(sdu_of(&msgs[0]).1.len(), 81);
}

fn aach(header: u8, field1: u8) -> BitBuffer {
    let mut buf = BitBuffer::new(14);
    AccessAssign { header, field1, field2: 0 }.to_bitbuf(&mut buf);
    buf.seek(0);
    buf
}

#[test]
fn test_aach_traffic_marker() {
    let mut t = MonTest::new();
    t.submit(tmv_ind(LogicalChannel::Aach, PhyBlockNum::Undefined, aach(0b01, 9), dltime()));
    assert_eq!(t.umac().mac_state().downlink_usage, DownlinkUsage::Traffic);
    assert_eq!(t.umac().mac_state().downlink_usage_marker, 9);
}

#[test]
fn test_aach_frame18_forces_common_control() {
    let mut t = MonTest::new();
    let fr18 = TdmaTime { t: 2, f: 18, m: 1 };
    // a traffic usage marker in frame 18 must not switch to traffic mode
    t.submit(tmv_ind(LogicalChannel::Aach, PhyBlockNum::Undefined, aach(0b01, 9), fr18));
    assert_eq!(t.umac().mac_state().downlink_usage, DownlinkUsage::CommonControl);
    assert_eq!(t.umac().mac_state().downlink_usage_marker, 0);
}

#[test]
fn test_usage_marker_assignment_updates_encryption_table() {
    let mut t = MonTest::new();
    let mut pdu = ssi_resource(0x345678);
    pdu.addr_type = MacResourceAddrType::SsiAndUsageMarker;
    pdu.usage_marker = Some(17);
    pdu.encryption_mode = 3;
    let block = resource_block(&[(pdu, bit_pattern(15, 13))], SCH_F_BITS);

    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));

    assert_eq!(t.umac().usage_marker_encryption(17), 3);
    assert_eq!(t.umac().mac_address().usage_marker, 17);
}

#[test]
fn test_sysinfo_tm_sdu_and_frequency() {
    let mut t = MonTest::new();
    let sysinfo = MacSysinfo {
        main_carrier: 2702,
        freq_band: 4,
        freq_offset_index: 3,
        duplex_spacing: 0,
        reverse_operation: false,
        num_of_csch: 0,
        ms_txpwr_max_cell: 5,
        rxlev_access_min: 3,
        access_parameter: 7,
        radio_dl_timeout: 3,
        cck_id: None,
        hyperframe_number: Some(0),
        option_field: tetra_pdus::umac::enums::sysinfo_opt_field_flag::SysinfoOptFieldFlag::DefaultDefForAccCodeA,
        option_value: 0,
    };
    let sdu = bit_pattern(42, 14);
    let mut block = BitBuffer::new(SCH_HD_BITS);
    sysinfo.to_bitbuf(&mut block);
    write_bitstr(&mut block, &sdu);
    block.seek(0);

    t.submit(tmv_ind(LogicalChannel::Bnch, PhyBlockNum::Block2, block, dltime()));

    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    let (prim, bits) = sdu_of(&msgs[0]);
    assert_eq!(prim.logical_channel, LogicalChannel::Bnch);
    assert_eq!(bits, sdu);
    // 467.5625 MHz from band 4, carrier 2702, offset +12.5 kHz
    assert_eq!(t.umac().cell().dl_freq_hz, 467_562_500);
}

#[test]
fn test_mac_d_blck() {
    let mut t = MonTest::new();
    let mut block = BitBuffer::new(SCH_F_BITS);
    MacDBlck {
        fill_bits: false,
        encryption_mode: 1,
        event_label: 0x155,
        imm_napping_permission: false,
        slot_granting_element: None,
    }
    .to_bitbuf(&mut block);
    let payload = bit_pattern(250, 15);
    write_bitstr(&mut block, &payload);
    block.seek(0);

    t.submit(tmv_ind(LogicalChannel::SchF, PhyBlockNum::Both, block, dltime()));

    let msgs = t.dump_sink();
    assert_eq!(msgs.len(), 1);
    let (prim, bits) = sdu_of(&msgs[0]);
    assert_eq!(bits, payload);
    assert_eq!(prim.encryption_mode, 1);
    assert_eq!(t.umac().mac_address().event_label, 0x155);
}

#[test]
fn test_mac_d_blck_rejected_on_half_slot() {
    let mut t = MonTest::new();
    let mut block = BitBuffer::new(SCH_HD_BITS);
    MacDBlck {
        fill_bits: false,
        encryption_mode: 0,
        event_label: 1,
        imm_napping_permission: false,
        slot_granting_element: None,
    }
    .to_bitbuf(&mut block);
    block.seek(0);

    // 21.4.1: MAC-D-BLCK is never sent on SCH/HD or STCH
    t.submit(tmv_ind(LogicalChannel::SchHd, PhyBlockNum::Block1, block, dltime()));
    assert!(t.dump_sink().is_empty());
}
