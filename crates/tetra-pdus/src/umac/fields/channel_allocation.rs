// Clause 21.5.2 channel allocation element, tables 21.82/21.82a.

use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::umac::enums::chan_alloc::{ChanAllocType, UlDlAssignment};

/// Extended carrier numbering (present when the extended carrier flag is
/// set).
#[derive(Debug, Clone, Copy)]
pub struct ExtCarrierNumbering {
    // 4
    pub freq_band: u8,
    // 2
    pub freq_offset: u8,
    // 3
    pub duplex_spacing: u8,
    // 1
    pub reverse_operation: bool,
}

/// Augmented channel allocation (Clause 21.5.2c), selected by
/// `ul_dl_assigned == Augmented`.
#[derive(Debug, Clone, Copy)]
pub struct AugmentedChanAlloc {
    // 2
    pub ul_dl_assigned: u8,
    // 3
    pub bandwidth: u8,
    // 3
    pub modulation_mode: u8,
    // 3
    pub max_ul_qam_txpwr: u8,
    // 3 reserved
    pub reserved1: u8,
    // 3
    pub conforming_chan_status: u8,
    // 4
    pub bs_link_imbalance: u8,
    // 5
    pub bs_txpwr_rel: u8,
    // 2
    pub napping_status: u8,
    // 11 opt, present when napping_status == 1
    pub napping_info: Option<u16>,
    // 4 reserved
    pub reserved2: u8,
    // 16 opt
    pub cond_elem_a: Option<u16>,
    // 16 opt
    pub cond_elem_b: Option<u16>,
    // 1
    pub further_aug_flag: bool,
}

impl AugmentedChanAlloc {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let ul_dl_assigned = buf.read_field(2, "aug_ul_dl_assigned")? as u8;
        let bandwidth = buf.read_field(3, "aug_bandwidth")? as u8;
        let modulation_mode = buf.read_field(3, "aug_modulation_mode")? as u8;
        let max_ul_qam_txpwr = buf.read_field(3, "aug_max_ul_qam_txpwr")? as u8;
        let reserved1 = buf.read_field(3, "aug_reserved1")? as u8;
        let conforming_chan_status = buf.read_field(3, "aug_conforming_chan_status")? as u8;
        let bs_link_imbalance = buf.read_field(4, "aug_bs_link_imbalance")? as u8;
        let bs_txpwr_rel = buf.read_field(5, "aug_bs_txpwr_rel")? as u8;
        let napping_status = buf.read_field(2, "aug_napping_status")? as u8;
        let napping_info = if napping_status == 1 {
            Some(buf.read_field(11, "aug_napping_info")? as u16)
        } else {
            None
        };
        let reserved2 = buf.read_field(4, "aug_reserved2")? as u8;
        let cond_elem_a = if buf.read_field(1, "aug_cond_a_flag")? == 1 {
            Some(buf.read_field(16, "aug_cond_elem_a")? as u16)
        } else {
            None
        };
        let cond_elem_b = if buf.read_field(1, "aug_cond_b_flag")? == 1 {
            Some(buf.read_field(16, "aug_cond_elem_b")? as u16)
        } else {
            None
        };
        let further_aug_flag = buf.read_field(1, "aug_further_flag")? != 0;

        Ok(AugmentedChanAlloc {
            ul_dl_assigned,
            bandwidth,
            modulation_mode,
            max_ul_qam_txpwr,
            reserved1,
            conforming_chan_status,
            bs_link_imbalance,
            bs_txpwr_rel,
            napping_status,
            napping_info,
            reserved2,
            cond_elem_a,
            cond_elem_b,
            further_aug_flag,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.ul_dl_assigned as u64, 2);
        buf.write_bits(self.bandwidth as u64, 3);
        buf.write_bits(self.modulation_mode as u64, 3);
        buf.write_bits(self.max_ul_qam_txpwr as u64, 3);
        buf.write_bits(self.reserved1 as u64, 3);
        buf.write_bits(self.conforming_chan_status as u64, 3);
        buf.write_bits(self.bs_link_imbalance as u64, 4);
        buf.write_bits(self.bs_txpwr_rel as u64, 5);
        buf.write_bits(self.napping_status as u64, 2);
        if let Some(v) = self.napping_info {
            buf.write_bits(v as u64, 11);
        }
        buf.write_bits(self.reserved2 as u64, 4);
        if let Some(v) = self.cond_elem_a {
            buf.write_bits(1, 1);
            buf.write_bits(v as u64, 16);
        } else {
            buf.write_bits(0, 1);
        }
        if let Some(v) = self.cond_elem_b {
            buf.write_bits(1, 1);
            buf.write_bits(v as u64, 16);
        } else {
            buf.write_bits(0, 1);
        }
        buf.write_bits(self.further_aug_flag as u8 as u64, 1);
    }

    pub fn compute_len(&self) -> usize {
        let mut len = 2 + 3 + 3 + 3 + 3 + 3 + 4 + 5 + 2;
        if self.napping_info.is_some() {
            len += 11;
        }
        len += 4;
        len += 1 + if self.cond_elem_a.is_some() { 16 } else { 0 };
        len += 1 + if self.cond_elem_b.is_some() { 16 } else { 0 };
        len + 1
    }
}

#[derive(Debug, Clone)]
pub struct ChanAllocElement {
    // 2
    pub alloc_type: ChanAllocType,
    // 4-bit field, one bit per timeslot TS1..TS4
    pub ts_assigned: [bool; 4],
    // 2
    pub ul_dl_assigned: UlDlAssignment,
    // 1
    pub clch_permission: bool,
    // 1
    pub cell_change_flag: bool,
    // 12
    pub carrier_num: u16,
    // 1 flag + 10 opt
    pub ext_carrier: Option<ExtCarrierNumbering>,
    // 2
    pub mon_pattern: u8,
    // 2 opt, present when mon_pattern == 0 in frame 18
    pub frame18_mon_pattern: Option<u8>,
    /// Present when ul_dl_assigned selects the augmented form
    pub augmented: Option<AugmentedChanAlloc>,
}

impl ChanAllocElement {
    /// Parses a channel allocation element at the cursor. The frame-18
    /// flag decides whether the conditional monitoring pattern exists.
    pub fn from_bitbuf(buf: &mut BitBuffer, frame_18: bool) -> Result<Self, PduParseErr> {
        let val = buf.read_field(2, "alloc_type")?;
        let alloc_type = ChanAllocType::try_from(val).unwrap(); // 2 bits, total

        let bitmap = buf.read_field(4, "ts_assigned")? as u8;
        let ts_assigned = [
            (bitmap & 0b1000) != 0,
            (bitmap & 0b0100) != 0,
            (bitmap & 0b0010) != 0,
            (bitmap & 0b0001) != 0,
        ];

        let val = buf.read_field(2, "ul_dl_assigned")?;
        let ul_dl_assigned = UlDlAssignment::try_from(val).unwrap(); // 2 bits, total

        let clch_permission = buf.read_field(1, "clch_permission")? != 0;
        let cell_change_flag = buf.read_field(1, "cell_change_flag")? != 0;
        let carrier_num = buf.read_field(12, "carrier_num")? as u16;

        let ext_carrier = if buf.read_field(1, "ext_carrier_num_flag")? == 1 {
            Some(ExtCarrierNumbering {
                freq_band: buf.read_field(4, "ext_freq_band")? as u8,
                freq_offset: buf.read_field(2, "ext_freq_offset")? as u8,
                duplex_spacing: buf.read_field(3, "ext_duplex_spacing")? as u8,
                reverse_operation: buf.read_field(1, "ext_reverse_operation")? != 0,
            })
        } else {
            None
        };

        let mon_pattern = buf.read_field(2, "mon_pattern")? as u8;
        let frame18_mon_pattern = if mon_pattern == 0 && frame_18 {
            Some(buf.read_field(2, "frame18_mon_pattern")? as u8)
        } else {
            None
        };

        let augmented = if ul_dl_assigned == UlDlAssignment::Augmented {
            Some(AugmentedChanAlloc::from_bitbuf(buf)?)
        } else {
            None
        };

        Ok(ChanAllocElement {
            alloc_type,
            ts_assigned,
            ul_dl_assigned,
            clch_permission,
            cell_change_flag,
            carrier_num,
            ext_carrier,
            mon_pattern,
            frame18_mon_pattern,
            augmented,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.alloc_type as u64, 2);
        for &bit in &self.ts_assigned {
            buf.write_bits(bit as u8 as u64, 1);
        }
        buf.write_bits(self.ul_dl_assigned as u64, 2);
        buf.write_bits(self.clch_permission as u8 as u64, 1);
        buf.write_bits(self.cell_change_flag as u8 as u64, 1);
        buf.write_bits(self.carrier_num as u64, 12);

        if let Some(ext) = &self.ext_carrier {
            buf.write_bits(1, 1);
            buf.write_bits(ext.freq_band as u64, 4);
            buf.write_bits(ext.freq_offset as u64, 2);
            buf.write_bits(ext.duplex_spacing as u64, 3);
            buf.write_bits(ext.reverse_operation as u8 as u64, 1);
        } else {
            buf.write_bits(0, 1);
        }

        buf.write_bits(self.mon_pattern as u64, 2);
        if let Some(v) = self.frame18_mon_pattern {
            buf.write_bits(v as u64, 2);
        }

        assert!((self.ul_dl_assigned == UlDlAssignment::Augmented) == self.augmented.is_some());
        if let Some(aug) = &self.augmented {
            aug.to_bitbuf(buf);
        }
    }

    pub fn compute_len(&self) -> usize {
        // up to and including the extended carrier numbering flag
        let mut len = 2 + 4 + 2 + 1 + 1 + 12 + 1;
        if self.ext_carrier.is_some() {
            len += 10;
        }
        len += 2;
        if self.frame18_mon_pattern.is_some() {
            len += 2;
        }
        if let Some(aug) = &self.augmented {
            len += aug.compute_len();
        }
        len
    }
}

impl fmt::Display for ChanAllocElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ChanAllocElement {{ alloc_type: {} ts_assigned: {:?} ul_dl_assigned: {} clch_permission: {} cell_change_flag: {} carrier_num: {}",
            self.alloc_type,
            self.ts_assigned,
            self.ul_dl_assigned,
            self.clch_permission,
            self.cell_change_flag,
            self.carrier_num,
        )?;
        if let Some(ext) = &self.ext_carrier {
            write!(f, " ext_carrier: {:?}", ext)?;
        }
        write!(f, " mon_pattern: {}", self.mon_pattern)?;
        if let Some(v) = self.frame18_mon_pattern {
            write!(f, " frame18_mon_pattern: {}", v)?;
        }
        if let Some(aug) = &self.augmented {
            write!(f, " augmented: {:?}", aug)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(bitstr: &str, frame_18: bool) -> ChanAllocElement {
        let mut buffer = BitBuffer::from_bitstr(bitstr);
        let result = ChanAllocElement::from_bitbuf(&mut buffer, frame_18).unwrap();
        assert_eq!(buffer.remaining(), 0);

        let mut out = BitBuffer::growable(32);
        result.to_bitbuf(&mut out);
        assert_eq!(bitstr, out.to_bitstr());
        assert_eq!(bitstr.len(), result.compute_len());
        result
    }

    #[test]
    fn test_parse_chanalloc_replace_lab() {
        let result = roundtrip("0001001110001111101001011", false);
        assert_eq!(result.carrier_num, 1001);
        assert_eq!(result.alloc_type, ChanAllocType::Replace);
    }

    #[test]
    fn test_parse_chanalloc_additional() {
        let result = roundtrip("0100101100010111111000011", false);
        assert_eq!(result.carrier_num, 1528);
        assert_eq!(result.alloc_type, ChanAllocType::Additional);
    }

    #[test]
    fn test_parse_chanalloc_quitandgo() {
        let result = roundtrip("1000001100010111111000011", false);
        assert_eq!(result.carrier_num, 1528);
        assert_eq!(result.alloc_type, ChanAllocType::QuitAndGo);
    }

    #[test]
    fn test_frame18_conditional_mon_pattern() {
        // mon_pattern 00 carries 2 extra bits in frame 18 only
        let base = ChanAllocElement {
            alloc_type: ChanAllocType::Replace,
            ts_assigned: [true, false, false, false],
            ul_dl_assigned: UlDlAssignment::Both,
            clch_permission: false,
            cell_change_flag: false,
            carrier_num: 1000,
            ext_carrier: None,
            mon_pattern: 0,
            frame18_mon_pattern: Some(0b10),
            augmented: None,
        };
        let mut buf = BitBuffer::growable(32);
        base.to_bitbuf(&mut buf);
        assert_eq!(buf.len(), 25 + 2);

        buf.seek(0);
        let in_fr18 = ChanAllocElement::from_bitbuf(&mut buf, true).unwrap();
        assert_eq!(in_fr18.frame18_mon_pattern, Some(0b10));

        buf.seek(0);
        let outside = ChanAllocElement::from_bitbuf(&mut buf, false).unwrap();
        assert_eq!(outside.frame18_mon_pattern, None);
        assert_eq!(buf.remaining(), 2);
    }

    #[test]
    fn test_augmented_roundtrip() {
        let aug = AugmentedChanAlloc {
            ul_dl_assigned: 3,
            bandwidth: 1,
            modulation_mode: 0,
            max_ul_qam_txpwr: 5,
            reserved1: 0,
            conforming_chan_status: 2,
            bs_link_imbalance: 9,
            bs_txpwr_rel: 17,
            napping_status: 1,
            napping_info: Some(0x5A5),
            reserved2: 0,
            cond_elem_a: Some(0xBEEF),
            cond_elem_b: None,
            further_aug_flag: false,
        };
        let elem = ChanAllocElement {
            alloc_type: ChanAllocType::Additional,
            ts_assigned: [false, true, false, false],
            ul_dl_assigned: UlDlAssignment::Augmented,
            clch_permission: true,
            cell_change_flag: false,
            carrier_num: 2702,
            ext_carrier: Some(ExtCarrierNumbering {
                freq_band: 4,
                freq_offset: 3,
                duplex_spacing: 0,
                reverse_operation: false,
            }),
            mon_pattern: 1,
            frame18_mon_pattern: None,
            augmented: Some(aug),
        };

        let mut buf = BitBuffer::growable(128);
        elem.to_bitbuf(&mut buf);
        assert_eq!(buf.len(), elem.compute_len());

        buf.seek(0);
        let parsed = ChanAllocElement::from_bitbuf(&mut buf, false).unwrap();
        assert_eq!(buf.remaining(), 0);
        assert_eq!(parsed.carrier_num, 2702);
        let parsed_aug = parsed.augmented.unwrap();
        assert_eq!(parsed_aug.napping_info, Some(0x5A5));
        assert_eq!(parsed_aug.cond_elem_a, Some(0xBEEF));
        assert_eq!(parsed_aug.cond_elem_b, None);
    }
}
