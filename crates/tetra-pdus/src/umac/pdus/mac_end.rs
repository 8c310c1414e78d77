use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::umac::fields::basic_slotgrant::BasicSlotgrant;
use crate::umac::fields::channel_allocation::ChanAllocElement;

/// Valid MAC-END length indication range; anything outside is reserved
/// and drops the PDU (table 21.60).
pub const MAC_END_LEN_MIN: u8 = 0b000010;
pub const MAC_END_LEN_MAX: u8 = 0b100010;

/// Clause 21.4.3.3 MAC-END (downlink): final fragment of a TM-SDU.
#[derive(Debug, Clone)]
pub struct MacEndDl {
    // 1
    pub fill_bits: bool,
    // 1
    pub pos_of_grant: u8,
    // 6
    pub length_ind: u8,
    // 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacEndDl {
    pub fn from_bitbuf(buf: &mut BitBuffer, frame_18: bool) -> Result<Self, PduParseErr> {
        assert!(buf.read_field(2, "mac_pdu_type")? == 1);
        assert!(buf.read_field(1, "pdu_subtype")? == 1);

        let fill_bits = buf.read_field(1, "fill_bits")? != 0;
        let pos_of_grant = buf.read_field(1, "pos_of_grant")? as u8;
        let length_ind = buf.read_field(6, "length_ind")? as u8;

        let slot_granting_element = if buf.read_field(1, "slot_granting_flag")? == 1 {
            Some(BasicSlotgrant::from_bitbuf(buf)?)
        } else {
            None
        };

        let chan_alloc_element = if buf.read_field(1, "chan_alloc_flag")? == 1 {
            Some(ChanAllocElement::from_bitbuf(buf, frame_18)?)
        } else {
            None
        };

        Ok(MacEndDl {
            fill_bits,
            pos_of_grant,
            length_ind,
            slot_granting_element,
            chan_alloc_element,
        })
    }

    /// True when the length indication is within the valid MAC-END range.
    pub fn length_valid(&self) -> bool {
        (MAC_END_LEN_MIN..=MAC_END_LEN_MAX).contains(&self.length_ind)
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(1, 2);
        buf.write_bits(1, 1);
        buf.write_bits(self.fill_bits as u8 as u64, 1);
        buf.write_bits(self.pos_of_grant as u64, 1);
        buf.write_bits(self.length_ind as u64, 6);

        if let Some(v) = &self.slot_granting_element {
            buf.write_bits(1, 1);
            v.to_bitbuf(buf);
        } else {
            buf.write_bits(0, 1);
        }

        if let Some(v) = &self.chan_alloc_element {
            buf.write_bits(1, 1);
            v.to_bitbuf(buf);
        } else {
            buf.write_bits(0, 1);
        }
    }
}

impl fmt::Display for MacEndDl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacEndDl {{ fill_bits: {} pos_of_grant: {} length_ind: {}",
            self.fill_bits, self.pos_of_grant, self.length_ind
        )?;
        if let Some(v) = &self.slot_granting_element {
            write!(f, " slot_granting_element: {}", v)?;
        }
        if let Some(v) = &self.chan_alloc_element {
            write!(f, " chan_alloc_element: {}", v)?;
        }
        write!(f, " }}")
    }
}
