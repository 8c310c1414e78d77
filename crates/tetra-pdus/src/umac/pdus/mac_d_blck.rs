use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::umac::fields::basic_slotgrant::BasicSlotgrant;

/// Implicit MAC-D-BLCK PDU size in bits (tables 21.62 and 21.63).
pub const MAC_D_BLCK_BITS: usize = 268;

/// Clause 21.4.3.4 MAC-D-BLCK. Fixed-size downlink supplementary block;
/// only valid on SCH/F.
#[derive(Debug, Clone)]
pub struct MacDBlck {
    // 1
    pub fill_bits: bool,
    // 2
    pub encryption_mode: u8,
    // 10
    pub event_label: u16,
    // 1
    pub imm_napping_permission: bool,
    // 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
}

impl MacDBlck {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        assert!(buf.read_field(2, "mac_pdu_type")? == 3);
        assert!(buf.read_field(1, "pdu_subtype")? == 0);

        let fill_bits = buf.read_field(1, "fill_bits")? != 0;
        let encryption_mode = buf.read_field(2, "encryption_mode")? as u8;
        let event_label = buf.read_field(10, "event_label")? as u16;
        let imm_napping_permission = buf.read_field(1, "imm_napping_permission")? != 0;

        let slot_granting_element = if buf.read_field(1, "slot_granting_flag")? == 1 {
            Some(BasicSlotgrant::from_bitbuf(buf)?)
        } else {
            None
        };

        Ok(MacDBlck {
            fill_bits,
            encryption_mode,
            event_label,
            imm_napping_permission,
            slot_granting_element,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(3, 2);
        buf.write_bits(0, 1);
        buf.write_bits(self.fill_bits as u8 as u64, 1);
        buf.write_bits(self.encryption_mode as u64, 2);
        buf.write_bits(self.event_label as u64, 10);
        buf.write_bits(self.imm_napping_permission as u8 as u64, 1);
        if let Some(v) = &self.slot_granting_element {
            buf.write_bits(1, 1);
            v.to_bitbuf(buf);
        } else {
            buf.write_bits(0, 1);
        }
    }
}

impl fmt::Display for MacDBlck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MacDBlck {{ fill_bits: {} encryption_mode: {} event_label: {} imm_napping_permission: {}",
            self.fill_bits, self.encryption_mode, self.event_label, self.imm_napping_permission
        )?;
        if let Some(v) = &self.slot_granting_element {
            write!(f, " slot_granting_element: {}", v)?;
        }
        write!(f, " }}")
    }
}
