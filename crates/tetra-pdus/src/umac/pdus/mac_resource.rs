use core::fmt;

use tetra_core::{BitBuffer, SsiType, TetraAddress, pdu_parse_error::PduParseErr};

use crate::umac::enums::mac_resource_addr_type::MacResourceAddrType;
use crate::umac::fields::EventLabel;
use crate::umac::fields::basic_slotgrant::BasicSlotgrant;
use crate::umac::fields::channel_allocation::ChanAllocElement;

/// Length indication announcing that the second half slot is stolen
pub const LEN_SECOND_HALF_STOLEN: u8 = 0b111110;
/// Length indication announcing the start of a fragmented TM-SDU
pub const LEN_START_FRAG: u8 = 0b111111;

/// Decode the 6-bit length indication into octets (Clause 21.4.3.1 table
/// 21.55, with Y2 = Z2 = 1 for π/4-DQPSK). Reserved values and the
/// QAM-only value decode to 0; the two marker values are passed through.
pub fn decode_length(val: u8) -> u8 {
    match val {
        0b000000 | 0b111011 | 0b111100 | 0b111101 => 0,
        LEN_SECOND_HALF_STOLEN | LEN_START_FRAG => val,
        v if v <= 0b010010 => v,
        // 18 * Y2 + (val - 18) * Z2
        v => 18 + (v - 18),
    }
}

/// Clause 21.4.3.1 MAC-RESOURCE
#[derive(Debug, Clone, Default)]
pub struct MacResource {
    /// SDU followed by fill bits up to the octet boundary.
    /// No meaning on a NULL PDU.
    pub fill_bits: bool,
    /// 0 -> grant on current channel, 1 -> on allocated channel.
    /// Only relevant with a slot granting element.
    pub pos_of_grant: u8,
    /// 2 bits; upper bit = encryption enabled, lower bit = CCK parity
    pub encryption_mode: u8,
    pub random_access_flag: bool,
    /// 6-bit length indication, see `decode_length`
    pub length_ind: u8,

    pub addr_type: MacResourceAddrType,
    pub addr: Option<TetraAddress>,
    // 10 opt
    pub event_label: Option<EventLabel>,
    // 6 opt
    pub usage_marker: Option<u8>,
    // 4 opt
    pub power_control_element: Option<u8>,
    // 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacResource {
    pub fn is_null_pdu(&self) -> bool {
        self.addr_type == MacResourceAddrType::NullPdu
    }

    /// Parses the header fields up to (not including) the TM-SDU. The
    /// frame-18 flag feeds the conditional monitoring pattern of a channel
    /// allocation element.
    pub fn from_bitbuf(buf: &mut BitBuffer, frame_18: bool) -> Result<Self, PduParseErr> {
        let mut s = MacResource::default();

        assert!(buf.read_field(2, "mac_pdu_type")? == 0);
        s.fill_bits = buf.read_field(1, "fill_bits")? != 0;
        s.pos_of_grant = buf.read_field(1, "pos_of_grant")? as u8;
        s.encryption_mode = buf.read_field(2, "encryption_mode")? as u8;
        s.random_access_flag = buf.read_field(1, "random_access_flag")? != 0;
        s.length_ind = buf.read_field(6, "length_ind")? as u8;

        let bits = buf.read_field(3, "addr_type")?;
        s.addr_type = MacResourceAddrType::try_from(bits).unwrap(); // 3 bits, total

        let encrypted = s.encryption_mode != 0;
        match s.addr_type {
            MacResourceAddrType::NullPdu => {
                // All other fields of a NULL PDU are discarded (21.4.3.1);
                // reset them so nothing downstream acts on them.
                s.fill_bits = false;
                s.pos_of_grant = 0;
                s.encryption_mode = 0;
                s.random_access_flag = false;
                return Ok(s);
            }
            MacResourceAddrType::Ssi => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "ssi")? as u32,
                    ssi_type: SsiType::Ssi,
                    encrypted,
                });
            }
            MacResourceAddrType::EventLabel => {
                s.event_label = Some(buf.read_field(10, "event_label")? as u16);
            }
            MacResourceAddrType::Ussi => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "ussi")? as u32,
                    ssi_type: SsiType::Ussi,
                    encrypted,
                });
            }
            MacResourceAddrType::Smi => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "smi")? as u32,
                    ssi_type: SsiType::Smi,
                    encrypted,
                });
            }
            MacResourceAddrType::SsiAndEventLabel => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "ssi")? as u32,
                    ssi_type: SsiType::Ssi,
                    encrypted,
                });
                s.event_label = Some(buf.read_field(10, "event_label")? as u16);
            }
            MacResourceAddrType::SsiAndUsageMarker => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "ssi")? as u32,
                    ssi_type: SsiType::Ssi,
                    encrypted,
                });
                s.usage_marker = Some(buf.read_field(6, "usage_marker")? as u8);
            }
            MacResourceAddrType::SmiAndEventLabel => {
                s.addr = Some(TetraAddress {
                    ssi: buf.read_field(24, "smi")? as u32,
                    ssi_type: SsiType::Smi,
                    encrypted,
                });
                s.event_label = Some(buf.read_field(10, "event_label")? as u16);
            }
        }

        if buf.read_field(1, "power_control_flag")? == 1 {
            s.power_control_element = Some(buf.read_field(4, "power_control_element")? as u8);
        }

        if buf.read_field(1, "slot_granting_flag")? == 1 {
            s.slot_granting_element = Some(BasicSlotgrant::from_bitbuf(buf)?);
        }

        if buf.read_field(1, "chan_alloc_flag")? == 1 {
            s.chan_alloc_element = Some(ChanAllocElement::from_bitbuf(buf, frame_18)?);
        }

        Ok(s)
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(0, 2);
        buf.write_bits(self.fill_bits as u8 as u64, 1);
        buf.write_bits(self.pos_of_grant as u64, 1);
        buf.write_bits(self.encryption_mode as u64, 2);
        buf.write_bits(self.random_access_flag as u8 as u64, 1);
        buf.write_bits(self.length_ind as u64, 6);

        buf.write_bits(self.addr_type.into_raw(), 3);
        match self.addr_type {
            MacResourceAddrType::NullPdu => {
                return;
            }
            MacResourceAddrType::Ssi | MacResourceAddrType::Ussi | MacResourceAddrType::Smi => {
                buf.write_bits(self.addr.unwrap().ssi as u64, 24);
            }
            MacResourceAddrType::EventLabel => {
                buf.write_bits(self.event_label.unwrap() as u64, 10);
            }
            MacResourceAddrType::SsiAndEventLabel | MacResourceAddrType::SmiAndEventLabel => {
                buf.write_bits(self.addr.unwrap().ssi as u64, 24);
                buf.write_bits(self.event_label.unwrap() as u64, 10);
            }
            MacResourceAddrType::SsiAndUsageMarker => {
                buf.write_bits(self.addr.unwrap().ssi as u64, 24);
                buf.write_bits(self.usage_marker.unwrap() as u64, 6);
            }
        }

        if let Some(v) = self.power_control_element {
            buf.write_bits(1, 1);
            buf.write_bits(v as u64, 4);
        } else {
            buf.write_bits(0, 1);
        }

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

    /// Header length in bits for the current field set.
    pub fn compute_header_len(&self) -> usize {
        let mut ret = 16;
        if self.is_null_pdu() {
            return ret;
        }

        if self.addr.is_some() {
            ret += 24;
        }
        if self.event_label.is_some() {
            ret += 10;
        }
        if self.usage_marker.is_some() {
            ret += 6;
        }

        ret += 1;
        if self.power_control_element.is_some() {
            ret += 4;
        }
        ret += 1;
        if self.slot_granting_element.is_some() {
            ret += 8;
        }
        ret += 1;
        if let Some(chan_alloc) = self.chan_alloc_element.as_ref() {
            ret += chan_alloc.compute_len();
        }

        ret
    }

    /// Derives length_ind and fill_bits from the header and an SDU length.
    /// Returns the number of fill bits to append after the SDU.
    pub fn update_len_and_fill_ind(&mut self, sdu_len: usize) -> usize {
        let total_len = self.compute_header_len() + sdu_len;
        let num_fill_bits = (8 - (total_len % 8)) % 8;
        self.length_ind = total_len.div_ceil(8) as u8;
        self.fill_bits = num_fill_bits != 0;
        num_fill_bits
    }
}

impl fmt::Display for MacResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacResource {{ fill_bits: {} pos_of_grant: {} encryption_mode: {} random_access_flag: {} length_ind: {}",
            self.fill_bits, self.pos_of_grant, self.encryption_mode, self.random_access_flag, self.length_ind
        )?;
        if let Some(addr) = &self.addr {
            write!(f, " addr: {}", addr)?;
        } else if self.is_null_pdu() {
            write!(f, " addr: Null PDU")?;
        }
        if let Some(v) = self.event_label {
            write!(f, " event_label: {}", v)?;
        }
        if let Some(v) = self.usage_marker {
            write!(f, " usage_marker: {}", v)?;
        }
        if let Some(v) = self.power_control_element {
            write!(f, " power_control_element: {}", v)?;
        }
        if let Some(v) = &self.slot_granting_element {
            write!(f, " slot_granting_element: {}", v)?;
        }
        if let Some(v) = &self.chan_alloc_element {
            write!(f, " chan_alloc_element: {}", v)?;
        }
        write!(f, " }}")
    }
}
