use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// Clause 21.4.4.3 ACCESS-DEFINE, table 21.74. Broadcast of random access
/// parameters; carries no TM-SDU. Parsed mostly to find its extent so the
/// dissection cursor stays consistent.
#[derive(Debug, Clone)]
pub struct AccessDefine {
    // 1
    pub common_or_assigned: bool,
    // 2
    pub access_code: u8,
    // 4
    pub immediate: u8,
    // 4
    pub waiting_time: u8,
    // 4
    pub num_random_transmissions: u8,
    // 1
    pub frame_length_factor: bool,
    // 4
    pub timeslot_pointer: u8,
    // 3
    pub min_pdu_priority: u8,
    // 16 opt
    pub subscriber_class_bitmap: Option<u16>,
    // 24 opt
    pub gssi: Option<u32>,
}

impl AccessDefine {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        assert!(buf.read_field(2, "pdu_type")? == 2);
        assert!(buf.read_field(2, "pdu_subtype")? == 1);

        let common_or_assigned = buf.read_field(1, "common_or_assigned")? != 0;
        let access_code = buf.read_field(2, "access_code")? as u8;
        let immediate = buf.read_field(4, "immediate")? as u8;
        let waiting_time = buf.read_field(4, "waiting_time")? as u8;
        let num_random_transmissions = buf.read_field(4, "num_random_transmissions")? as u8;
        let frame_length_factor = buf.read_field(1, "frame_length_factor")? != 0;
        let timeslot_pointer = buf.read_field(4, "timeslot_pointer")? as u8;
        let min_pdu_priority = buf.read_field(3, "min_pdu_priority")? as u8;

        let flag = buf.read_field(2, "optional_field_flag")?;
        let (subscriber_class_bitmap, gssi) = match flag {
            0b00 => (None, None),
            0b01 => (Some(buf.read_field(16, "subscriber_class_bitmap")? as u16), None),
            0b10 => (None, Some(buf.read_field(24, "gssi")? as u32)),
            // reserved; the element length is undefined from here on
            _ => {
                return Err(PduParseErr::InvalidValue {
                    field: "optional_field_flag",
                    value: flag,
                });
            }
        };
        // filler bits, always present
        buf.read_field(3, "filler")?;

        Ok(AccessDefine {
            common_or_assigned,
            access_code,
            immediate,
            waiting_time,
            num_random_transmissions,
            frame_length_factor,
            timeslot_pointer,
            min_pdu_priority,
            subscriber_class_bitmap,
            gssi,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(2, 2);
        buf.write_bits(1, 2);
        buf.write_bits(self.common_or_assigned as u8 as u64, 1);
        buf.write_bits(self.access_code as u64, 2);
        buf.write_bits(self.immediate as u64, 4);
        buf.write_bits(self.waiting_time as u64, 4);
        buf.write_bits(self.num_random_transmissions as u64, 4);
        buf.write_bits(self.frame_length_factor as u8 as u64, 1);
        buf.write_bits(self.timeslot_pointer as u64, 4);
        buf.write_bits(self.min_pdu_priority as u64, 3);

        assert!(!(self.subscriber_class_bitmap.is_some() && self.gssi.is_some()));
        if let Some(v) = self.subscriber_class_bitmap {
            buf.write_bits(0b01, 2);
            buf.write_bits(v as u64, 16);
        } else if let Some(v) = self.gssi {
            buf.write_bits(0b10, 2);
            buf.write_bits(v as u64, 24);
        } else {
            buf.write_bits(0b00, 2);
        }
        buf.write_bits(0, 3);
    }
}

impl fmt::Display for AccessDefine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "AccessDefine {{ common_or_assigned: {} access_code: {} immediate: {} waiting_time: {} num_random_transmissions: {}",
            self.common_or_assigned,
            self.access_code,
            self.immediate,
            self.waiting_time,
            self.num_random_transmissions
        )?;
        if let Some(v) = self.subscriber_class_bitmap {
            write!(f, " subscriber_class_bitmap: {:#06x}", v)?;
        }
        if let Some(v) = self.gssi {
            write!(f, " gssi: {}", v)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_define_roundtrip() {
        let pdu = AccessDefine {
            common_or_assigned: false,
            access_code: 1,
            immediate: 8,
            waiting_time: 5,
            num_random_transmissions: 5,
            frame_length_factor: false,
            timeslot_pointer: 0,
            min_pdu_priority: 0,
            subscriber_class_bitmap: None,
            gssi: Some(0x123456),
        };
        let mut buf = BitBuffer::growable(64);
        pdu.to_bitbuf(&mut buf);
        assert_eq!(buf.len(), 27 + 2 + 24 + 3);

        buf.seek(0);
        let parsed = AccessDefine::from_bitbuf(&mut buf).unwrap();
        assert_eq!(parsed.gssi, Some(0x123456));
        assert_eq!(buf.remaining(), 0);
    }
}
