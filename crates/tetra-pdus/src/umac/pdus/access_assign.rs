use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::umac::enums::downlink_usage::DownlinkUsage;

/// Clause 21.4.7.2 ACCESS-ASSIGN (14 bits, carried on the AACH).
/// Only the downlink half matters to a monitor; the uplink access fields
/// are kept raw.
#[derive(Debug, Clone, Copy)]
pub struct AccessAssign {
    // 2
    pub header: u8,
    // 6
    pub field1: u8,
    // 6
    pub field2: u8,
}

impl AccessAssign {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        Ok(AccessAssign {
            header: buf.read_field(2, "header")? as u8,
            field1: buf.read_field(6, "field1")? as u8,
            field2: buf.read_field(6, "field2")? as u8,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.header as u64, 2);
        buf.write_bits(self.field1 as u64, 6);
        buf.write_bits(self.field2 as u64, 6);
    }

    /// Downlink usage in frames 1..17 (23.3.1.1). Header 0b00 means both
    /// subslots carry common control; otherwise field 1 decides.
    pub fn dl_usage(&self) -> DownlinkUsage {
        if self.header == 0b00 {
            DownlinkUsage::CommonControl
        } else {
            DownlinkUsage::from_field(self.field1)
        }
    }

    /// Usage marker when the downlink carries traffic (3 < field1 <= 63).
    pub fn dl_usage_marker(&self) -> Option<u8> {
        if self.dl_usage() == DownlinkUsage::Traffic {
            Some(self.field1)
        } else {
            None
        }
    }
}

impl fmt::Display for AccessAssign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "AccessAssign {{ header: {:02b} dl_usage: {} field1: {} field2: {} }}",
            self.header,
            self.dl_usage(),
            self.field1,
            self.field2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_control() {
        let mut buf = BitBuffer::from_bitstr("00001010001010");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage(), DownlinkUsage::CommonControl);
        assert_eq!(pdu.dl_usage_marker(), None);

        let mut out = BitBuffer::new(14);
        pdu.to_bitbuf(&mut out);
        assert_eq!(out.to_bitstr(), buf.to_bitstr());
    }

    #[test]
    fn test_unallocated() {
        let mut buf = BitBuffer::from_bitstr("11000000000000");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage(), DownlinkUsage::Unallocated);
    }

    #[test]
    fn test_traffic_with_marker() {
        // header 01, field1 = 5 -> traffic, usage marker 5
        let mut buf = BitBuffer::from_bitstr("01000101000000");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage(), DownlinkUsage::Traffic);
        assert_eq!(pdu.dl_usage_marker(), Some(5));
    }
}
