use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// 21.5.6 Basic slot granting element (8 bits). The monitor does not act
/// on grants; the fields are carried for logging only.
#[derive(Debug, Clone)]
pub struct BasicSlotgrant {
    // 4
    pub capacity_allocation: u8,
    // 4
    pub granting_delay: u8,
}

impl BasicSlotgrant {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        Ok(BasicSlotgrant {
            capacity_allocation: buf.read_field(4, "capacity_allocation")? as u8,
            granting_delay: buf.read_field(4, "granting_delay")? as u8,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.capacity_allocation as u64, 4);
        buf.write_bits(self.granting_delay as u64, 4);
    }
}

impl fmt::Display for BasicSlotgrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BasicSlotgrant {{ cap {} delay {} }}",
            self.capacity_allocation, self.granting_delay
        )
    }
}
