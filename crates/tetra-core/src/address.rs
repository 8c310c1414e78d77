#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum SsiType {
    Unknown,
    /// Short Subscriber Identity (individual/group not distinguished here)
    Ssi,
    /// Unexchanged Short Subscriber Identity
    Ussi,
    /// Short Management Identity
    Smi,
    /// Event label stand-in; only meaningful within the MAC
    EventLabel,
}

impl core::fmt::Display for SsiType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SsiType::Unknown => write!(f, "Unknown"),
            SsiType::Ssi => write!(f, "SSI"),
            SsiType::Ussi => write!(f, "USSI"),
            SsiType::Smi => write!(f, "SMI"),
            SsiType::EventLabel => write!(f, "EventLabel"),
        }
    }
}

/// A single TETRA address as carried up the stack with each TM-SDU.
#[derive(Copy, Debug, Clone)]
pub struct TetraAddress {
    pub ssi: u32,
    pub ssi_type: SsiType,
    /// True when the address arrived as an ESI (Encrypted Subscriber
    /// Identity). Kept so still-encrypted SSIs can be passed up unchanged.
    pub encrypted: bool,
}

impl TetraAddress {
    pub fn new(ssi: u32, ssi_type: SsiType) -> Self {
        Self { ssi, ssi_type, encrypted: false }
    }
}

impl core::fmt::Display for TetraAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.encrypted {
            write!(f, "E_{}:{}", self.ssi_type, self.ssi)
        } else {
            write!(f, "{}:{}", self.ssi_type, self.ssi)
        }
    }
}

/// Rolling MAC addressing state, refreshed by every MAC-RESOURCE and
/// MAC-D-BLCK header (Clause 21.4.3.1). Each address kind keeps its last
/// seen value; `address_type` records which kind the last PDU carried.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacAddress {
    /// 3-bit address type of the most recent addressed PDU
    pub address_type: u8,
    pub ssi: u32,
    pub ussi: u32,
    pub smi: u32,
    pub event_label: u16,
    pub usage_marker: u8,
    /// 2-bit encryption mode, recorded and forwarded, never applied
    pub encryption_mode: u8,
}

impl MacAddress {
    /// The address to attach to an outgoing TM-SDU, as determined by the
    /// last MAC-RESOURCE address type.
    pub fn main_address(&self) -> TetraAddress {
        let (ssi, ssi_type) = match self.address_type {
            0b001 | 0b101 | 0b110 => (self.ssi, SsiType::Ssi),
            0b010 => (self.event_label as u32, SsiType::EventLabel),
            0b011 => (self.ussi, SsiType::Ussi),
            0b100 | 0b111 => (self.smi, SsiType::Smi),
            _ => (0, SsiType::Unknown),
        };
        TetraAddress {
            ssi,
            ssi_type,
            encrypted: self.encryption_mode != 0,
        }
    }
}
