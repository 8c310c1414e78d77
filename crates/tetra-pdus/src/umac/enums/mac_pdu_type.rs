/// Clause 21.4.1 Table 21.38: MAC PDU types on SCH/F, SCH/HD and STCH.
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MacPduType {
    /// MAC-RESOURCE on the downlink
    MacResource = 0,
    /// MAC-FRAG or MAC-END, split by the subtype bit
    MacFragMacEnd = 1,
    /// SYSINFO / ACCESS-DEFINE broadcast
    Broadcast = 2,
    /// MAC-D-BLCK (downlink supplementary block)
    MacDBlck = 3,
}

impl std::convert::TryFrom<u64> for MacPduType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(MacPduType::MacResource),
            1 => Ok(MacPduType::MacFragMacEnd),
            2 => Ok(MacPduType::Broadcast),
            3 => Ok(MacPduType::MacDBlck),
            _ => Err(()),
        }
    }
}

impl MacPduType {
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl core::fmt::Display for MacPduType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MacPduType::MacResource => write!(f, "MacResource"),
            MacPduType::MacFragMacEnd => write!(f, "MacFragMacEnd"),
            MacPduType::Broadcast => write!(f, "Broadcast"),
            MacPduType::MacDBlck => write!(f, "MacDBlck"),
        }
    }
}
