/// Clause 21.4.3.1 Table 21.55 MAC-RESOURCE address types
/// Bits: 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MacResourceAddrType {
    #[default]
    NullPdu = 0,
    Ssi = 1,
    EventLabel = 2,
    Ussi = 3,
    Smi = 4,
    SsiAndEventLabel = 5,
    SsiAndUsageMarker = 6,
    SmiAndEventLabel = 7,
}

impl std::convert::TryFrom<u64> for MacResourceAddrType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(MacResourceAddrType::NullPdu),
            1 => Ok(MacResourceAddrType::Ssi),
            2 => Ok(MacResourceAddrType::EventLabel),
            3 => Ok(MacResourceAddrType::Ussi),
            4 => Ok(MacResourceAddrType::Smi),
            5 => Ok(MacResourceAddrType::SsiAndEventLabel),
            6 => Ok(MacResourceAddrType::SsiAndUsageMarker),
            7 => Ok(MacResourceAddrType::SmiAndEventLabel),
            _ => Err(()),
        }
    }
}

impl MacResourceAddrType {
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl core::fmt::Display for MacResourceAddrType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            MacResourceAddrType::NullPdu => "NullPdu",
            MacResourceAddrType::Ssi => "Ssi",
            MacResourceAddrType::EventLabel => "EventLabel",
            MacResourceAddrType::Ussi => "Ussi",
            MacResourceAddrType::Smi => "Smi",
            MacResourceAddrType::SsiAndEventLabel => "SsiAndEventLabel",
            MacResourceAddrType::SsiAndUsageMarker => "SsiAndUsageMarker",
            MacResourceAddrType::SmiAndEventLabel => "SmiAndEventLabel",
        };
        write!(f, "{}", name)
    }
}
