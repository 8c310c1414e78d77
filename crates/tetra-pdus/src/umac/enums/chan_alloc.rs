/// Channel allocation type (Clause 21.5.2 Table 21.82)
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChanAllocType {
    Replace = 0,
    Additional = 1,
    QuitAndGo = 2,
    ReplacePlusAllocType1 = 3,
}

impl std::convert::TryFrom<u64> for ChanAllocType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(ChanAllocType::Replace),
            1 => Ok(ChanAllocType::Additional),
            2 => Ok(ChanAllocType::QuitAndGo),
            3 => Ok(ChanAllocType::ReplacePlusAllocType1),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for ChanAllocType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ChanAllocType::Replace => "Replace",
            ChanAllocType::Additional => "Additional",
            ChanAllocType::QuitAndGo => "QuitAndGo",
            ChanAllocType::ReplacePlusAllocType1 => "ReplacePlusAllocType1",
        };
        write!(f, "{}", name)
    }
}

/// Up/downlink assignment within a channel allocation element.
/// Value 0 selects the augmented channel allocation form.
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UlDlAssignment {
    Augmented = 0,
    DlOnly = 1,
    UlOnly = 2,
    Both = 3,
}

impl std::convert::TryFrom<u64> for UlDlAssignment {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(UlDlAssignment::Augmented),
            1 => Ok(UlDlAssignment::DlOnly),
            2 => Ok(UlDlAssignment::UlOnly),
            3 => Ok(UlDlAssignment::Both),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for UlDlAssignment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            UlDlAssignment::Augmented => "Augmented",
            UlDlAssignment::DlOnly => "DlOnly",
            UlDlAssignment::UlOnly => "UlOnly",
            UlDlAssignment::Both => "Both",
        };
        write!(f, "{}", name)
    }
}
