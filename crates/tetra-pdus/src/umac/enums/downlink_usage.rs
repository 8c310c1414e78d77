/// Downlink usage signalled by the AACH (Clause 21.4.7.2, 23.3.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownlinkUsage {
    Unallocated,
    AssignedControl,
    #[default]
    CommonControl,
    Reserved,
    /// Circuit-mode traffic; the usage marker is kept in MacState
    Traffic,
}

impl DownlinkUsage {
    /// Map the 6-bit downlink usage field. Values above 3 are traffic
    /// usage markers.
    pub fn from_field(field: u8) -> Self {
        match field {
            0b000000 => DownlinkUsage::Unallocated,
            0b000001 => DownlinkUsage::AssignedControl,
            0b000010 => DownlinkUsage::CommonControl,
            0b000011 => DownlinkUsage::Reserved,
            _ => DownlinkUsage::Traffic,
        }
    }
}

impl core::fmt::Display for DownlinkUsage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DownlinkUsage::Unallocated => "Unallocated",
            DownlinkUsage::AssignedControl => "AssignedControl",
            DownlinkUsage::CommonControl => "CommonControl",
            DownlinkUsage::Reserved => "Reserved",
            DownlinkUsage::Traffic => "Traffic",
        };
        write!(f, "{}", name)
    }
}
