/// Downlink logical channels (Clause 9.5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalChannel {
    /// Access Assignment CHannel
    Aach,
    /// BS Linearization CHannel
    Blch,
    /// Broadcast Network CHannel (SYSINFO)
    Bnch,
    /// Broadcast Synchronization CHannel (SYNC)
    Bsch,
    /// Signalling CHannel, full slot
    SchF,
    /// Signalling CHannel, half slot downlink
    SchHd,
    /// STealing CHannel
    Stch,
    /// Traffic CHannel, full-slot speech
    TchS,
    /// Traffic CHannel, half slot (not decoded)
    Tch,
    Unknown,
}

impl LogicalChannel {
    pub fn is_traffic(self) -> bool {
        matches!(self, LogicalChannel::TchS | LogicalChannel::Tch)
    }

    /// Channels that carry MAC signalling blocks through the full
    /// descramble/deinterleave/depuncture/Viterbi/CRC chain.
    pub fn is_control_channel(self) -> bool {
        matches!(
            self,
            LogicalChannel::Aach
                | LogicalChannel::Bsch
                | LogicalChannel::Bnch
                | LogicalChannel::SchF
                | LogicalChannel::SchHd
                | LogicalChannel::Stch
        )
    }

}

impl core::fmt::Display for LogicalChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            LogicalChannel::Aach => "AACH",
            LogicalChannel::Blch => "BLCH",
            LogicalChannel::Bnch => "BNCH",
            LogicalChannel::Bsch => "BSCH",
            LogicalChannel::SchF => "SCH/F",
            LogicalChannel::SchHd => "SCH/HD",
            LogicalChannel::Stch => "STCH",
            LogicalChannel::TchS => "TCH/S",
            LogicalChannel::Tch => "TCH",
            LogicalChannel::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
