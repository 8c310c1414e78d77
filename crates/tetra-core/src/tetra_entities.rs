/// Entities of the monitor stack, as routing targets for SAP messages.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy)]
pub enum TetraEntity {
    /// Burst synchronizer (physical layer)
    Phy,
    /// Lower MAC (channel decoding)
    Lmac,
    /// Upper MAC (PDU dissection)
    Umac,
    /// Upper-layer sink (JSON reporting)
    Report,
}
