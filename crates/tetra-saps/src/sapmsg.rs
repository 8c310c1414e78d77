use tetra_core::{Sap, TdmaTime, TetraEntity};

use crate::tma::TmaUnitdataInd;
use crate::tmd::TmdCircuitDataInd;
use crate::tmv::{TmvConfigureReq, TmvUnitdataInd};
use crate::tp::{TpTimeslotInd, TpUnitdataInd};

/// The primitives that travel between entities.
#[derive(Debug)]
pub enum SapMsgInner {
    // TP-SAP (contents not defined in the standard)
    TpTimeslotInd(TpTimeslotInd),
    TpUnitdataInd(TpUnitdataInd),

    // TMV-SAP
    TmvUnitdataInd(TmvUnitdataInd),
    TmvConfigureReq(TmvConfigureReq),

    // TMA-SAP
    TmaUnitdataInd(TmaUnitdataInd),

    // TMD-SAP
    TmdCircuitDataInd(TmdCircuitDataInd),
}

/// Envelope for a SAP primitive in the message router.
#[derive(Debug)]
pub struct SapMsg {
    pub sap: Sap,
    pub src: TetraEntity,
    pub dest: TetraEntity,
    /// Downlink time at the moment the message was created
    pub dltime: TdmaTime,
    pub msg: SapMsgInner,
}

impl SapMsg {
    pub fn get_source(&self) -> &TetraEntity {
        &self.src
    }

    pub fn get_dest(&self) -> &TetraEntity {
        &self.dest
    }

    pub fn get_sap(&self) -> &Sap {
        &self.sap
    }
}
