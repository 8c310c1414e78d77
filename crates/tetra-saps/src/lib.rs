//! SAP primitives exchanged between the entities of the downlink monitor.
//! See Clause 19.2.1 for the SAP overview; only the SAPs crossed by the
//! downlink receive path are present.

pub mod sapmsg;
pub mod tma;
pub mod tmd;
pub mod tmv;
pub mod tp;

pub use sapmsg::{SapMsg, SapMsgInner};
