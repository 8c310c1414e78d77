//! Core types for the TETRA downlink monitor
//!
//! Fundamental types shared across the stack: the bit-level PDU primitive,
//! TDMA time, addresses, cell state and PHY block types.

/// Git version string, set at compile time
pub const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");
/// Crate version followed by git version, e.g. "0.1.0-aabbccdd"
pub const MONITOR_VERSION: &str = const_format::formatcp!("{}-{}", env!("CARGO_PKG_VERSION"), GIT_VERSION);

pub mod address;
pub mod bitbuffer;
pub mod cell;
pub mod debug;
pub mod freqs;
pub mod pdu_parse_error;
pub mod phy_types;
pub mod tdma_time;
pub mod tetra_entities;

// Re-export commonly used items
pub use address::{MacAddress, SsiType, TetraAddress};
pub use bitbuffer::BitBuffer;
pub use cell::CellState;
pub use pdu_parse_error::PduParseErr;
pub use phy_types::*;
pub use tdma_time::TdmaTime;
pub use tetra_entities::TetraEntity;

/// SAPs crossed by the downlink receive path
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sap {
    /// PHY / lower MAC
    TpSap,
    /// Lower MAC / upper MAC
    TmvSap,
    /// Upper MAC / higher layers (signalling)
    TmaSap,
    /// Upper MAC / U-plane (circuit mode traffic)
    TmdSap,
}
