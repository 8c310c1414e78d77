pub mod basic_slotgrant;
pub mod channel_allocation;

/// 10-bit short-lived MAC address label
pub type EventLabel = u16;
