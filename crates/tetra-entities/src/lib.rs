#![allow(dead_code)]

pub mod entity_trait;
pub mod lmac;
pub mod messagerouter;
pub mod phy;
pub mod report;
pub mod umac;

// Re-export commonly used items from the router
pub use entity_trait::TetraEntityTrait;
pub use messagerouter::{MessagePrio, MessageQueue, MessageRouter};
