use as_any::AsAny;
use tetra_saps::SapMsg;

use crate::MessageQueue;
use tetra_core::TetraEntity;

/// Trait for the entities of the monitor stack.
/// Used by the MessageRouter for passing SAP messages between entities.
/// `AsAny` allows tests to downcast an entity and inspect its state.
pub trait TetraEntityTrait: Send + AsAny {
    /// Entity type identifier, used as routing address
    fn entity(&self) -> TetraEntity;

    /// Handle an incoming SAP primitive
    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg);
}
