use tetra_core::TetraEntity;
use tetra_entities::{MessageQueue, TetraEntityTrait};
use tetra_saps::SapMsg;

/// Test sink: registers under any entity identity and collects every
/// received SAP message for later inspection.
pub struct Sink {
    entity: TetraEntity,
    msgqueue: Vec<SapMsg>,
}

impl Sink {
    pub fn new(entity: TetraEntity) -> Self {
        Self {
            entity,
            msgqueue: vec![],
        }
    }

    pub fn take_msgqueue(&mut self) -> Vec<SapMsg> {
        std::mem::take(&mut self.msgqueue)
    }
}

impl TetraEntityTrait for Sink {
    fn entity(&self) -> TetraEntity {
        self.entity
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("sink: {:?}", message);
        self.msgqueue.push(message);
    }
}
