use std::collections::{HashMap, VecDeque};

use tetra_core::TetraEntity;
use tetra_saps::SapMsg;

use crate::TetraEntityTrait;

#[derive(Default)]
pub enum MessagePrio {
    /// Delivered before everything already queued. Used for messages that
    /// change how the remaining blocks of the current burst are decoded
    /// (AACH usage, BSCH scrambling update, stolen-slot indication).
    Immediate,
    #[default]
    Normal,
}

pub struct MessageQueue {
    messages: VecDeque<SapMsg>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self { messages: VecDeque::new() }
    }

    pub fn push_back(&mut self, message: SapMsg) {
        self.messages.push_back(message);
    }

    pub fn push_prio(&mut self, message: SapMsg, prio: MessagePrio) {
        match prio {
            MessagePrio::Immediate => self.messages.push_front(message),
            MessagePrio::Normal => self.messages.push_back(message),
        }
    }

    pub fn pop_front(&mut self) -> Option<SapMsg> {
        self.messages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers SAP messages between the registered entities. The burst
/// synchronizer is not registered (it never receives messages); it pushes
/// into the queue and the driving loop drains it after every symbol.
pub struct MessageRouter {
    entities: HashMap<TetraEntity, Box<dyn TetraEntityTrait>>,
    msg_queue: MessageQueue,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            msg_queue: MessageQueue::new(),
        }
    }

    pub fn register_entity(&mut self, entity: Box<dyn TetraEntityTrait>) {
        let entity_type = entity.entity();
        tracing::debug!("register_entity {:?}", entity_type);
        self.entities.insert(entity_type, entity);
    }

    /// Mut ref to a registered entity, for test inspection
    pub fn get_entity(&mut self, entity: TetraEntity) -> Option<&mut dyn TetraEntityTrait> {
        self.entities.get_mut(&entity).map(|e| e.as_mut())
    }

    /// The input side of the queue, for the burst synchronizer
    pub fn queue_mut(&mut self) -> &mut MessageQueue {
        &mut self.msg_queue
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        self.msg_queue.push_back(message);
    }

    fn deliver_message(&mut self) {
        if let Some(message) = self.msg_queue.pop_front() {
            tracing::trace!(
                "deliver_message {:?}: {:?} -> {:?}",
                message.get_sap(),
                message.get_source(),
                message.get_dest()
            );
            let dest = message.get_dest();
            if let Some(entity) = self.entities.get_mut(dest) {
                entity.rx_prim(&mut self.msg_queue, message);
            } else {
                tracing::warn!("deliver_message: no entity registered for {:?}", dest);
            }
        }
    }

    pub fn deliver_all_messages(&mut self) {
        while !self.msg_queue.is_empty() {
            self.deliver_message();
        }
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}
