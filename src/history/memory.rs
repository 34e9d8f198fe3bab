use std::collections::HashMap;
use std::sync::RwLock;

use super::{ensure_storable, HistoryStore};
use crate::error::LumoError;
use crate::types::{ConversationId, Message};

/// Process-local history keyed by conversation id.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    conversations: RwLock<HashMap<ConversationId, Vec<Message>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations with at least one message.
    pub fn conversation_count(&self) -> usize {
        self.conversations
            .read()
            .map(|map| map.len())
            .unwrap_or_default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, id: &ConversationId, message: &Message) -> Result<(), LumoError> {
        ensure_storable(message)?;
        let mut map = self
            .conversations
            .write()
            .map_err(|_| LumoError::Storage("history lock poisoned".into()))?;
        map.entry(*id).or_default().push(message.clone());
        Ok(())
    }

    fn get_all(&self, id: &ConversationId) -> Result<Vec<Message>, LumoError> {
        let map = self
            .conversations
            .read()
            .map_err(|_| LumoError::Storage("history lock poisoned".into()))?;
        Ok(map.get(id).cloned().unwrap_or_default())
    }
}
