//! Conversation history storage.

pub mod file;
pub mod memory;

pub use file::FileHistoryStore;
pub use memory::InMemoryHistoryStore;

use std::sync::Arc;

use tracing::info;

use crate::config::LumoConfig;
use crate::error::LumoError;
use crate::types::{ConversationId, Message, Role};

/// Keyed, append-only log of conversation turns.
///
/// Implementations must keep call order per key and serialize concurrent
/// appends to the same key. Reading an unknown key yields an empty history.
pub trait HistoryStore: Send + Sync {
    /// Append one message to the conversation's log.
    fn append(&self, id: &ConversationId, message: &Message) -> Result<(), LumoError>;

    /// Every stored message for the conversation, oldest first.
    fn get_all(&self, id: &ConversationId) -> Result<Vec<Message>, LumoError>;
}

/// Persona instructions are injected per call and never stored.
pub(crate) fn ensure_storable(message: &Message) -> Result<(), LumoError> {
    if message.role == Role::System {
        return Err(LumoError::InvalidArgument(
            "system messages cannot be stored in conversation history".into(),
        ));
    }
    Ok(())
}

/// Pick the history backend described by the config.
pub fn store_from_config(config: &LumoConfig) -> Result<Arc<dyn HistoryStore>, LumoError> {
    match &config.history_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using file-backed conversation history");
            Ok(Arc::new(FileHistoryStore::open(dir.clone())?))
        }
        None => Ok(Arc::new(InMemoryHistoryStore::new())),
    }
}
