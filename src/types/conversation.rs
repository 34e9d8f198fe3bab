//! Conversation identity and lifecycle state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LumoError;

/// Opaque identifier of one chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Allocate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ConversationId {
    type Err = LumoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| LumoError::InvalidArgument(format!("Invalid conversation id '{s}': {e}")))
    }
}

/// Lifecycle of a conversation. There is no closed state: a conversation
/// simply becomes unreferenced after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Just created, no turn recorded.
    Empty,
    /// At least one turn (successful or not) recorded.
    Active,
}

impl ConversationState {
    pub fn from_len(len: usize) -> Self {
        if len == 0 {
            Self::Empty
        } else {
            Self::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(ConversationId::new(), ConversationId::new());
    }

    #[test]
    fn display_parse_roundtrip() {
        let id = ConversationId::new();
        let parsed: ConversationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<ConversationId>().is_err());
    }

    #[test]
    fn state_from_len() {
        assert_eq!(ConversationState::from_len(0), ConversationState::Empty);
        assert_eq!(ConversationState::from_len(1), ConversationState::Active);
    }
}
