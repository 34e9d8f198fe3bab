//! Convenience re-exports for common use.

pub use crate::agent::{ChatSession, TurnOrchestrator, TurnOutcome, TurnResult, FALLBACK_REPLY};
pub use crate::config::LumoConfig;
pub use crate::error::{LumoError, Result};
pub use crate::history::{HistoryStore, InMemoryHistoryStore};
pub use crate::models::LanguageModel;
pub use crate::persona::PersonaStore;
pub use crate::provider::{GatewayReply, GatewayRequest, ModelGateway};
pub use crate::types::{ConversationId, ConversationState, GenerationSettings, Message, Role};
