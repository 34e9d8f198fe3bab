//! Turn orchestration: one user utterance in, one display text out.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::LumoError;
use crate::history::HistoryStore;
use crate::persona::PersonaStore;
use crate::provider::{GatewayReply, GatewayRequest, ModelGateway};
use crate::types::{ConversationId, GenerationSettings, Message, Role};

/// Shown in place of a reply whenever a turn fails.
pub const FALLBACK_REPLY: &str =
    "Oh dear, my thinking cap seems to be on backwards! Could you try that again?";

/// Whether the display text came from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied,
    Fallback,
}

/// Text to display for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub display_text: String,
    pub outcome: TurnOutcome,
}

impl TurnResult {
    pub fn is_reply(&self) -> bool {
        self.outcome == TurnOutcome::Replied
    }
}

/// Combines persona, stored history and a new utterance into one gateway
/// request, then folds the outcome back into history.
///
/// History is only written after the gateway call completes. The user turn
/// is always recorded; the assistant turn only when it is real model output
/// and the user turn before it was stored.
#[derive(Clone)]
pub struct TurnOrchestrator {
    gateway: Arc<dyn ModelGateway>,
    history: Arc<dyn HistoryStore>,
    persona: Arc<PersonaStore>,
    settings: GenerationSettings,
}

impl TurnOrchestrator {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        history: Arc<dyn HistoryStore>,
        persona: Arc<PersonaStore>,
    ) -> Self {
        Self {
            gateway,
            history,
            persona,
            settings: GenerationSettings::default(),
        }
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn persona(&self) -> &Arc<PersonaStore> {
        &self.persona
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    pub fn gateway(&self) -> &Arc<dyn ModelGateway> {
        &self.gateway
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Outbound list for a turn: `[System(persona)] + history + [User(text)]`.
    ///
    /// The persona is read now, not when the conversation started. History is
    /// sent whole.
    pub fn compose(&self, id: &ConversationId, user_text: &str) -> Result<Vec<Message>, LumoError> {
        let persona = self.persona.get();
        let history = self.history.get_all(id)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(persona));
        messages.extend(history);
        messages.push(Message::user(user_text));
        Ok(messages)
    }

    /// Run one turn. Never fails: any error becomes [`FALLBACK_REPLY`].
    pub async fn run_turn(&self, id: &ConversationId, user_text: &str) -> TurnResult {
        let user_message = Message::user(user_text);

        match self.exchange(id, user_text).await {
            Ok(reply) => {
                if self.record(id, &user_message) {
                    self.record(id, &reply.message);
                } else {
                    error!(
                        conversation = %id,
                        "User turn not recorded, dropping the assistant turn"
                    );
                }
                debug!(
                    conversation = %id,
                    output_tokens = reply.usage.output_tokens,
                    finish_reason = ?reply.finish_reason,
                    "Turn completed"
                );
                TurnResult {
                    display_text: reply.message.content,
                    outcome: TurnOutcome::Replied,
                }
            }
            Err(e) => {
                warn!(
                    conversation = %id,
                    provider = self.gateway.provider_name(),
                    category = %e.category(),
                    error = %e,
                    "Turn failed, answering with fallback"
                );
                self.record(id, &user_message);
                TurnResult {
                    display_text: FALLBACK_REPLY.to_string(),
                    outcome: TurnOutcome::Fallback,
                }
            }
        }
    }

    /// Run one turn and return only the text to display.
    pub async fn submit(&self, id: &ConversationId, user_text: &str) -> String {
        self.run_turn(id, user_text).await.display_text
    }

    async fn exchange(
        &self,
        id: &ConversationId,
        user_text: &str,
    ) -> Result<GatewayReply, LumoError> {
        let request = GatewayRequest {
            messages: self.compose(id, user_text)?,
            settings: self.settings.clone(),
        };
        let reply = self.gateway.invoke(&request).await?;
        if reply.message.role != Role::Assistant {
            return Err(LumoError::InvalidResponse(format!(
                "gateway replied with role '{}'",
                reply.message.role
            )));
        }
        Ok(reply)
    }

    /// Append to history, logging on failure. Returns whether it was stored.
    fn record(&self, id: &ConversationId, message: &Message) -> bool {
        match self.history.append(id, message) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    conversation = %id,
                    role = %message.role,
                    category = %e.category(),
                    error = %e,
                    "Failed to record turn"
                );
                false
            }
        }
    }
}
