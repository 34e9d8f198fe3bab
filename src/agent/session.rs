//! Chat session: conversation lifecycle for one user.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use super::orchestrator::{TurnOrchestrator, TurnResult};
use crate::config::LumoConfig;
use crate::error::LumoError;
use crate::history;
use crate::models::LanguageModel;
use crate::persona::PersonaStore;
use crate::provider::{self, ModelGateway};
use crate::types::{ConversationId, ConversationState, Message};

/// Utterance sent on the user's behalf to get an opening line.
pub const ICEBREAKER_PROMPT: &str = "Hello!";

/// Per-session context: the orchestrator (with its persona and history) and
/// the conversation currently shown.
///
/// Sessions share nothing mutable with each other.
pub struct ChatSession {
    orchestrator: TurnOrchestrator,
    conversation_id: ConversationId,
    issued: HashSet<ConversationId>,
}

impl ChatSession {
    /// Start a session on a fresh, empty conversation.
    pub fn new(orchestrator: TurnOrchestrator) -> Self {
        let conversation_id = ConversationId::new();
        let mut issued = HashSet::new();
        issued.insert(conversation_id);
        Self {
            orchestrator,
            conversation_id,
            issued,
        }
    }

    /// Build a session from configuration.
    ///
    /// Resolves the model, builds the gateway and sends one probe greeting.
    /// Any failure here is an initialization failure and no turn is attempted.
    pub async fn connect(config: &LumoConfig) -> Result<Self, LumoError> {
        let model: LanguageModel = config.model.parse().map_err(LumoError::initialization)?;
        let gateway: Arc<dyn ModelGateway> = Arc::from(
            provider::create_gateway(&model, config).map_err(LumoError::initialization)?,
        );
        provider::probe(gateway.as_ref(), &config.settings)
            .await
            .map_err(LumoError::initialization)?;

        let history = history::store_from_config(config).map_err(LumoError::initialization)?;
        let persona = match &config.persona_file {
            Some(path) => PersonaStore::from_file(path).map_err(LumoError::initialization)?,
            None => PersonaStore::default(),
        };

        info!(model = %model, "Session connected");

        let orchestrator = TurnOrchestrator::new(gateway, history, Arc::new(persona))
            .with_settings(config.settings.clone());
        Ok(Self::new(orchestrator))
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Continue an existing conversation instead of the current one.
    pub fn resume(&mut self, id: ConversationId) {
        self.issued.insert(id);
        self.conversation_id = id;
    }

    /// Icebreaker on the current conversation.
    pub async fn start(&self) -> TurnResult {
        self.orchestrator
            .run_turn(&self.conversation_id, ICEBREAKER_PROMPT)
            .await
    }

    /// Send user text on the current conversation.
    pub async fn send(&self, text: &str) -> TurnResult {
        self.orchestrator.run_turn(&self.conversation_id, text).await
    }

    pub async fn submit(&self, text: &str) -> String {
        self.send(text).await.display_text
    }

    /// Abandon the current conversation, open a new one and greet.
    ///
    /// The persona is kept. The old history stays in the store, unreferenced.
    pub async fn reset(&mut self) -> (ConversationId, String) {
        let id = self.allocate_id();
        info!(previous = %self.conversation_id, current = %id, "Conversation reset");
        self.conversation_id = id;
        let greeting = self.start().await;
        (id, greeting.display_text)
    }

    pub fn persona(&self) -> String {
        self.orchestrator.persona().get()
    }

    /// Replace the persona; the next turn uses it.
    pub fn apply_persona(&self, text: impl Into<String>) {
        self.orchestrator.persona().set(text);
    }

    pub fn restore_default_persona(&self) {
        self.orchestrator.persona().restore_default();
    }

    pub fn history(&self) -> Result<Vec<Message>, LumoError> {
        self.orchestrator.history().get_all(&self.conversation_id)
    }

    pub fn state(&self) -> Result<ConversationState, LumoError> {
        Ok(ConversationState::from_len(self.history()?.len()))
    }

    fn allocate_id(&mut self) -> ConversationId {
        loop {
            let id = ConversationId::new();
            if self.issued.insert(id) {
                return id;
            }
        }
    }
}
