//! Shared test helpers and mock gateway.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use lumo::agent::{ChatSession, TurnOrchestrator};
use lumo::error::LumoError;
use lumo::history::{HistoryStore, InMemoryHistoryStore};
use lumo::persona::PersonaStore;
use lumo::provider::{GatewayReply, GatewayRequest, ModelGateway};
use lumo::types::*;

/// A gateway that replays queued outcomes and records every request.
///
/// When the queue is empty it answers `"Mock response"`.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, LumoError>>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, text: &str) {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: LumoError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GatewayRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("gateway was never invoked")
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-1"
    }

    async fn invoke(&self, request: &GatewayRequest) -> Result<GatewayReply, LumoError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()));
        next.map(|text| GatewayReply {
            message: Message::assistant(text),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            finish_reason: Some(FinishReason::Stop),
        })
    }
}

/// History that can be told to fail reads, or appends of one role.
///
/// Whatever it does accept lands in `inner` for inspection.
pub struct FaultyHistory {
    pub inner: InMemoryHistoryStore,
    fail_reads: bool,
    reject_role: Option<Role>,
}

impl FaultyHistory {
    pub fn failing_reads() -> Self {
        Self {
            inner: InMemoryHistoryStore::new(),
            fail_reads: true,
            reject_role: None,
        }
    }

    pub fn rejecting(role: Role) -> Self {
        Self {
            inner: InMemoryHistoryStore::new(),
            fail_reads: false,
            reject_role: Some(role),
        }
    }
}

impl HistoryStore for FaultyHistory {
    fn append(&self, id: &ConversationId, message: &Message) -> Result<(), LumoError> {
        if self.reject_role == Some(message.role) {
            return Err(LumoError::Storage(format!("{} appends refused", message.role)));
        }
        self.inner.append(id, message)
    }

    fn get_all(&self, id: &ConversationId) -> Result<Vec<Message>, LumoError> {
        if self.fail_reads {
            return Err(LumoError::Storage("history unreadable".into()));
        }
        self.inner.get_all(id)
    }
}

/// Orchestrator over a given history store, with a fresh scripted gateway.
pub fn orchestrator_with(
    history: Arc<dyn HistoryStore>,
) -> (TurnOrchestrator, Arc<ScriptedGateway>) {
    let gateway = Arc::new(ScriptedGateway::new());
    let orchestrator =
        TurnOrchestrator::new(gateway.clone(), history, Arc::new(PersonaStore::default()));
    (orchestrator, gateway)
}

/// Everything a test needs to drive and inspect one orchestrator.
pub struct Harness {
    pub gateway: Arc<ScriptedGateway>,
    pub history: Arc<InMemoryHistoryStore>,
    pub persona: Arc<PersonaStore>,
    pub orchestrator: TurnOrchestrator,
}

pub fn harness() -> Harness {
    let gateway = Arc::new(ScriptedGateway::new());
    let history = Arc::new(InMemoryHistoryStore::new());
    let persona = Arc::new(PersonaStore::default());
    let orchestrator = TurnOrchestrator::new(
        gateway.clone(),
        history.clone() as Arc<dyn HistoryStore>,
        persona.clone(),
    );
    Harness {
        gateway,
        history,
        persona,
        orchestrator,
    }
}

pub fn session() -> (ChatSession, Arc<ScriptedGateway>, Arc<InMemoryHistoryStore>) {
    let h = harness();
    (ChatSession::new(h.orchestrator), h.gateway, h.history)
}

/// Role and content pairs, for comparing sequences without timestamps.
pub fn turns(messages: &[Message]) -> Vec<(Role, String)> {
    messages
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}
