//! Conversation core: turn orchestration and session lifecycle.

pub mod orchestrator;
pub mod session;

pub use orchestrator::{TurnOrchestrator, TurnOutcome, TurnResult, FALLBACK_REPLY};
pub use session::{ChatSession, ICEBREAKER_PROMPT};
