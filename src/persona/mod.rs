//! Persona instruction store.
//!
//! The persona is the system-level directive prepended to every model call.
//! It is per-session state: each [`crate::agent::ChatSession`] owns its own
//! store, and only the latest value is ever read.

pub mod prompts;

pub use prompts::DEFAULT_PERSONA;

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use tracing::info;

use crate::error::LumoError;

/// Holds the current persona instruction.
#[derive(Debug)]
pub struct PersonaStore {
    instruction: RwLock<String>,
}

impl Default for PersonaStore {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

impl PersonaStore {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            instruction: RwLock::new(initial.into()),
        }
    }

    /// Start from the contents of a text file.
    pub fn from_file(path: &Path) -> Result<Self, LumoError> {
        let text = fs::read_to_string(path).map_err(|e| {
            LumoError::Configuration(format!("Cannot read persona file {}: {e}", path.display()))
        })?;
        Ok(Self::new(text))
    }

    /// Latest instruction, verbatim.
    pub fn get(&self) -> String {
        self.instruction
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the instruction unconditionally. Takes effect on the next turn.
    pub fn set(&self, instruction: impl Into<String>) {
        let instruction = instruction.into();
        info!(
            chars = instruction.chars().count(),
            preview = %preview(&instruction),
            "Persona updated"
        );
        *self
            .instruction
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = instruction;
    }

    pub fn restore_default(&self) {
        self.set(DEFAULT_PERSONA);
    }

    pub fn is_default(&self) -> bool {
        self.get() == DEFAULT_PERSONA
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.trim().chars().take(60).collect();
    if text.trim().chars().count() > 60 {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_is_lumo() {
        let store = PersonaStore::default();
        assert!(store.get().contains("You are Lumo"));
        assert!(store.is_default());
    }

    #[test]
    fn get_after_set_returns_exact_value() {
        let store = PersonaStore::default();
        let value = "  You are a pirate.\n\tSpeak like one!  ";
        store.set(value);
        assert_eq!(store.get(), value);
        assert!(!store.is_default());
    }

    #[test]
    fn empty_instruction_is_accepted() {
        let store = PersonaStore::default();
        store.set("");
        assert_eq!(store.get(), "");
    }

    #[test]
    fn restore_default_brings_back_builtin() {
        let store = PersonaStore::new("custom");
        store.restore_default();
        assert_eq!(store.get(), DEFAULT_PERSONA);
    }

    #[test]
    fn from_file_reads_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("persona.txt");
        fs::write(&path, "You are a calm librarian.").unwrap();
        let store = PersonaStore::from_file(&path).unwrap();
        assert_eq!(store.get(), "You are a calm librarian.");
    }

    #[test]
    fn from_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = PersonaStore::from_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, LumoError::Configuration(_)));
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).len(), 63);
        assert_eq!(preview("short"), "short");
    }
}
