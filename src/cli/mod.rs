//! CLI entry point for Lumo.

pub mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{timeout_from_secs, LumoConfig};
use crate::error::LumoError;

/// Lumo chat CLI
#[derive(Parser, Debug)]
#[command(name = "lumo", version, about = "Chat with Lumo, a cheerful companion")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat
    Chat(ChatArgs),
    /// Send one message and print the reply
    Ask(AskArgs),
    /// List known Gemini model identifiers
    Models,
}

/// Options shared by every command that opens a session.
#[derive(Parser, Debug, Default)]
pub struct SessionArgs {
    /// Model to use (format: provider:model, e.g., google:gemini-pro)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// File holding the persona instruction to start with
    #[arg(long)]
    pub persona_file: Option<PathBuf>,

    /// Directory for persisted conversation logs
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Give up on a model call after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl SessionArgs {
    /// Apply flags on top of a loaded config.
    pub fn apply(&self, config: &mut LumoConfig) -> Result<(), LumoError> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(LumoError::InvalidArgument(format!(
                    "temperature must be between 0.0 and 2.0, got {temperature}"
                )));
            }
            config.settings.temperature = Some(temperature);
        }
        if let Some(path) = &self.persona_file {
            config.persona_file = Some(path.clone());
        }
        if let Some(dir) = &self.history_dir {
            config.history_dir = Some(dir.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = timeout_from_secs(secs)?;
        }
        Ok(())
    }
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Continue this conversation instead of starting a new one
    #[arg(short, long)]
    pub conversation: Option<String>,

    /// What to say to Lumo
    pub prompt: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
