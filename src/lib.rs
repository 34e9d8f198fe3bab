//! Lumo: a persona-driven chat relay for hosted language models.
//!
//! A user utterance goes through a [`agent::TurnOrchestrator`], which prepends
//! the current persona instruction and the stored conversation, asks a
//! [`provider::ModelGateway`] for one reply, and records the turn in a
//! [`history::HistoryStore`]. Failures never reach the user as errors: they
//! get a fixed friendly apology instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use lumo::prelude::*;
//!
//! # async fn example() -> lumo::error::Result<()> {
//! let config = LumoConfig::from_env()?;
//! let session = ChatSession::connect(&config).await?;
//! println!("{}", session.start().await.display_text);
//! println!("{}", session.submit("What's a rainbow made of?").await);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod persona;
pub mod prelude;
pub mod provider;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
