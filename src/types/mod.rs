//! Core types for Lumo.

pub mod conversation;
pub mod generation;
pub mod message;
pub mod usage;

pub use conversation::*;
pub use generation::*;
pub use message::*;
pub use usage::*;
