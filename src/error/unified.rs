//! Error classification used for diagnostics.

use strum::{Display, EnumString};

/// Broad error category, logged alongside invocation failures.
///
/// The chat surface never shows these to the user; every invocation failure
/// collapses to the same apology text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    MalformedResponse,
    Configuration,
    Storage,
    Serialization,
}
