//! Model definitions and selection.

pub mod selector;

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

pub use selector::ModelSelector;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector used when neither the environment nor the command line picks one.
pub const DEFAULT_MODEL: &str = "google:gemini-pro";

/// Top-level language model enum, dispatching to provider-specific variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model")]
pub enum LanguageModel {
    #[cfg(feature = "google")]
    Google(google::GoogleModel),
    #[cfg(feature = "openai-compatible")]
    OpenAiCompatible(openai_compatible::OpenAiCompatibleModel),
    /// Custom model with explicit provider and model ID.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// Get the model's API identifier string.
    pub fn model_id(&self) -> &str {
        match self {
            #[cfg(feature = "google")]
            Self::Google(m) => m.as_str(),
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(m) => m.model_id.as_str(),
            Self::Custom { model_id, .. } => model_id,
        }
    }

    /// Get the provider name.
    pub fn provider_name(&self) -> &str {
        match self {
            #[cfg(feature = "google")]
            Self::Google(_) => "google",
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(_) => "openai-compatible",
            Self::Custom { provider, .. } => provider,
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}
