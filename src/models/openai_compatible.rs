//! OpenAI-compatible model definitions.

use serde::{Deserialize, Serialize};

/// A model served by any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OpenAiCompatibleModel {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAiCompatibleModel {
    pub fn new(model_id: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            model_id: model_id.into(),
            base_url,
        }
    }
}
