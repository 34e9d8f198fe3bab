//! Model selection and parsing.

use std::str::FromStr;

use super::LanguageModel;
use crate::error::LumoError;

/// Parse a "provider:model" string into a LanguageModel.
pub struct ModelSelector;

impl ModelSelector {
    /// Parse "provider:model_id" into a LanguageModel.
    ///
    /// Examples: "google:gemini-pro", "gemini:gemini-2.5-flash", "openai-compatible:llama3.2"
    pub fn parse(s: &str) -> Result<LanguageModel, LumoError> {
        let (provider, model_id) = s.trim().split_once(':').ok_or_else(|| {
            LumoError::InvalidArgument(format!(
                "Invalid model selector '{s}': expected 'provider:model_id'"
            ))
        })?;

        if model_id.is_empty() {
            return Err(LumoError::InvalidArgument(format!(
                "Invalid model selector '{s}': model id is empty"
            )));
        }

        match provider {
            #[cfg(feature = "google")]
            "google" | "gemini" => {
                use super::google::GoogleModel;
                let m = GoogleModel::from_str(model_id)
                    .unwrap_or(GoogleModel::Custom(model_id.to_string()));
                Ok(LanguageModel::Google(m))
            }
            #[cfg(feature = "openai-compatible")]
            "openai-compatible" | "openai_compatible" => {
                use super::openai_compatible::OpenAiCompatibleModel;
                Ok(LanguageModel::OpenAiCompatible(OpenAiCompatibleModel::new(
                    model_id, None,
                )))
            }
            _ => Ok(LanguageModel::Custom {
                provider: provider.to_string(),
                model_id: model_id.to_string(),
            }),
        }
    }
}

impl FromStr for LanguageModel {
    type Err = LumoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelector::parse(s)
    }
}
