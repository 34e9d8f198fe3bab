//! Generation settings and related enums.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Temperature used when nothing else is configured.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: None,
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: None,
            stop_sequences: None,
        }
    }
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}
