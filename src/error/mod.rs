//! Error types for Lumo.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

/// Primary error type for all Lumo operations.
#[derive(Error, Debug)]
pub enum LumoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl LumoError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Wrap any error as an initialization failure, keeping its message.
    pub fn initialization(source: impl std::fmt::Display) -> Self {
        Self::Initialization(source.to_string())
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_)
            | Self::Initialization(_)
            | Self::ModelNotFound(_)
            | Self::InvalidArgument(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::InvalidResponse(_) => ErrorCategory::MalformedResponse,
            Self::Io(_) | Self::Storage(_) => ErrorCategory::Storage,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }
}

impl From<toml::de::Error> for LumoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LumoError>;
