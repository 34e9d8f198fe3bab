//! Host-managed secrets file (`secrets.toml`).
//!
//! ```toml
//! [gemini]
//! api_key = "..."
//!
//! [openai_compatible]
//! api_key = "..."
//! base_url = "http://localhost:11434/v1"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LumoError;

/// Parsed contents of a secrets file. Every table is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SecretsFile {
    #[serde(default)]
    pub gemini: Option<ProviderSecret>,
    #[serde(default)]
    pub openai_compatible: Option<ProviderSecret>,
}

/// Credential and endpoint for one provider.
#[derive(Default, Deserialize)]
pub struct ProviderSecret {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for ProviderSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSecret")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SecretsFile {
    /// Read and parse a secrets file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, LumoError> {
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(LumoError::Io(err)),
        };
        let parsed: SecretsFile = toml::from_str(&raw).map_err(|e| {
            LumoError::Configuration(format!("Invalid secrets file {}: {e}", path.display()))
        })?;
        Ok(Some(parsed))
    }

    /// `~/.lumo/secrets.toml`, or `.lumo/secrets.toml` when no home directory is known.
    pub fn default_path() -> PathBuf {
        default_lumo_dir().join("secrets.toml")
    }
}

pub(crate) fn default_lumo_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".lumo"))
        .unwrap_or_else(|| PathBuf::from(".lumo"))
}
