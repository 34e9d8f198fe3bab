//! Configuration system (layered: code > env > secrets file > defaults).

pub mod secrets;

pub use secrets::{ProviderSecret, SecretsFile};

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::LumoError;
use crate::models::DEFAULT_MODEL;
use crate::types::GenerationSettings;

/// Layered configuration for a Lumo session.
///
/// Resolution order for credentials and base URLs:
/// 1. Explicit values (`set_api_key`, `set_base_url`)
/// 2. Environment variables (after loading `.env`)
/// 3. The secrets file (`LUMO_SECRETS_FILE`, default `~/.lumo/secrets.toml`)
#[derive(Clone)]
pub struct LumoConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
    /// Model selector, `provider:model_id`.
    pub model: String,
    pub settings: GenerationSettings,
    /// HTTP request timeout for gateway calls. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Directory for file-backed history. `None` keeps history in memory.
    pub history_dir: Option<PathBuf>,
    /// File holding a persona instruction to start with.
    pub persona_file: Option<PathBuf>,
}

impl fmt::Debug for LumoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<String> = self
            .api_keys
            .read()
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("LumoConfig")
            .field("credentials_for", &providers)
            .field("base_urls", &self.base_urls)
            .field("model", &self.model)
            .field("settings", &self.settings)
            .field("request_timeout", &self.request_timeout)
            .field("history_dir", &self.history_dir)
            .field("persona_file", &self.persona_file)
            .finish()
    }
}

impl Default for LumoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LumoConfig {
    /// Create a config with defaults and no credentials.
    pub fn new() -> Self {
        Self {
            api_keys: Arc::new(RwLock::new(HashMap::new())),
            base_urls: Arc::new(RwLock::new(HashMap::new())),
            model: DEFAULT_MODEL.to_string(),
            settings: GenerationSettings::default(),
            request_timeout: None,
            history_dir: None,
            persona_file: None,
        }
    }

    /// Load from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, LumoError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, LumoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        let secrets_path = lookup("LUMO_SECRETS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(SecretsFile::default_path);
        if let Some(secrets) = SecretsFile::load(&secrets_path)? {
            config.apply_secrets(&secrets);
        }

        let env_mappings = [
            ("GEMINI_API_KEY", "google"),
            ("GOOGLE_API_KEY", "google"),
            ("OPENAI_API_KEY", "openai-compatible"),
            ("OPENAI_COMPAT_API_KEY", "openai-compatible"),
        ];
        for (env_var, provider) in &env_mappings {
            if let Some(key) = non_empty(lookup(env_var)) {
                config.set_api_key(provider, key);
            }
        }

        let url_mappings = [
            ("GOOGLE_BASE_URL", "google"),
            ("OPENAI_COMPAT_BASE_URL", "openai-compatible"),
        ];
        for (env_var, provider) in &url_mappings {
            if let Some(url) = non_empty(lookup(env_var)) {
                config.set_base_url(provider, url);
            }
        }

        if let Some(model) = non_empty(lookup("LUMO_MODEL")) {
            config.model = model;
        }
        if let Some(raw) = non_empty(lookup("LUMO_TEMPERATURE")) {
            config.settings.temperature = Some(parse_var("LUMO_TEMPERATURE", &raw)?);
        }
        if let Some(raw) = non_empty(lookup("LUMO_MAX_TOKENS")) {
            config.settings.max_tokens = Some(parse_var("LUMO_MAX_TOKENS", &raw)?);
        }
        if let Some(raw) = non_empty(lookup("LUMO_REQUEST_TIMEOUT_SECS")) {
            let secs: u64 = parse_var("LUMO_REQUEST_TIMEOUT_SECS", &raw)?;
            config.request_timeout = timeout_from_secs(secs)?;
        }
        if let Some(dir) = non_empty(lookup("LUMO_HISTORY_DIR")) {
            config.history_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = non_empty(lookup("LUMO_PERSONA_FILE")) {
            config.persona_file = Some(PathBuf::from(file));
        }

        Ok(config)
    }

    fn apply_secrets(&self, secrets: &SecretsFile) {
        let tables = [
            ("google", secrets.gemini.as_ref()),
            ("openai-compatible", secrets.openai_compatible.as_ref()),
        ];
        for (provider, table) in tables {
            let Some(table) = table else { continue };
            if let Some(key) = non_empty(table.api_key.clone()) {
                self.set_api_key(provider, key);
            }
            if let Some(url) = non_empty(table.base_url.clone()) {
                self.set_base_url(provider, url);
            }
        }
    }

    pub fn set_api_key(&self, provider: &str, key: String) {
        if let Ok(mut keys) = self.api_keys.write() {
            keys.insert(provider.to_string(), key);
        }
    }

    /// Resolve the credential for a provider.
    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.read().ok()?.get(provider).cloned()
    }

    pub fn set_base_url(&self, provider: &str, url: String) {
        if let Ok(mut urls) = self.base_urls.write() {
            urls.insert(provider.to_string(), url);
        }
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.read().ok()?.get(provider).cloned()
    }

    /// Check if a provider has a credential configured.
    pub fn has_credentials(&self, provider: &str) -> bool {
        self.get_api_key(provider).is_some()
    }
}

/// Convert a timeout in seconds into a duration. Zero is rejected.
pub fn timeout_from_secs(secs: u64) -> Result<Option<Duration>, LumoError> {
    if secs == 0 {
        return Err(LumoError::Configuration(
            "request timeout must be at least one second".into(),
        ));
    }
    Ok(Some(Duration::from_secs(secs)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, LumoError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| LumoError::Configuration(format!("Invalid {name} '{raw}': {e}")))
}
