//! Model gateway trait and implementations.

pub mod http;

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

use async_trait::async_trait;
use tracing::debug;

use crate::config::LumoConfig;
use crate::error::LumoError;
use crate::models::LanguageModel;
use crate::types::{FinishReason, GenerationSettings, Message, Usage};

/// Utterance sent once at startup to prove the gateway answers.
pub const PROBE_PROMPT: &str = "Hello!";

/// An ordered list of role-tagged messages plus sampling settings.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub messages: Vec<Message>,
    pub settings: GenerationSettings,
}

/// One assistant message returned by a gateway.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub message: Message,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

impl GatewayReply {
    pub fn text(&self) -> &str {
        self.message.text()
    }
}

/// A remote text-completion endpoint.
///
/// Failure is an ordinary outcome: implementations return `Err` for
/// transport errors, provider rejections and malformed or empty replies.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;
    /// The model ID this gateway instance serves.
    fn model_id(&self) -> &str;

    /// Send one request and wait for one reply.
    async fn invoke(&self, request: &GatewayRequest) -> Result<GatewayReply, LumoError>;
}

/// Create a gateway for the given model, using the provided config.
#[allow(unused_variables)]
pub fn create_gateway(
    model: &LanguageModel,
    config: &LumoConfig,
) -> Result<Box<dyn ModelGateway>, LumoError> {
    let client = http::build_client(config.request_timeout)?;
    match model {
        #[cfg(feature = "google")]
        LanguageModel::Google(m) => {
            let api_key = config
                .get_api_key("google")
                .ok_or_else(|| LumoError::Authentication("Missing GOOGLE_API_KEY".into()))?;
            Ok(Box::new(google::GoogleGateway::new(
                m.clone(),
                api_key,
                config.get_base_url("google"),
                client,
            )))
        }
        #[cfg(feature = "openai-compatible")]
        LanguageModel::OpenAiCompatible(m) => {
            let base_url = m
                .base_url
                .clone()
                .or_else(|| config.get_base_url("openai-compatible"))
                .ok_or_else(|| {
                    LumoError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into())
                })?;
            Ok(Box::new(openai_compatible::OpenAiCompatibleGateway::new(
                m.model_id.clone(),
                config.get_api_key("openai-compatible"),
                base_url,
                client,
            )))
        }
        LanguageModel::Custom { provider, .. } => Err(LumoError::ModelNotFound(format!(
            "No gateway for provider '{provider}'"
        ))),
    }
}

/// Send a single greeting to check credentials and reachability.
pub async fn probe(
    gateway: &dyn ModelGateway,
    settings: &GenerationSettings,
) -> Result<(), LumoError> {
    let request = GatewayRequest {
        messages: vec![Message::user(PROBE_PROMPT)],
        settings: settings.clone(),
    };
    let reply = gateway.invoke(&request).await?;
    debug!(
        provider = gateway.provider_name(),
        model = gateway.model_id(),
        reply_chars = reply.text().chars().count(),
        "Gateway probe succeeded"
    );
    Ok(())
}
