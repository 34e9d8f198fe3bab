//! Generic gateway for OpenAI-compatible `/chat/completions` endpoints
//! (Ollama, LM Studio, vLLM, hosted proxies).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::LumoError;
use crate::types::*;

use super::http::bearer_headers;
use super::{GatewayReply, GatewayRequest, ModelGateway};

pub struct OpenAiCompatibleGateway {
    model_id: String,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatibleGateway {
    pub fn new(
        model_id: String,
        api_key: Option<String>,
        base_url: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            model_id,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn build_request_body(&self, request: &GatewayRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.to_string(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model_id,
            "messages": messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(max) = request.settings.max_tokens {
                obj.insert("max_tokens".into(), max.into());
            }
            if let Some(temp) = request.settings.temperature {
                obj.insert("temperature".into(), temp.into());
            }
            if let Some(top_p) = request.settings.top_p {
                obj.insert("top_p".into(), top_p.into());
            }
            if let Some(ref stops) = request.settings.stop_sequences {
                obj.insert("stop".into(), json!(stops));
            }
        }

        body
    }
}

#[async_trait]
impl ModelGateway for OpenAiCompatibleGateway {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(&self, request: &GatewayRequest) -> Result<GatewayReply, LumoError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = self.model_id.as_str(),
            messages = request.messages.len(),
            "OpenAI-compatible invoke"
        );

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(self.api_key.as_deref()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await?;
        if status != 200 {
            return Err(super::http::status_to_error(status, &body_text));
        }

        let data: ChatResponse = serde_json::from_str(&body_text)
            .map_err(|e| LumoError::InvalidResponse(format!("chat completion: {e}")))?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LumoError::InvalidResponse("No choices in chat completion".into()))?;

        let text = choice.message.content.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(LumoError::InvalidResponse(
                "chat completion returned an empty reply".into(),
            ));
        }

        let finish_reason = choice.finish_reason.as_deref().map(|r| match r {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        });

        Ok(GatewayReply {
            message: Message::assistant(text),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason,
        })
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
