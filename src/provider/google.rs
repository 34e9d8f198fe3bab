//! Google Gemini `generateContent` gateway.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::LumoError;
use crate::models::google::GoogleModel;
use crate::types::*;

use super::{GatewayReply, GatewayRequest, ModelGateway};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleGateway {
    model: GoogleModel,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleGateway {
    pub fn new(
        model: GoogleModel,
        api_key: String,
        base_url: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            api_key,
            client,
        }
    }

    /// Gemini wants system text out of band and `user`/`model` turns that
    /// alternate, so consecutive turns of one role are folded together.
    pub fn build_request_body(&self, request: &GatewayRequest) -> Value {
        let mut system_parts: Vec<Value> = Vec::new();
        let mut contents: Vec<(&'static str, Vec<Value>)> = Vec::new();

        for msg in &request.messages {
            let role = match msg.role {
                Role::System => {
                    if !msg.content.is_empty() {
                        system_parts.push(json!({ "text": msg.content }));
                    }
                    continue;
                }
                Role::User => "user",
                Role::Assistant => "model",
            };
            let part = json!({ "text": msg.content });
            if let Some((last_role, parts)) = contents.last_mut() {
                if *last_role == role {
                    parts.push(part);
                    continue;
                }
            }
            contents.push((role, vec![part]));
        }

        let contents: Vec<Value> = contents
            .into_iter()
            .map(|(role, parts)| json!({ "role": role, "parts": parts }))
            .collect();

        let mut body = serde_json::Map::new();
        body.insert("contents".into(), Value::Array(contents));

        if !system_parts.is_empty() {
            body.insert(
                "systemInstruction".into(),
                json!({ "parts": system_parts }),
            );
        }

        let mut gen_config = serde_json::Map::new();
        if let Some(max) = request.settings.max_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = request.settings.top_p {
            gen_config.insert("topP".into(), top_p.into());
        }
        if let Some(ref stops) = request.settings.stop_sequences {
            gen_config.insert("stopSequences".into(), json!(stops));
        }
        if !gen_config.is_empty() {
            body.insert("generationConfig".into(), Value::Object(gen_config));
        }

        Value::Object(body)
    }
}

#[async_trait]
impl ModelGateway for GoogleGateway {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn invoke(&self, request: &GatewayRequest) -> Result<GatewayReply, LumoError> {
        let body = self.build_request_body(request);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        );

        debug!(
            model = self.model.as_str(),
            messages = request.messages.len(),
            "Google invoke"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await?;
        if status != 200 {
            return Err(super::http::status_to_error(status, &body_text));
        }

        let data: GeminiResponse = serde_json::from_str(&body_text)
            .map_err(|e| LumoError::InvalidResponse(format!("Gemini response: {e}")))?;

        let candidate = data.candidates.into_iter().next().ok_or_else(|| {
            let reason = data
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            LumoError::InvalidResponse(format!("Gemini returned no candidates ({reason})"))
        })?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") => Some(FinishReason::Stop),
            Some("MAX_TOKENS") => Some(FinishReason::Length),
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") => {
                Some(FinishReason::ContentFilter)
            }
            Some(_) => Some(FinishReason::Other),
            None => None,
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LumoError::InvalidResponse(format!(
                "Gemini returned an empty reply (finish reason {:?})",
                candidate.finish_reason
            )));
        }

        let usage = data
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(GatewayReply {
            message: Message::assistant(text),
            usage,
            finish_reason,
        })
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
