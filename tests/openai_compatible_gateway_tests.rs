//! OpenAI-compatible gateway tests against a local mock server.
#![cfg(feature = "openai-compatible")]

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumo::config::LumoConfig;
use lumo::error::LumoError;
use lumo::models::LanguageModel;
use lumo::provider::openai_compatible::OpenAiCompatibleGateway;
use lumo::provider::{create_gateway, GatewayRequest, ModelGateway};
use lumo::types::*;

fn request() -> GatewayRequest {
    GatewayRequest {
        messages: vec![Message::system("Be Lumo."), Message::user("Hi")],
        settings: GenerationSettings::default(),
    }
}

#[tokio::test]
async fn successful_reply_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer local-key"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "messages": [
                { "role": "system", "content": "Be Lumo." },
                { "role": "user", "content": "Hi" }
            ],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Hello, friend!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = OpenAiCompatibleGateway::new(
        "llama3.2".into(),
        Some("local-key".into()),
        format!("{}/v1", server.uri()),
        reqwest::Client::new(),
    );
    let reply = gateway.invoke(&request()).await.unwrap();

    assert_eq!(reply.text(), "Hello, friend!");
    assert_eq!(reply.finish_reason, Some(FinishReason::Stop));
    assert_eq!(reply.usage.total_tokens, 13);
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "slow down", "retry_after": 1.5 }
        })))
        .mount(&server)
        .await;

    let gateway = OpenAiCompatibleGateway::new(
        "llama3.2".into(),
        None,
        format!("{}/v1", server.uri()),
        reqwest::Client::new(),
    );
    let err = gateway.invoke(&request()).await.unwrap_err();

    assert!(matches!(
        err,
        LumoError::RateLimited {
            retry_after_ms: Some(1500)
        }
    ));
}

#[tokio::test]
async fn empty_choices_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let gateway = OpenAiCompatibleGateway::new(
        "llama3.2".into(),
        None,
        format!("{}/v1", server.uri()),
        reqwest::Client::new(),
    );
    let err = gateway.invoke(&request()).await.unwrap_err();

    assert!(matches!(err, LumoError::InvalidResponse(_)));
}

#[test]
fn factory_requires_a_base_url() {
    let model: LanguageModel = "openai-compatible:llama3.2".parse().expect("model parse");
    let config = LumoConfig::new();

    let err = match create_gateway(&model, &config) {
        Ok(_) => panic!("expected missing base url error"),
        Err(err) => err,
    };
    let text = err.to_string();
    assert!(text.contains("OPENAI_COMPAT_BASE_URL"), "unexpected error: {text}");
}

#[test]
fn factory_builds_without_a_key() {
    let model: LanguageModel = "openai-compatible:llama3.2".parse().expect("model parse");
    let config = LumoConfig::new();
    config.set_base_url("openai-compatible", "http://localhost:11434/v1".to_string());

    let gateway = create_gateway(&model, &config).expect("gateway");
    assert_eq!(gateway.provider_name(), "openai-compatible");
    assert_eq!(gateway.model_id(), "llama3.2");
}
