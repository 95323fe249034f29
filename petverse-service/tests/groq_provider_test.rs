//! Groq provider tests against a mocked HTTP endpoint.

mod common;

use petverse_service::config::GroqConfig;
use petverse_service::services::providers::groq::GroqProvider;
use petverse_service::services::providers::{ChatMessage, ChatProvider, ProviderError};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer, api_key: &str) -> GroqProvider {
    GroqProvider::new(GroqConfig {
        api_key: Secret::new(api_key.to_string()),
        api_base_url: server.uri(),
        model: "llama-3.1-8b-instant".to_string(),
        timeout_secs: 5,
    })
    .expect("Failed to build provider")
}

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are PetVerse AI"),
        ChatMessage::user("Hi"),
    ]
}

#[tokio::test]
async fn sends_bearer_authenticated_completion_request() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "messages": [
                { "role": "system", "content": "You are PetVerse AI" },
                { "role": "user", "content": "Hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Hello! 🐶" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = provider(&server, "test-key")
        .complete("llama-3.1-8b-instant", &messages())
        .await
        .expect("completion should succeed");

    assert_eq!(completion.choices, vec!["Hello! 🐶".to_string()]);
}

#[tokio::test]
async fn missing_choices_yield_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "chatcmpl-2" })))
        .mount(&server)
        .await;

    let completion = provider(&server, "test-key")
        .complete("llama-3.1-8b-instant", &messages())
        .await
        .expect("completion should succeed");

    assert!(completion.choices.is_empty());
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = provider(&server, "test-key")
        .complete("llama-3.1-8b-instant", &messages())
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimited)));
}

#[tokio::test]
async fn upstream_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = provider(&server, "bad-key")
        .complete("llama-3.1-8b-instant", &messages())
        .await;

    match result {
        Err(ProviderError::ApiError(msg)) => assert!(msg.contains("invalid api key")),
        other => panic!("expected ApiError, got {:?}", other.map(|c| c.choices)),
    }
}

#[tokio::test]
async fn empty_api_key_never_calls_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider(&server, "");
    assert!(!provider.is_configured());

    let result = provider
        .complete("llama-3.1-8b-instant", &messages())
        .await;

    assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(3))
                .set_body_json(json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let provider = GroqProvider::new(GroqConfig {
        api_key: Secret::new("test-key".to_string()),
        api_base_url: server.uri(),
        model: "llama-3.1-8b-instant".to_string(),
        timeout_secs: 1,
    })
    .expect("Failed to build provider");

    let result = provider
        .complete("llama-3.1-8b-instant", &messages())
        .await;

    assert!(matches!(result, Err(ProviderError::Timeout)));
}
