//! Gemini client tests against a local one-shot HTTP server.

use super::test_utils::{complete_cases_json, gemini_body, CannedServer};
use casegen::error::ApiError;
use casegen::provider::{
    ChatMessage, CompletionOptions, GeminiClient, ModelProviderClient, OpenAIClient,
};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new(
        "gemini-1.5-flash".to_string(),
        "test-key".to_string(),
        Some(base_url.to_string()),
        TIMEOUT,
    )
    .unwrap()
}

#[tokio::test]
async fn test_gemini_complete_sends_prompt_and_returns_text() {
    let cases = complete_cases_json(2);
    let server = CannedServer::start(200, "OK", &gemini_body(&cases)).await;

    let options = CompletionOptions {
        temperature: Some(0.2),
        max_tokens: None,
    };
    let response = client(&server.base_url)
        .complete(vec![ChatMessage::user("Generate cases for login")], options)
        .await
        .unwrap();

    assert_eq!(response.content, cases);
    assert_eq!(response.model, "gemini-1.5-flash-002");
    assert_eq!(response.usage.total_tokens, 46);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));

    let request = server.received().await;
    let lowered = request.to_lowercase();
    assert!(request.starts_with("POST /models/gemini-1.5-flash:generateContent HTTP/1.1"));
    assert!(lowered.contains("x-goog-api-key: test-key"));

    let body_start = request.find("\r\n\r\n").unwrap() + 4;
    let body: serde_json::Value = serde_json::from_str(&request[body_start..]).unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Generate cases for login"
    );
    assert!(body["generationConfig"]["temperature"].is_number());
}

#[tokio::test]
async fn test_gemini_concatenates_parts() {
    let body = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "[{\"id\": " }, { "text": "\"TC-1\"}]" }] }
        }]
    })
    .to_string();
    let server = CannedServer::start(200, "OK", &body).await;

    let response = client(&server.base_url)
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(response.content, "[{\"id\": \"TC-1\"}]");
    assert_eq!(response.model, "gemini-1.5-flash");
}

#[tokio::test]
async fn test_gemini_empty_text_is_returned_as_empty_content() {
    let server = CannedServer::start(200, "OK", &gemini_body("")).await;

    let response = client(&server.base_url)
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await
        .unwrap();

    assert!(response.content.is_empty());
}

#[tokio::test]
async fn test_gemini_blocked_prompt_is_an_error() {
    let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
    let server = CannedServer::start(200, "OK", body).await;

    let result = client(&server.base_url)
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await;

    match result {
        Err(ApiError::ProviderError(message)) => assert!(message.contains("SAFETY")),
        other => panic!("expected ProviderError, got {:?}", other.map(|r| r.content)),
    }
}

#[tokio::test]
async fn test_gemini_rate_limit_is_classified() {
    let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#;
    let server = CannedServer::start(429, "Too Many Requests", body).await;

    let result = client(&server.base_url)
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await;

    match result {
        Err(ApiError::ProviderRateLimit(message)) => {
            assert!(message.contains("Resource has been exhausted"))
        }
        other => panic!("expected ProviderRateLimit, got {:?}", other.map(|r| r.content)),
    }
}

#[tokio::test]
async fn test_gemini_bad_key_is_an_auth_failure() {
    let body = r#"{"error": {"code": 403, "message": "API key not valid"}}"#;
    let server = CannedServer::start(403, "Forbidden", body).await;

    let result = client(&server.base_url)
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await;

    assert!(matches!(result, Err(ApiError::ProviderAuthFailed(_))));
}

#[tokio::test]
async fn test_openai_compatible_complete() {
    let body = serde_json::json!({
        "id": "chatcmpl-1",
        "model": "local-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "[]" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4 }
    })
    .to_string();
    let server = CannedServer::start(200, "OK", &body).await;

    let client = OpenAIClient::new(
        "local-model".to_string(),
        "sk-test".to_string(),
        Some(format!("{}/v1", server.base_url)),
        TIMEOUT,
    )
    .unwrap();
    let response = client
        .complete(vec![ChatMessage::user("x")], CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(response.content, "[]");
    assert_eq!(response.usage.total_tokens, 4);

    let request = server.received().await;
    assert!(request.starts_with("POST /v1/chat/completions HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
}
