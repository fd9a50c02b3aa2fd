use super::openai::{OpenAiCompletionService, build_request_body, parse_response};
use crate::config::ProviderConfig;
use crate::error::{FinsentError, UnifiedError};
use crate::llm::{CompletionRequest, CompletionService, LlmMessage, SamplingParams};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

fn request() -> CompletionRequest {
    CompletionRequest {
        model_id: "gpt-4-turbo-2024-04-09".to_string(),
        messages: vec![
            LlmMessage::system("You are a sentiment analysis expert."),
            LlmMessage::user("UBS reports record profit."),
            LlmMessage::user("Score the sentiment."),
        ],
        sampling: SamplingParams::default(),
    }
}

#[test]
fn test_request_body_uses_deterministic_sampling() {
    let body = build_request_body(&request());

    assert_eq!(body["model"], "gpt-4-turbo-2024-04-09");
    assert_eq!(body["max_tokens"], 60);
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["top_p"], 1.0);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "UBS reports record profit.");
    assert_eq!(messages[2]["content"], "Score the sentiment.");
}

#[test]
fn test_parse_response_extracts_content() {
    let body = json!({
        "id": "chatcmpl-1",
        "model": "gpt-4-turbo-2024-04-09",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "1. Strong quarterly results." },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 8, "total_tokens": 128 }
    });

    let completion = parse_response(body).unwrap();
    assert_eq!(completion.content, "1. Strong quarterly results.");

    let raw: serde_json::Value = serde_json::from_str(&completion.raw_payload).unwrap();
    assert_eq!(raw["id"], "chatcmpl-1");
    assert!(!completion.raw_payload.contains('\n'));
}

#[test]
fn test_parse_response_without_content_is_error() {
    let body = json!({ "choices": [] });
    let err = parse_response(body).unwrap_err();
    assert!(matches!(err, FinsentError::Llm { .. }));
}

#[test]
fn test_parse_response_error_object() {
    let body = json!({ "error": { "message": "model overloaded", "type": "server_error" } });
    let err = parse_response(body).unwrap_err();
    assert!(err.to_string().contains("model overloaded"));
}

#[tokio::test]
async fn test_request_timeout_reports_configured_limit() {
    // accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });

    let config = ProviderConfig {
        base_url: format!("http://{}", addr),
        request_timeout: Duration::from_millis(200),
        max_retries: 0,
        ..ProviderConfig::default()
    };
    let service = OpenAiCompletionService::new(config, "sk-test").unwrap();

    let err = service.complete(&request()).await.unwrap_err();
    server.abort();

    assert!(matches!(err, FinsentError::Timeout { seconds: 1, .. }), "{err:?}");
    assert!(err.is_retryable());
    assert!(!err.to_string().contains("after 0 seconds"));
}
