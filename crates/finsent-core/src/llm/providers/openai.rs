//! OpenAI-compatible chat completion provider

use crate::config::ProviderConfig;
use crate::error::{FinsentError, FinsentResult};
use crate::llm::messages::LlmMessage;
use crate::llm::service::{Completion, CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

const PROVIDER_NAME: &str = "openai";

/// Chat completions over HTTP against an OpenAI-compatible API
pub struct OpenAiCompletionService {
    config: ProviderConfig,
    api_key: String,
    http_client: Client,
}

impl OpenAiCompletionService {
    /// Create a new provider with its own HTTP client
    pub fn new(config: ProviderConfig, api_key: impl Into<String>) -> FinsentResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FinsentError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key: api_key.into(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Timeouts report the configured limit, rounded up to whole seconds
    fn send_error(&self, error: reqwest::Error) -> FinsentError {
        if error.is_timeout() {
            let seconds = self.config.request_timeout.as_secs_f64().ceil() as u64;
            return FinsentError::timeout(seconds).with_context(error.to_string());
        }
        FinsentError::from(error)
    }
}

/// Build the JSON body for a chat completion request
pub(super) fn build_request_body(request: &CompletionRequest) -> Value {
    let messages: Vec<Value> = request.messages.iter().map(message_to_json).collect();
    json!({
        "model": request.model_id,
        "messages": messages,
        "max_tokens": request.sampling.max_output_tokens,
        "temperature": request.sampling.temperature,
        "top_p": request.sampling.top_p,
    })
}

fn message_to_json(message: &LlmMessage) -> Value {
    json!({
        "role": message.role.to_string(),
        "content": message.content,
    })
}

/// Extract the first choice's content and keep the body for auditing
pub(super) fn parse_response(body: Value) -> FinsentResult<Completion> {
    if let Some(error) = body.get("error") {
        let message = error["message"].as_str().unwrap_or("unknown provider error");
        return Err(FinsentError::llm_with_provider(
            format!("provider returned an error object: {}", message),
            PROVIDER_NAME,
        ));
    }

    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            FinsentError::llm_with_provider(
                "response has no choices[0].message.content",
                PROVIDER_NAME,
            )
        })?
        .to_string();

    let raw_payload = serde_json::to_string(&body)?;
    Ok(Completion {
        content,
        raw_payload,
    })
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, request), fields(model = %request.model_id), level = "debug")]
    async fn complete(&self, request: &CompletionRequest) -> FinsentResult<Completion> {
        let mut http_request = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&build_request_body(request));

        if let Some(org) = &self.config.organization {
            http_request = http_request.header("OpenAI-Organization", org);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FinsentError::http_status(
                format!("OpenAI API error (status {}): {}", status, error_text),
                status.as_u16(),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            FinsentError::llm_with_provider(
                format!("Failed to parse OpenAI response: {}", e),
                PROVIDER_NAME,
            )
        })?;

        parse_response(body)
    }
}
