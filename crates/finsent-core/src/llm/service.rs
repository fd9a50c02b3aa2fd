//! The completion service seam

use super::messages::LlmMessage;
use crate::error::FinsentResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Maximum tokens in the completion
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    /// Deterministic sampling with a short output cap
    fn default() -> Self {
        Self {
            max_output_tokens: 60,
            temperature: 0.0,
            top_p: 1.0,
        }
    }
}

/// One completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model_id: String,
    /// Ordered messages: system first, then the user parts
    pub messages: Vec<LlmMessage>,
    pub sampling: SamplingParams,
}

/// A successful completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text of the first choice
    pub content: String,
    /// Full response body, kept for the audit log
    pub raw_payload: String,
}

/// A large-language-model completion endpoint.
///
/// Implementations return `Err` for every transport, protocol or provider
/// failure. They must not panic on malformed responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Provider name used in logs and audit records
    fn name(&self) -> &'static str;

    /// Run one completion
    async fn complete(&self, request: &CompletionRequest) -> FinsentResult<Completion>;
}
