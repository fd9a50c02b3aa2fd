//! Annotation request and result types

use super::prompt::SENTINEL_LABEL;
use crate::llm::{CompletionRequest, LlmMessage, SamplingParams};

/// Everything needed for one annotation call.
///
/// The article text is borrowed for the duration of the call only.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationRequest<'a> {
    pub text: &'a str,
    pub system_instructions: &'a str,
    pub task_prompt: &'a str,
    pub model_id: &'a str,
    pub sampling: SamplingParams,
}

impl AnnotationRequest<'_> {
    /// System instructions, then the article, then the task prompt
    pub fn to_completion_request(&self) -> CompletionRequest {
        CompletionRequest {
            model_id: self.model_id.to_string(),
            messages: vec![
                LlmMessage::system(self.system_instructions),
                LlmMessage::user(self.text),
                LlmMessage::user(self.task_prompt),
            ],
            sampling: self.sampling,
        }
    }
}

/// Outcome of one annotation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationResult {
    /// The model answered; `label` is never empty
    Success { label: String, raw_payload: String },
    /// The call failed; `reason` is a human-readable diagnostic
    Failure { reason: String },
}

impl AnnotationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The label to store for this article
    pub fn label_or_sentinel(&self) -> &str {
        match self {
            Self::Success { label, .. } => label,
            Self::Failure { .. } => SENTINEL_LABEL,
        }
    }
}
