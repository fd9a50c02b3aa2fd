//! Completion service abstraction and providers

pub mod messages;
pub mod providers;
mod service;

pub use messages::{LlmMessage, MessageRole};
pub use providers::OpenAiCompletionService;
pub use service::{Completion, CompletionRequest, CompletionService, SamplingParams};

#[cfg(test)]
pub use service::MockCompletionService;
