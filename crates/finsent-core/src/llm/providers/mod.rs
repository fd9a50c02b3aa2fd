//! Completion service implementations

mod openai;

#[cfg(test)]
mod openai_tests;

pub use openai::OpenAiCompletionService;
