//! Single-article annotation
//!
//! [`AnnotationClient`] turns one article into one [`AnnotationResult`]. It
//! never returns an error: every service failure is folded into
//! [`AnnotationResult::Failure`] so the caller can substitute the sentinel
//! label and keep going.

mod client;
mod prompt;
mod request;
mod score;


pub use client::{AnnotationClient, RetryPolicy};
pub use prompt::{SENTINEL_LABEL, task_prompt};
pub use request::{AnnotationRequest, AnnotationResult};
pub use score::{SentimentCategory, SentimentScore};
