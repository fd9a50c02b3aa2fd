//! Finsent Core Library
//!
//! Rate-limited sentiment annotation of news articles with a large language
//! model. A batch run opens one [`AnnotationSession`] per dataset; the session
//! keeps each call under a per-minute quota, substitutes a sentinel label for
//! failed calls and records every response in an append-only audit log.

pub mod annotation;
pub mod audit;
pub mod batch;
pub mod config;
pub mod error;
pub mod llm;
pub mod quota;
pub mod session;

// Re-export commonly used types
pub use annotation::{AnnotationClient, AnnotationRequest, AnnotationResult, RetryPolicy, SENTINEL_LABEL};
pub use audit::{AuditLogEntry, AuditSink, JsonlAuditSink};
pub use batch::{Bank, BatchRunner, FileOutcome, LabelTally};
pub use config::{ApiKeyFile, CredentialProvider, FinsentConfig};
pub use error::{FinsentError, FinsentResult, UnifiedError};
pub use llm::{Completion, CompletionRequest, CompletionService, OpenAiCompletionService};
pub use quota::{QuotaConfig, QuotaTracker};
pub use session::{AnnotationSession, SessionConfig, SessionSummary};
