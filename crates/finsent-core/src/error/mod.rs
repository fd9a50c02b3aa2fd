//! Error types for Finsent
//!
//! All fallible library operations return [`FinsentResult`]. Every variant
//! carries an optional context string and implements [`UnifiedError`], which
//! gives callers a stable error code and a retry classification.
//!
//! Service failures during annotation are deliberately *not* surfaced through
//! this type past the annotation client; see `annotation::AnnotationResult`.

mod classifiers;
mod constructors;
mod conversions;
mod types;
mod unified_error;

#[cfg(test)]
mod tests;

pub use types::{FinsentError, FinsentResult, UnifiedError};
