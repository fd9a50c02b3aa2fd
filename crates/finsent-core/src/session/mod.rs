//! Annotation sessions
//!
//! A session owns one quota tracker, one annotation client and one audit
//! sink for the length of a batch run:
//!
//! ```text
//! Open --annotate*--> Open --close--> Closed
//! ```
//!
//! Sessions share nothing, so independent batches can run side by side as
//! long as each has its own sink.

mod annotator;
mod types;


pub use annotator::AnnotationSession;
pub use types::{SessionConfig, SessionState, SessionSummary};
