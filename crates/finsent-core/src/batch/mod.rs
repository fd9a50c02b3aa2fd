//! Batch annotation of CSV datasets
//!
//! Each input file gets its own [`AnnotationSession`](crate::session::AnnotationSession),
//! its own timestamped audit log and a timestamped copy of the dataset with a
//! `Sentiment` column.

mod bank;
mod dataset;
mod paths;
mod runner;


pub use bank::Bank;
pub use dataset::{CONTENT_COLUMN, Dataset, SENTIMENT_COLUMN};
pub use paths::{audit_log_path, output_path, run_timestamp};
pub use runner::{BatchRunner, FileOutcome, LabelTally};
