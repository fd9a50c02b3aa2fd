//! Session configuration and reporting types

use crate::config::FinsentConfig;
use crate::llm::SamplingParams;
use crate::quota::QuotaSnapshot;
use serde::Serialize;
use std::fmt;

/// Static per-session settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub model_id: String,
    pub system_instructions: String,
    pub task_prompt: String,
    pub sampling: SamplingParams,
}

impl SessionConfig {
    /// Take model settings from the global config and pair them with a task prompt
    pub fn from_config(config: &FinsentConfig, task_prompt: impl Into<String>) -> Self {
        Self {
            model_id: config.model.model_id.clone(),
            system_instructions: config.model.system_instructions.clone(),
            task_prompt: task_prompt.into(),
            sampling: config.model.sampling,
        }
    }
}

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Open,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "open"),
            SessionState::Closed => write!(f, "closed"),
        }
    }
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub annotated: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub audit_entries: u64,
    /// Entries that could not be written to the sink
    pub audit_errors: u64,
    pub quota: QuotaSnapshot,
}
