//! Configuration data model

use super::timeouts;
use crate::llm::SamplingParams;
use crate::quota::QuotaConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Model used when the configuration does not name one
pub const DEFAULT_MODEL_ID: &str = "gpt-4-turbo-2024-04-09";

/// System message sent ahead of every article
pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str =
    "Forget all previous instructions. Pretend you are a sentiment analysis expert.";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinsentConfig {
    pub model: ModelConfig,
    pub provider: ProviderConfig,
    pub quota: QuotaConfig,
    pub paths: PathsConfig,
}

/// What to ask and how to sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_id: String,
    pub system_instructions: String,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            system_instructions: DEFAULT_SYSTEM_INSTRUCTIONS.to_string(),
            sampling: SamplingParams::default(),
        }
    }
}

/// Completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Optional organization header
    pub organization: Option<String>,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Retries for transient failures; 0 sends each article once
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            organization: None,
            connect_timeout: timeouts::connection_timeout(),
            request_timeout: timeouts::request_timeout(),
            max_retries: 2,
        }
    }
}

/// Filesystem layout of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root holding one input directory per bank
    pub data_root: PathBuf,
    /// Root holding one output directory per bank
    pub output_root: PathBuf,
    /// Directory for audit logs
    pub log_dir: PathBuf,
    /// File holding the API key
    pub api_key_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("Data"),
            output_root: PathBuf::from("Output_Data"),
            log_dir: PathBuf::from("Output_Data/Logfiles"),
            api_key_file: PathBuf::from("API-key.txt"),
        }
    }
}
