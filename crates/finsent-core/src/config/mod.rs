//! Configuration for Finsent
//!
//! A single [`FinsentConfig`] covers the model, the provider endpoint, the
//! quota budgets and the filesystem layout of a batch run. It can be loaded
//! from a JSON, TOML or YAML file; every field has a default.

pub mod credential;
mod file_loader;
mod model;
pub mod timeouts;


pub use credential::{ApiKeyFile, CredentialProvider, StaticCredential};
pub use file_loader::{default_config_path, load_from_file};
pub use model::{
    DEFAULT_MODEL_ID, DEFAULT_SYSTEM_INSTRUCTIONS, FinsentConfig, ModelConfig, PathsConfig,
    ProviderConfig,
};
