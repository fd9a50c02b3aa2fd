//! API key loading
//!
//! The key lives in a single fixed-name file next to the working directory.
//! A missing key is fatal for the run and is never retried.

use crate::error::{FinsentError, FinsentResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the key file
pub const API_KEY_ENV: &str = "FINSENT_API_KEY";

/// Source of the completion service secret
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> FinsentResult<String>;
}

/// Reads the key from a file, unless [`API_KEY_ENV`] is set.
#[derive(Debug, Clone)]
pub struct ApiKeyFile {
    path: PathBuf,
    use_env: bool,
}

impl ApiKeyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_env: true,
        }
    }

    /// Ignore the environment override
    pub fn file_only(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for ApiKeyFile {
    fn api_key(&self) -> FinsentResult<String> {
        if self.use_env {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                let key = key.trim();
                if !key.is_empty() {
                    debug!("using API key from {}", API_KEY_ENV);
                    return Ok(key.to_string());
                }
            }
        }

        let path_str = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            FinsentError::credential_missing(format!("cannot read API key file: {}", e), &path_str)
        })?;

        let key = content.trim();
        if key.is_empty() {
            return Err(FinsentError::credential_missing("API key file is empty", path_str));
        }

        debug!("loaded API key from {}", path_str);
        Ok(key.to_string())
    }
}

/// A key held in memory
#[derive(Debug, Clone)]
pub struct StaticCredential(pub String);

impl CredentialProvider for StaticCredential {
    fn api_key(&self) -> FinsentResult<String> {
        Ok(self.0.clone())
    }
}
