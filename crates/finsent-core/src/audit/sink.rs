//! Audit sinks

use super::entry::AuditLogEntry;
use crate::error::{FinsentError, FinsentResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Destination for audit entries. Owned by exactly one session.
#[async_trait]
pub trait AuditSink: Send {
    /// Human-readable name of the target, for logs
    fn target(&self) -> String;

    /// Append one entry. Never overwrites earlier entries.
    async fn append(&mut self, entry: &AuditLogEntry) -> FinsentResult<()>;

    /// Push buffered entries to the target
    async fn flush(&mut self) -> FinsentResult<()>;

    /// Flush and release the target. Further appends reopen it.
    async fn close(&mut self) -> FinsentResult<()>;
}

/// JSON-lines file opened in append mode
#[derive(Debug)]
pub struct JsonlAuditSink {
    path: PathBuf,
    file: Option<File>,
}

impl JsonlAuditSink {
    /// The file is created, along with its parent directory, on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&mut self) -> FinsentResult<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        FinsentError::io_with_path(
                            format!("Failed to create audit directory: {}", e),
                            parent.display().to_string(),
                        )
                    })?;
                }
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await
                .map_err(|e| {
                    FinsentError::io_with_path(
                        format!("Failed to open audit log: {}", e),
                        self.path.display().to_string(),
                    )
                })?;
            debug!("opened audit log {}", self.path.display());
            self.file = Some(file);
        }

        self.file
            .as_mut()
            .ok_or_else(|| FinsentError::io("audit log handle missing after open"))
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    async fn append(&mut self, entry: &AuditLogEntry) -> FinsentResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| FinsentError::json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut json_line = String::with_capacity(json.len() + 1);
        json_line.push_str(&json);
        json_line.push('\n');

        let file = self.open().await?;
        file.write_all(json_line.as_bytes())
            .await
            .map_err(|e| FinsentError::io(format!("Failed to write audit entry: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| FinsentError::io(format!("Failed to flush audit entry: {}", e)))?;

        debug!("appended audit entry {}", entry.sequence);
        Ok(())
    }

    async fn flush(&mut self) -> FinsentResult<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()
                .await
                .map_err(|e| FinsentError::io(format!("Failed to flush audit log: {}", e)))?;
        }
        Ok(())
    }

    async fn close(&mut self) -> FinsentResult<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .await
                .map_err(|e| FinsentError::io(format!("Failed to flush audit log: {}", e)))?;
            file.sync_all()
                .await
                .map_err(|e| FinsentError::io(format!("Failed to sync audit log: {}", e)))?;
        }
        Ok(())
    }
}

/// In-memory sink. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditLogEntry>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything appended so far
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    fn target(&self) -> String {
        "memory".to_string()
    }

    async fn append(&mut self, entry: &AuditLogEntry) -> FinsentResult<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    async fn flush(&mut self) -> FinsentResult<()> {
        Ok(())
    }

    async fn close(&mut self) -> FinsentResult<()> {
        *self.closed.lock() = true;
        Ok(())
    }
}
