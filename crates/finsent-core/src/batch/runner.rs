//! Drives annotation sessions over CSV files

use super::bank::Bank;
use super::dataset::{CONTENT_COLUMN, Dataset, SENTIMENT_COLUMN};
use super::paths::{audit_log_path, output_path, run_timestamp};
use crate::annotation::{
    AnnotationClient, RetryPolicy, SentimentCategory, SentimentScore, task_prompt,
};
use crate::audit::JsonlAuditSink;
use crate::config::FinsentConfig;
use crate::error::{FinsentError, FinsentResult};
use crate::llm::CompletionService;
use crate::quota::{QuotaTracker, SystemClock, WindowClock};
use crate::session::{AnnotationSession, SessionConfig, SessionSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Label counts of one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Sentinel labels and answers without a leading score
    pub unparsed: usize,
}

impl LabelTally {
    pub fn record(&mut self, label: &str) {
        match SentimentScore::parse(label).map(|score| score.category()) {
            Some(SentimentCategory::Positive) => self.positive += 1,
            Some(SentimentCategory::Neutral) => self.neutral += 1,
            Some(SentimentCategory::Negative) => self.negative += 1,
            None => self.unparsed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.unparsed
    }
}

/// Result of annotating one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub audit_log: PathBuf,
    pub rows: usize,
    pub tally: LabelTally,
    pub session: SessionSummary,
}

/// Runs one fresh [`AnnotationSession`] per CSV file.
pub struct BatchRunner {
    config: FinsentConfig,
    service: Arc<dyn CompletionService>,
    clock: Arc<dyn WindowClock>,
    cancel: CancellationToken,
    retry_delay: Duration,
}

impl BatchRunner {
    pub fn new(config: FinsentConfig, service: Arc<dyn CompletionService>) -> Self {
        Self {
            config,
            service,
            clock: Arc::new(SystemClock),
            cancel: CancellationToken::new(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Replace the quota window clock of every session
    pub fn with_clock(mut self, clock: Arc<dyn WindowClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share a cancellation token with every session
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Delay before the first retry of a transient failure
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn config(&self) -> &FinsentConfig {
        &self.config
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Process the bank's directory under the configured data root
    pub async fn process_bank(&self, bank: Bank) -> FinsentResult<Vec<FileOutcome>> {
        let dir = bank.data_dir(&self.config.paths.data_root);
        self.process_directory(&dir, bank).await
    }

    /// Process every `*.csv` file in `dir`, in file name order.
    ///
    /// Stops at the first file that cannot be read or written.
    #[instrument(skip(self, dir, bank), fields(bank = %bank, dir = %dir.display()))]
    pub async fn process_directory(&self, dir: &Path, bank: Bank) -> FinsentResult<Vec<FileOutcome>> {
        let files = csv_files(dir).await?;
        if files.is_empty() {
            warn!("no CSV files found in {}", dir.display());
            return Ok(Vec::new());
        }

        info!(files = files.len(), "processing directory");
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if self.cancel.is_cancelled() {
                return Err(FinsentError::Cancelled);
            }
            outcomes.push(self.process_file(&file, bank).await?);
        }
        Ok(outcomes)
    }

    /// Annotate every row of one CSV file and write the labelled copy.
    ///
    /// The input must have an `article_content` column. Empty articles are
    /// still sent. The output keeps every input column and gains (or
    /// replaces) `Sentiment`.
    #[instrument(skip(self, path, bank), fields(bank = %bank, file = %path.display()))]
    pub async fn process_file(&self, path: &Path, bank: Bank) -> FinsentResult<FileOutcome> {
        let mut dataset = Dataset::read_csv(path)?;
        let articles: Vec<String> = dataset
            .column(CONTENT_COLUMN)?
            .into_iter()
            .map(str::to_string)
            .collect();

        let timestamp = run_timestamp();
        let output = output_path(&self.config.paths.output_root, bank, path, &timestamp);
        let audit_log = audit_log_path(&self.config.paths.log_dir, bank, &timestamp);

        let mut session = self.open_session(path, bank, &audit_log);
        let total = articles.len();
        let mut labels = Vec::with_capacity(total);
        let mut tally = LabelTally::default();

        for (index, text) in articles.iter().enumerate() {
            let label = match session.annotate(text).await {
                Ok(label) => label,
                Err(e) => {
                    if let Err(close_err) = session.close().await {
                        warn!("failed to close session after error: {}", close_err);
                    }
                    return Err(e);
                }
            };
            debug!(row = index + 1, total, label = %label, "row annotated");
            tally.record(&label);
            labels.push(label);
        }

        let summary = session.close().await?;

        dataset.set_column(SENTIMENT_COLUMN, labels)?;
        dataset.write_csv(&output)?;

        info!(
            rows = total,
            positive = tally.positive,
            neutral = tally.neutral,
            negative = tally.negative,
            unparsed = tally.unparsed,
            "Sentiment analysis completed and saved to {}",
            output.display()
        );

        Ok(FileOutcome {
            input: path.to_path_buf(),
            output,
            audit_log,
            rows: total,
            tally,
            session: summary,
        })
    }

    fn open_session(&self, input: &Path, bank: Bank, audit_log: &Path) -> AnnotationSession {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| bank.folder().to_string());

        let session_config = SessionConfig::from_config(&self.config, task_prompt(bank.display_name()));
        let tracker = QuotaTracker::with_clock(self.config.quota.clone(), Arc::clone(&self.clock));
        let client = AnnotationClient::new(Arc::clone(&self.service)).with_retry(RetryPolicy::new(
            self.config.provider.max_retries,
            self.retry_delay,
        ));

        AnnotationSession::new(
            name,
            session_config,
            tracker,
            client,
            Box::new(JsonlAuditSink::new(audit_log)),
        )
        .with_cancellation(self.cancel.child_token())
    }
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("provider", &self.service.name())
            .field("model", &self.config.model.model_id)
            .field("clock", &self.clock)
            .finish()
    }
}

/// `*.csv` files directly under `dir`, sorted by name
async fn csv_files(dir: &Path) -> FinsentResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        FinsentError::io_with_path(
            format!("Failed to read data directory: {}", e),
            dir.display().to_string(),
        )
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        FinsentError::io_with_path(
            format!("Failed to list data directory: {}", e),
            dir.display().to_string(),
        )
    })? {
        let path = entry.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && entry.file_type().await.is_ok_and(|t| t.is_file()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
