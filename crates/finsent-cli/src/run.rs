//! The annotation run behind `finsent`

use crate::args::Cli;
use crate::console::CliConsole;
use crate::signal::cancel_on_ctrl_c;
use anyhow::{Context, bail};
use dialoguer::Input;
use finsent_core::config::{default_config_path, load_from_file};
use finsent_core::{
    ApiKeyFile, Bank, BatchRunner, CredentialProvider, FileOutcome, FinsentConfig, FinsentError,
    FinsentResult, OpenAiCompletionService,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    // A missing key ends the run before anything is sent
    let key_file = ApiKeyFile::new(&config.paths.api_key_file);
    let api_key = key_file
        .api_key()
        .with_context(|| format!("Failed to load API key from {}", key_file.path().display()))?;

    let bank = match cli.bank {
        Some(arg) => Bank::from(arg),
        None => prompt_bank()?,
    };

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| bank.data_dir(&config.paths.data_root));

    let service = OpenAiCompletionService::new(config.provider.clone(), api_key)
        .context("Failed to create completion service")?;
    let runner = BatchRunner::new(config, Arc::new(service));

    let cancel = runner.cancellation_token();
    let signal = cancel_on_ctrl_c(cancel.clone());

    console.print_header(&format!("Sentiment analysis for {}", bank));
    console.info(&format!("Reading datasets from {}", data_dir.display()));

    let result = runner.process_directory(&data_dir, bank).await;
    let interrupted = cancel.is_cancelled();
    cancel.cancel();
    if let Err(e) = signal.await {
        warn!("Ctrl-C listener did not shut down cleanly: {}", e);
    }

    let Some(outcomes) = settle(&console, bank, result)? else {
        return Ok(());
    };
    if outcomes.is_empty() {
        console.warn(&format!("No CSV files found in {}", data_dir.display()));
        return Ok(());
    }

    for outcome in &outcomes {
        console.print_outcome(outcome);
    }

    let failed: u64 = outcomes.iter().map(|o| o.session.failed).sum();
    if failed > 0 {
        console.warn(&format!("{} articles could not be annotated and were marked Error", failed));
    }
    if interrupted {
        console.warn("Run was interrupted");
    } else {
        console.success(&format!("Processed {} files for {}", outcomes.len(), bank));
    }
    Ok(())
}

/// `None` when the run was cancelled before every file was annotated.
pub(crate) fn settle(
    console: &CliConsole,
    bank: Bank,
    result: FinsentResult<Vec<FileOutcome>>,
) -> anyhow::Result<Option<Vec<FileOutcome>>> {
    match result {
        Ok(outcomes) => Ok(Some(outcomes)),
        Err(FinsentError::Cancelled) => {
            console.warn("Run was interrupted; files already written are kept");
            Ok(None)
        }
        Err(e) => {
            console.error(&format!("Batch for {} failed: {}", bank, e));
            Err(anyhow::Error::from(e).context(format!("Batch for {} failed", bank)))
        }
    }
}

/// Explicit files must exist; the default location is optional
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<FinsentConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        None => match default_config_path() {
            Some(path) => load_from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Ok(FinsentConfig::default()),
        },
    }
}

fn prompt_bank() -> anyhow::Result<Bank> {
    info!("Please choose a bank:");
    for bank in Bank::ALL {
        info!("{}. {}", bank.choice_key(), bank.display_name());
    }

    let choice = Input::<String>::new()
        .with_prompt("Enter your choice (1 or 2)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read bank choice")?;

    Bank::from_choice(&choice).map_err(|e| {
        error!("{}", e);
        anyhow::Error::from(e)
    })
}
