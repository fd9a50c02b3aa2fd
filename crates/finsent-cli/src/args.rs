//! CLI argument definitions using clap
//!
//! - finsent                   # Ask which bank to process
//! - finsent --bank ubs        # Process Data/UBS without prompting
//! - finsent --config f.toml   # Load settings from a file

use clap::{Parser, ValueEnum};
use finsent_core::Bank;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finsent")]
#[command(about = "Annotate bank news articles with LLM sentiment scores")]
#[command(
    long_about = r#"Annotate bank news articles with LLM sentiment scores

Every CSV file in the bank's data directory is sent article by article to the
completion service, within the configured per-minute quota. A copy of each
file with a Sentiment column is written to the output directory and every
response is kept in a timestamped audit log.

USAGE:
  finsent                        # Choose the bank interactively
  finsent --bank cs              # Credit Suisse
  finsent --bank ubs -v          # UBS with debug logging"#
)]
#[command(version)]
pub struct Cli {
    /// Bank to process (omit for interactive prompt)
    #[arg(long, value_enum)]
    pub bank: Option<BankArg>,

    /// Path to configuration file (JSON, TOML or YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input directory, overriding <data_root>/<bank folder>
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BankArg {
    Cs,
    Ubs,
}

impl From<BankArg> for Bank {
    fn from(arg: BankArg) -> Self {
        match arg {
            BankArg::Cs => Bank::CreditSuisse,
            BankArg::Ubs => Bank::Ubs,
        }
    }
}
