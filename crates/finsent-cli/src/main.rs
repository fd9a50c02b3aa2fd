//! Finsent CLI application
//!
//! Annotates the news datasets of one bank with LLM sentiment scores.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/finsent-cli
//! ```
//!
//! The API key is read from `API-key.txt` in the working directory, or from
//! the `FINSENT_API_KEY` environment variable.

mod args;
mod console;
mod run;
mod signal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(cli.verbose)
        .init();

    run::run(cli).await
}
