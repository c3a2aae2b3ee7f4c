mod cli;
mod engine;
mod error;
mod gate;
mod model;
mod orchestrator;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Log to stderr. The TUI owns the terminal, so it stays quiet unless RUST_LOG asks otherwise.
fn init_tracing(headless: bool) {
    let default_level = if headless { "warn" } else { "off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_headless = args.is_headless();
    init_tracing(is_headless);

    cli::run(args).await?;
    // Explicitly exit with code 0 on success in headless modes
    if is_headless {
        std::process::exit(0);
    }
    Ok(())
}
