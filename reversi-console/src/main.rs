//! Reversi on the console.
//!
//! Reads keys from stdin, one line at a time, and prints the board to stdout.
//! Logs go to stderr.

mod config;
mod driver;
mod input;
mod view;

use anyhow::Result;
use clap::Parser;
use config::ConsoleConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reversi", version, about = "Play Reversi on the console")]
struct Cli {
    /// Config file; missing means defaults.
    #[arg(short, long, default_value = "Reversi.toml")]
    config: PathBuf,

    /// Log filter, e.g. "debug" or "reversi_core=trace". Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConsoleConfig::load(&cli.config)?;
    info!(?config, "starting");
    println!("{}", input::HELP);

    driver::run(&config, driver::spawn_stdin_reader(), std::io::stdout().lock())
}
