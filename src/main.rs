use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod client;
mod config;
mod error;
mod plan;
mod preferences;
mod theme;
mod tui;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui(Default::default()));

    // Logging to stderr would draw over the TUI, so it stays quiet there
    // unless a log file is given
    let interactive = matches!(command, Commands::Tui(_));
    init_tracing(cli.global.verbose, cli.global.log_file.as_deref(), interactive)?;

    match command {
        Commands::Tui(args) => cli::tui::execute(&cli.global, args),
        Commands::Generate(args) => cli::generate::execute(&cli.global, args).await,
        Commands::Theme(args) => cli::theme::execute(&cli.global, args),
        Commands::Schema => cli::schema::execute(),
    }
}

fn init_tracing(verbose: bool, log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    // Only show logs with --verbose
    let filter = if verbose {
        EnvFilter::new("goalplan=debug")
    } else {
        EnvFilter::new("goalplan=warn")
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {
            fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
