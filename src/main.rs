// vex - inspector for captured HTTP exchanges
//
// Two halves share one binary:
// - Inspector (default): fetches exchanges from a /data endpoint once and
//   shows them in a terminal UI, a list on one side and request/response
//   detail tabs on the other
// - Capture server (`vex serve`, axum): records every exchange it handles
//   and serves the collection at /data
//
// Inside the inspector the list publishes selections on a broadcast bus and
// the detail view subscribes; a small scheduler runs deferred work (the
// initial auto-select) only after a frame has been drawn.

mod capture;
mod cli;
mod config;
mod demo;
mod events;
mod logging;
mod model;
mod scheduler;
mod source;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, VERSION};
use logging::{LogBuffer, Output};
use source::{HttpSource, StaticSource};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands exit early and never touch the terminal
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Create config file with defaults if it doesn't exist (helps discoverability)
    Config::ensure_config_exists();
    let mut config = Config::load()?;

    match cli.command {
        Some(Commands::Serve { addr, file, demo }) => {
            if let Some(addr) = addr {
                config.bind_addr = config::parse_bind_addr(&addr)?;
            }
            run_server(config, file, demo).await
        }
        _ => run_inspector(config, cli.url, cli.file).await,
    }
}

/// Inspector mode: logs go to an in-memory buffer so they never garble the
/// alternate screen
async fn run_inspector(config: Config, url: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let log_buffer = LogBuffer::new();
    // Held for the program lifetime so the file writer flushes
    let _log_guard = logging::init(&config.logging, Output::Buffer(log_buffer.clone()))?;

    tracing::info!("vex {} starting inspector", VERSION);

    match file {
        Some(path) => {
            let source = StaticSource::new(demo::load_file(&path)?);
            tui::run_tui(source, &config, log_buffer).await
        }
        None => {
            let url = url.unwrap_or_else(|| config.data_url.clone());
            let source = HttpSource::new(url, config.fetch_timeout())?;
            tracing::debug!("Fetching exchanges from {}", source.url());
            tui::run_tui(source, &config, log_buffer).await
        }
    }
}

/// Capture server mode: logs go to stdout
async fn run_server(config: Config, file: Option<PathBuf>, demo: bool) -> Result<()> {
    let _log_guard = logging::init(&config.logging, Output::Stdout)?;

    tracing::info!("vex {} starting capture server", VERSION);

    let preload = match file {
        Some(path) => demo::load_file(&path)?,
        None if demo => demo::sample_exchanges(),
        None => Vec::new(),
    };
    let store = capture::CaptureStore::seeded(preload);

    capture::serve(&config, store, shutdown_signal()).await
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, only the process being killed stops us
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
