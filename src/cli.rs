// CLI module - command-line argument parsing and handlers
//
// Without a subcommand vex runs the inspector. Subcommands:
// - serve: run the capture server that records exchanges and serves /data
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// vex - inspect captured HTTP exchanges
#[derive(Parser, Debug)]
#[command(name = "vex")]
#[command(version = VERSION)]
#[command(about = "Inspect captured HTTP exchanges in the terminal", long_about = None)]
pub struct Cli {
    /// /data endpoint to fetch exchanges from (overrides VEX_DATA_URL and config)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Inspect a saved /data response instead of fetching one
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the capture server
    Serve {
        /// Address to listen on (overrides VEX_BIND and config)
        #[arg(long)]
        addr: Option<String>,

        /// Preload exchanges from a saved /data response
        #[arg(long, conflicts_with = "demo")]
        file: Option<PathBuf>,

        /// Preload sample exchanges
        #[arg(long)]
        demo: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Run `vex config`
pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: vex config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush prompt")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_runs_inspector() {
        let cli = Cli::try_parse_from(["vex", "--url", "http://10.0.0.2:3141/data"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://10.0.0.2:3141/data"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_url_and_file_conflict() {
        assert!(Cli::try_parse_from(["vex", "--url", "http://x/data", "--file", "a.json"]).is_err());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["vex", "serve", "--addr", "0.0.0.0:8080", "--demo"]).unwrap();
        match cli.command {
            Some(Commands::Serve { addr, file, demo }) => {
                assert_eq!(addr.as_deref(), Some("0.0.0.0:8080"));
                assert!(file.is_none());
                assert!(demo);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["vex", "serve", "--demo", "--file", "a.json"]).is_err());
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::try_parse_from(["vex", "config", "--path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                path: true,
                show: false,
                reset: false
            })
        ));
    }
}
