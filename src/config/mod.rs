//! Configuration for the inspector and the capture server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/vex/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod capture;
mod logging;
mod serialization;


pub use capture::{CaptureConfig, ExchangeLogFormat, FileCapture};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3141";
pub const DEFAULT_DATA_URL: &str = "http://127.0.0.1:3141/data";
pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_AUTO_SELECT_DELAY_MS: u64 = 100;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Endpoint the inspector fetches exchanges from
    pub data_url: String,

    /// Address the capture server binds to
    pub bind_addr: SocketAddr,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Delay before the first row is selected automatically
    pub auto_select_delay_ms: u64,

    /// Timeout for the exchange fetch
    pub fetch_timeout_secs: u64,

    pub logging: LoggingConfig,

    pub capture: CaptureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3141)),
            theme: DEFAULT_THEME.to_string(),
            auto_select_delay_ms: DEFAULT_AUTO_SELECT_DELAY_MS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub data_url: Option<String>,
    pub bind_addr: Option<String>,
    pub theme: Option<String>,
    pub auto_select_delay_ms: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [capture] section
    pub capture: Option<FileCapture>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/vex/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("vex").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Ignore errors - config is optional
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load configuration: env vars > config file > defaults
    ///
    /// A config file that exists but cannot be read or parsed is an error;
    /// a broken config should fail fast rather than silently fall back.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Parse the config file at `path`; a missing file yields defaults
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse config file {} (run `vex config --reset` to regenerate it)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();

        // Data URL: env > file > default
        let data_url = env("VEX_DATA_URL")
            .or(file.data_url)
            .unwrap_or(defaults.data_url);

        // Bind address: env > file > default
        let bind_addr = match env("VEX_BIND").or(file.bind_addr) {
            Some(addr) => parse_bind_addr(&addr)?,
            None => defaults.bind_addr,
        };

        // Theme: env > file > default
        let theme = env("VEX_THEME").or(file.theme).unwrap_or(defaults.theme);

        let auto_select_delay_ms = file
            .auto_select_delay_ms
            .unwrap_or(defaults.auto_select_delay_ms);
        let fetch_timeout_secs = file
            .fetch_timeout_secs
            .unwrap_or(defaults.fetch_timeout_secs);

        Ok(Self {
            data_url,
            bind_addr,
            theme,
            auto_select_delay_ms,
            fetch_timeout_secs,
            logging: LoggingConfig::from_file(file.logging),
            capture: CaptureConfig::from_file(file.capture),
        })
    }

    pub fn auto_select_delay(&self) -> Duration {
        Duration::from_millis(self.auto_select_delay_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Parse a bind address with a readable error
pub fn parse_bind_addr(addr: &str) -> Result<SocketAddr> {
    addr.trim()
        .parse()
        .with_context(|| format!("Invalid bind address {:?} (expected host:port)", addr))
}
