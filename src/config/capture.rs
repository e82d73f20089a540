//! Capture server settings
//!
//! Controls how the recording middleware buffers and reports exchanges.

use serde::Deserialize;

/// Default cap on buffered request/response bodies (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shape of the per-exchange log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExchangeLogFormat {
    /// One JSON object, the same shape /data serves (default)
    #[default]
    Json,
    /// Human-readable request/response dump
    Raw,
}

impl ExchangeLogFormat {
    /// Parse format string from config; unknown values fall back to json
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "raw" => Self::Raw,
            _ => Self::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Largest body the recorder will buffer; exchanges with bigger bodies
    /// are still forwarded, just not recorded
    pub max_body_bytes: usize,

    /// Emit one log line per recorded exchange
    pub log_exchanges: bool,

    /// Format of those log lines
    pub log_format: ExchangeLogFormat,

    /// Print the "open this URL" banner on startup
    pub banner: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_exchanges: false,
            log_format: ExchangeLogFormat::Json,
            banner: true,
        }
    }
}

/// Capture settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCapture {
    pub max_body_bytes: Option<usize>,
    pub log_exchanges: Option<bool>,
    pub log_format: Option<String>,
    pub banner: Option<bool>,
}

impl CaptureConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileCapture>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            max_body_bytes: file.max_body_bytes.unwrap_or(defaults.max_body_bytes),
            log_exchanges: file.log_exchanges.unwrap_or(defaults.log_exchanges),
            log_format: file
                .log_format
                .as_deref()
                .map(ExchangeLogFormat::parse)
                .unwrap_or(defaults.log_format),
            banner: file.banner.unwrap_or(defaults.banner),
        }
    }
}
