//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# vex configuration

# Endpoint the inspector loads exchanges from (env: VEX_DATA_URL)
data_url = "{data_url}"

# Capture server bind address (env: VEX_BIND)
bind_addr = "{bind}"

# Theme: dark, light (env: VEX_THEME; press 't' in the inspector to cycle)
theme = "{theme}"

# Delay before the first exchange is selected after loading
auto_select_delay_ms = {delay}

# Timeout for the exchange fetch
fetch_timeout_secs = {timeout}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the inspector's buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"

# Capture server
[capture]
# Exchanges with bodies larger than this are forwarded but not recorded
max_body_bytes = {max_body}
# Log every recorded exchange
log_exchanges = {log_exchanges}
log_format = "{log_format}"  # json, raw
# Print the startup banner
banner = {banner}
"#,
            data_url = escape(&self.data_url),
            bind = self.bind_addr,
            theme = escape(&self.theme),
            delay = self.auto_select_delay_ms,
            timeout = self.fetch_timeout_secs,
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
            max_body = self.capture.max_body_bytes,
            log_exchanges = self.capture.log_exchanges,
            log_format = self.capture.log_format.as_str(),
            banner = self.capture.banner,
        )
    }
}

/// Escape a value for a TOML basic string
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
