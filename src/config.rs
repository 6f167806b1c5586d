use std::net::SocketAddr;
use std::time::Duration;

use crate::analysis::validate_model_name;

/// Application-level constants
pub const APP_NAME: &str = "SymptomScope";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_CRATE_NAME"))
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// May be empty; the analyzer is then disabled rather than the service
    /// refusing to start.
    pub gemini_api_key: String,
    /// Model fallback chain override; empty means the built-in defaults.
    pub models: Vec<String>,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary lookup, so tests never have to
    /// mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("SYMPTOMSCOPE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let gemini_api_key = lookup("GEMINI_API_KEY").unwrap_or_default();

        let models = lookup("SYMPTOMSCOPE_MODELS")
            .map(|raw| parse_model_list(&raw))
            .unwrap_or_default();

        let timeout_secs = lookup("SYMPTOMSCOPE_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            gemini_api_key,
            models,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Parse a comma-separated model list, dropping invalid identifiers.
fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .filter(|m| match validate_model_name(m) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(model = *m, error = %e, "ignoring invalid model identifier");
                false
            }
        })
        .map(str::to_string)
        .collect()
}
