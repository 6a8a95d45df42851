//! Client configuration: where the server lives and how long to wait for it.

use std::time::Duration;

/// Name of the value that provides the server base URL, both at build time
/// and in the process environment.
pub const SERVER_URL_VAR: &str = "TODO_SERVER_URL";

/// Per-request ceiling on the whole round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Immutable settings bound to a `TodoApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Resolve the base URL from the value baked in at build time, falling
    /// back to the process environment. Both unset leaves `base_url` empty.
    pub fn from_env() -> Self {
        let base_url = resolve_base_url(
            option_env!("TODO_SERVER_URL"),
            std::env::var(SERVER_URL_VAR).ok(),
        );
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Build-time value wins; empty strings count as unset.
fn resolve_base_url(build_time: Option<&str>, runtime: Option<String>) -> Option<String> {
    build_time
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| runtime.filter(|v| !v.is_empty()))
}
