//! Console configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid GraphQL endpoint: {0} (expected an http:// or https:// URL)")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub graphql_uri: String,
    pub timeouts: Timeouts,
}

impl ConsoleConfig {
    /// Build config from environment variables.
    ///
    /// - `LIBRIS_GRAPHQL_URI`: full endpoint; wins when set
    /// - `LIBRIS_API_URL`: base URL, `/graphql` is appended (default `http://localhost:8000`)
    /// - `LIBRIS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LIBRIS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the endpoint is not an HTTP(S) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let graphql_uri = resolve_graphql_uri(
            std::env::var("LIBRIS_GRAPHQL_URI").ok().as_deref(),
            std::env::var("LIBRIS_API_URL").ok().as_deref(),
        );
        let timeouts = Timeouts {
            request_secs: env_parse_u64("LIBRIS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LIBRIS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(graphql_uri, timeouts)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the endpoint is not an HTTP(S) URL.
    pub fn new(graphql_uri: String, timeouts: Timeouts) -> Result<Self, ConfigError> {
        if !(graphql_uri.starts_with("http://") || graphql_uri.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(graphql_uri));
        }
        Ok(Self { graphql_uri, timeouts })
    }
}

/// Pick the GraphQL endpoint: explicit URI first, else `{api_url}/graphql`.
#[must_use]
pub fn resolve_graphql_uri(graphql_uri: Option<&str>, api_url: Option<&str>) -> String {
    if let Some(uri) = graphql_uri.map(str::trim).filter(|uri| !uri.is_empty()) {
        return uri.trim_end_matches('/').to_owned();
    }
    let base = api_url.map(str::trim).filter(|url| !url.is_empty()).unwrap_or(DEFAULT_API_URL);
    format!("{}/graphql", base.trim_end_matches('/'))
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
