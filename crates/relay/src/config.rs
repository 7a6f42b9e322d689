use crate::env_utils::{load_parsed_opt, load_string, load_u64_opt, load_url_opt};
use blxr_constants::{
    relay::{DEFAULT_TIMEOUT, RELAY_URL, TRACE_URL},
    ParseNetworkError, RelayNetwork,
};
use std::time::Duration;

/// Environment variable holding the relay API key.
pub const AUTH_HEADER_ENV: &str = "BLXR_AUTH_HEADER";
/// Environment variable selecting the network.
pub const NETWORK_ENV: &str = "BLXR_NETWORK";
/// Environment variable overriding the relay URL.
pub const RELAY_URL_ENV: &str = "BLXR_RELAY_URL";
/// Environment variable overriding the trace URL.
pub const TRACE_URL_ENV: &str = "BLXR_TRACE_URL";
/// Environment variable overriding the request timeout, in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "BLXR_TIMEOUT_MS";

/// Errors loading or applying relay configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing a URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// Unknown network name.
    #[error(transparent)]
    Network(#[from] ParseNetworkError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}

/// Configuration for a [`RelayClient`].
///
/// [`RelayClient`]: crate::RelayClient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// JSON-RPC endpoint of the relay.
    pub relay_url: reqwest::Url,
    /// Base URL of the bundle trace service.
    pub trace_url: reqwest::Url,
    /// Value of the `Authorization` header.
    pub auth_header: String,
    /// Network bundles are sent to.
    pub network: RelayNetwork,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RelayConfig {
    /// Create a config for `network` with the default endpoints.
    pub fn new(auth_header: impl Into<String>, network: RelayNetwork) -> Self {
        Self {
            relay_url: default_url(RELAY_URL),
            trace_url: default_url(TRACE_URL),
            auth_header: auth_header.into(),
            network,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load the config from the environment.
    ///
    /// Only [`AUTH_HEADER_ENV`] is required. The network defaults to
    /// mainnet.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_header = load_string(AUTH_HEADER_ENV)?;
        let network = load_parsed_opt::<RelayNetwork>(NETWORK_ENV)?.unwrap_or_default();
        let mut config = Self::new(auth_header, network);

        if let Some(url) = load_url_opt(RELAY_URL_ENV)? {
            config.relay_url = url;
        }
        if let Some(url) = load_url_opt(TRACE_URL_ENV)? {
            config.trace_url = url;
        }
        if let Some(ms) = load_u64_opt(TIMEOUT_MS_ENV)? {
            config.timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Set the relay URL.
    pub fn with_relay_url(mut self, url: reqwest::Url) -> Self {
        self.relay_url = url;
        self
    }

    /// Set the trace URL.
    pub fn with_trace_url(mut self, url: reqwest::Url) -> Self {
        self.trace_url = url;
        self
    }

    /// Set the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_url(url: &str) -> reqwest::Url {
    reqwest::Url::parse(url).expect("default relay URL invalid")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = RelayConfig::new("key", RelayNetwork::BscMainnet);
        assert_eq!(config.relay_url.as_str(), "https://mev.api.blxrbdn.com/");
        assert_eq!(config.trace_url.as_str(), "https://tools.bloxroute.com/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.network, RelayNetwork::BscMainnet);
    }

    #[test]
    fn builders() {
        let url = reqwest::Url::parse("http://127.0.0.1:8080").unwrap();
        let config = RelayConfig::new("key", RelayNetwork::Mainnet)
            .with_relay_url(url.clone())
            .with_trace_url(url.clone())
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.relay_url, url);
        assert_eq!(config.trace_url, url);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn missing_var_display() {
        let err = ConfigError::missing(AUTH_HEADER_ENV);
        assert_eq!(
            err.to_string(),
            "missing or non-unicode environment variable: BLXR_AUTH_HEADER"
        );
    }
}
