//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{LoginRadiusError, Result};

/// Default LoginRadius API root
pub const DEFAULT_BASE_URL: &str = "https://hub.loginradius.com/";

/// How requests are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    /// Calling thread waits for the round trip
    #[default]
    Blocking,
    /// Request is awaited inside a tokio runtime owned by the caller
    EventDriven,
}

/// Settings shared by every request a session makes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root all operation routes are relative to
    pub base_url: String,
    pub transport_mode: TransportMode,
    /// Redirect hops followed per operation before giving up
    pub max_redirects: u32,
    /// Per-request timeout; none means wait for the server
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate verification (only for test endpoints)
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport_mode: TransportMode::default(),
            max_redirects: 1,
            timeout_secs: None,
            accept_invalid_certs: false,
            user_agent: concat!("loginradius-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(transport_mode: TransportMode) -> Self {
        Self {
            transport_mode,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse the API root, forcing a trailing slash so routes join beneath it
    pub fn base(&self) -> Result<url::Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = url::Url::parse(&raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(LoginRadiusError::Config(format!(
                "unsupported base url scheme '{}'",
                other
            ))),
        }
    }
}
