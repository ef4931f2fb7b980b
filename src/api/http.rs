//! HTTP transports for the LoginRadius API
//!
//! Two interchangeable GET strategies: a blocking one for plain threads and an
//! async one for callers that already run a tokio runtime. Neither follows
//! redirects on its own; the dispatcher decides how a redirect is resolved.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::{debug, trace, warn};

use super::config::{ClientConfig, TransportMode};
use crate::error::{LoginRadiusError, Result};

/// A GET request: absolute URL plus ordered query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            query,
        }
    }

    /// Same parameters against another URL
    pub fn redirected(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: self.query.clone(),
        }
    }

    /// URL with the query string appended
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let query_string: String = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query_string)
    }
}

/// Status, headers and body of a response, independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 302 Found and 307 Temporary Redirect
    pub fn is_temporary_redirect(&self) -> bool {
        self.status == 302 || self.status == 307
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// GET strategy that blocks the calling thread
pub trait BlockingTransport: Send + Sync {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// GET strategy awaited inside the caller's runtime
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// The strategy a session was built with
pub enum Transport {
    Blocking(Box<dyn BlockingTransport>),
    EventDriven(Box<dyn AsyncTransport>),
}

impl Transport {
    /// Build the reqwest-backed transport selected by the configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        match config.transport_mode {
            TransportMode::Blocking => Ok(Transport::Blocking(Box::new(
                ReqwestBlockingTransport::new(config)?,
            ))),
            TransportMode::EventDriven => Ok(Transport::EventDriven(Box::new(
                ReqwestAsyncTransport::new(config)?,
            ))),
        }
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            Transport::Blocking(_) => TransportMode::Blocking,
            Transport::EventDriven(_) => TransportMode::EventDriven,
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transport::{:?}", self.mode())
    }
}

/// Host of a request URL. Paths carry credentials, so only the host is logged.
fn log_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid url>".to_string())
}

fn log_response(url: &str, status: u16, body: &str) {
    debug!("Response status: {} from {}", status, log_host(url));
    trace!(
        "Response body (first 2000 chars): {}",
        &body[..floor_char_boundary(body, 2000)]
    );
    if !(200..400).contains(&status) {
        warn!(
            "LoginRadius request failed: status={}, body={}",
            status,
            &body[..floor_char_boundary(body, 500)]
        );
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Blocking GET over `reqwest::blocking`
pub struct ReqwestBlockingTransport {
    http_client: reqwest::blocking::Client,
}

impl ReqwestBlockingTransport {
    /// reqwest's blocking client cannot be built inside an async runtime, so
    /// that case is reported as a context error instead of a panic.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(LoginRadiusError::Context(
                "blocking transport cannot be created inside an async runtime".to_string(),
            ));
        }

        let mut builder = reqwest::blocking::Client::builder()
            .redirect(Policy::none())
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| LoginRadiusError::Config(format!("http client: {}", e)))?;
        Ok(Self { http_client })
    }
}

impl BlockingTransport for ReqwestBlockingTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url();
        trace!("Sending blocking GET to {}", log_host(&request.url));

        let response = self.http_client.get(&url).send()?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.text()?;

        log_response(&request.url, status, &body);
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Non-blocking GET over `reqwest::Client`
pub struct ReqwestAsyncTransport {
    http_client: reqwest::Client,
}

impl ReqwestAsyncTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::none())
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| LoginRadiusError::Config(format!("http client: {}", e)))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl AsyncTransport for ReqwestAsyncTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url();
        trace!("Sending async GET to {}", log_host(&request.url));

        let response = self.http_client.get(&url).send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.text().await?;

        log_response(&request.url, status, &body);
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
