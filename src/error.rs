//! Error taxonomy for the LoginRadius client

use thiserror::Error;

/// Errors surfaced by session construction and operation dispatch
#[derive(Debug, Error)]
pub enum LoginRadiusError {
    /// Bad or missing credentials, raised only while building a session
    #[error("{0}")]
    Validation(String),

    /// Connection failure or a non-redirect, non-2xx status
    #[error("transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// Redirect response without a followable target, or too many hops
    #[error("redirect resolution failed: {0}")]
    RedirectResolution(String),

    /// Body is not valid JSON or not the expected shape
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),

    /// Transport used outside the context it was built for
    #[error("invalid call context: {0}")]
    Context(String),

    /// Route placeholder or parameter binding names a field the session does not have
    #[error("session has no field '{0}' to bind")]
    UnresolvedField(String),

    /// Invalid client configuration (base URL, TLS setup)
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LoginRadiusError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// HTTP status attached to a transport failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LoginRadiusError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the api secret
        let err = err.without_url();
        Self::Transport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<serde_json::Error> for LoginRadiusError {
    fn from(err: serde_json::Error) -> Self {
        Self::ResponseFormat(err.to_string())
    }
}

impl From<url::ParseError> for LoginRadiusError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("bad url: {}", err))
    }
}

pub type Result<T, E = LoginRadiusError> = std::result::Result<T, E>;
