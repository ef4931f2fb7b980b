//! LoginRadius credentials and GUID validation
//!
//! A session is keyed by a user token (issued by the hosted login widget) and
//! the site's API secret. Both are GUIDs, optionally wrapped in braces.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{LoginRadiusError, Result};

static GUID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn guid_pattern() -> &'static Regex {
    GUID_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^\{?[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\}?$",
        )
        .expect("GUID pattern is a valid regex")
    })
}

/// Check whether a string has the 8-4-4-4-12 hex GUID shape, braces optional
pub fn guid_valid(guid: &str) -> bool {
    guid_pattern().is_match(guid)
}

/// Mask sensitive credential values for logging
pub(crate) fn mask_credential(value: &str) -> String {
    if value.len() <= 8 {
        "*".repeat(value.len())
    } else {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    }
}

/// Validated token/secret pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    /// Validate a token and secret.
    ///
    /// Fails with `missing token` for an empty token, then `invalid token` or
    /// `invalid secret` for values that are not GUID shaped. The token is
    /// checked first so a bad pair always reports the token.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let secret = secret.into();

        if token.trim().is_empty() {
            return Err(LoginRadiusError::Validation("missing token".to_string()));
        }
        if !guid_valid(&token) {
            return Err(LoginRadiusError::Validation("invalid token".to_string()));
        }
        if !guid_valid(&secret) {
            return Err(LoginRadiusError::Validation("invalid secret".to_string()));
        }

        Ok(Self { token, secret })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &mask_credential(&self.token))
            .field("secret", &mask_credential(&self.secret))
            .finish()
    }
}
