//! User profile session
//!
//! A [`UserProfile`] is created once per login context from a validated
//! token/secret pair. Operations fill it with the fields the API returns, so
//! after `login()` the profile answers `id()`, `provider()` and any other
//! normalized key through [`UserProfile::get_field`].

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use super::dispatch::{execute_async, execute_blocking, outcome, prepare_request, Outcome};
use super::field_mapper::is_blank;
use super::operation::{Operation, OperationDescriptor};
use super::route::binding_value;
use crate::api::config::{ClientConfig, TransportMode};
use crate::api::credentials::{mask_credential, Credentials};
use crate::api::http::{HttpRequest, Transport};
use crate::error::{LoginRadiusError, Result};

/// Authenticated view of one LoginRadius user
pub struct UserProfile {
    credentials: Credentials,
    config: ClientConfig,
    base: url::Url,
    transport: Transport,
    fields: Map<String, Value>,
}

impl UserProfile {
    /// Validate credentials and build a session against the default API root.
    ///
    /// No request is made. A blocking session cannot be created from inside a
    /// tokio runtime; use [`TransportMode::EventDriven`] there.
    pub fn new(
        token: impl Into<String>,
        secret: impl Into<String>,
        transport_mode: TransportMode,
    ) -> Result<Self> {
        let credentials = Credentials::new(token, secret)?;
        Self::with_config(credentials, ClientConfig::new(transport_mode))
    }

    /// Build a session with the reqwest transport the configuration selects
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base = config.base()?;
        let transport = Transport::from_config(&config)?;
        Ok(Self::assemble(credentials, config, base, transport))
    }

    /// Build a session around a caller-supplied transport
    pub fn with_transport(
        credentials: Credentials,
        transport: Transport,
        config: ClientConfig,
    ) -> Result<Self> {
        let base = config.base()?;
        Ok(Self::assemble(credentials, config, base, transport))
    }

    fn assemble(
        credentials: Credentials,
        mut config: ClientConfig,
        base: url::Url,
        transport: Transport,
    ) -> Self {
        config.transport_mode = transport.mode();
        debug!(
            "Creating LoginRadius session for token: {}, base_url: {}, transport: {:?}",
            mask_credential(credentials.token()),
            base,
            config.transport_mode
        );
        Self {
            credentials,
            config,
            base,
            transport,
            fields: Map::new(),
        }
    }

    pub fn token(&self) -> &str {
        self.credentials.token()
    }

    pub fn secret(&self) -> &str {
        self.credentials.secret()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport.mode()
    }

    /// True once an operation has stored a non-blank `id`
    pub fn is_authenticated(&self) -> bool {
        self.fields.get("id").is_some_and(|id| !is_blank(id))
    }

    /// Field discovered from a previous response, by normalized name
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.get_field(name).and_then(Value::as_str)
    }

    /// Every discovered field
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn id(&self) -> Option<&str> {
        self.field_str("id")
    }

    pub fn provider(&self) -> Option<&str> {
        self.field_str("provider")
    }

    /// Value bound to `:name` placeholders and parameter bindings.
    /// Credentials shadow discovered fields of the same name.
    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "token" => Some(self.credentials.token().to_string()),
            "secret" => Some(self.credentials.secret().to_string()),
            _ => self.fields.get(name).and_then(binding_value),
        }
    }

    fn prepare(&self, descriptor: &OperationDescriptor) -> Result<HttpRequest> {
        prepare_request(descriptor, &self.base, |name| self.lookup(name))
    }

    /// Store object responses as fields and apply the result convention
    fn absorb(&mut self, descriptor: &OperationDescriptor, response: Value) -> Outcome {
        if let Value::Object(map) = &response {
            for (key, value) in map {
                self.fields.insert(key.clone(), value.clone());
            }
            debug!(
                "Materialized {} field(s) from {}",
                map.len(),
                descriptor.name
            );
        }
        outcome(descriptor, response)
    }

    /// Run an operation on the blocking transport
    pub fn invoke(&mut self, operation: Operation) -> Result<Outcome> {
        let descriptor = operation.descriptor();
        let response = {
            let Transport::Blocking(transport) = &self.transport else {
                return Err(LoginRadiusError::Context(
                    "session uses the event-driven transport; call invoke_async".to_string(),
                ));
            };
            let request = self.prepare(descriptor)?;
            debug!("Invoking {} (blocking)", descriptor.name);
            execute_blocking(transport.as_ref(), request, self.config.max_redirects)?
        };
        Ok(self.absorb(descriptor, response))
    }

    /// Run an operation on the event-driven transport.
    ///
    /// Must be awaited inside a running tokio runtime.
    pub async fn invoke_async(&mut self, operation: Operation) -> Result<Outcome> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(LoginRadiusError::Context(
                "event-driven transport requires a running tokio runtime".to_string(),
            ));
        }

        let descriptor = operation.descriptor();
        let response = {
            let Transport::EventDriven(transport) = &self.transport else {
                return Err(LoginRadiusError::Context(
                    "session uses the blocking transport; call invoke".to_string(),
                ));
            };
            let request = self.prepare(descriptor)?;
            debug!("Invoking {} (event-driven)", descriptor.name);
            execute_async(transport.as_ref(), request, self.config.max_redirects).await?
        };
        Ok(self.absorb(descriptor, response))
    }

    /// Fetch the profile; true when the response carried an `id`
    pub fn login(&mut self) -> Result<bool> {
        Ok(self.invoke(Operation::Login)?.is_success())
    }

    pub fn mentions(&mut self) -> Result<Value> {
        Ok(self.invoke(Operation::Mentions)?.into_value())
    }

    pub fn company(&mut self) -> Result<Value> {
        Ok(self.invoke(Operation::Company)?.into_value())
    }

    pub fn contacts(&mut self) -> Result<Value> {
        Ok(self.invoke(Operation::Contacts)?.into_value())
    }

    pub async fn login_async(&mut self) -> Result<bool> {
        Ok(self.invoke_async(Operation::Login).await?.is_success())
    }

    pub async fn mentions_async(&mut self) -> Result<Value> {
        Ok(self.invoke_async(Operation::Mentions).await?.into_value())
    }

    pub async fn company_async(&mut self) -> Result<Value> {
        Ok(self.invoke_async(Operation::Company).await?.into_value())
    }

    pub async fn contacts_async(&mut self) -> Result<Value> {
        Ok(self.invoke_async(Operation::Contacts).await?.into_value())
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base.as_str())
            .field("transport", &self.transport)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
