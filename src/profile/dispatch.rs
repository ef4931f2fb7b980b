//! Generic dispatcher for profile operations
//!
//! Each [`OperationDescriptor`] goes through the same pipeline: resolve the
//! route and query from session fields, GET it, follow a bounded number of
//! redirect hops, then parse and normalize the JSON body. The blocking and
//! async drivers share everything except the call to the transport.

use serde_json::Value;
use tracing::{debug, warn};

use super::field_mapper::{is_blank, normalize_keys};
use super::operation::OperationDescriptor;
use super::redirect::redirect_target;
use super::route::{resolve_params, resolve_route};
use crate::api::http::{AsyncTransport, BlockingTransport, HttpRequest, HttpResponse};
use crate::error::{LoginRadiusError, Result};

/// What an operation hands back to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Operations with a success key report whether it was present
    Success(bool),
    /// Operations without one return the normalized response
    Data(Value),
}

impl Outcome {
    /// `Success(b)` gives `b`; data is successful when non-blank
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Success(ok) => *ok,
            Outcome::Data(value) => !is_blank(value),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Outcome::Data(value) => Some(value),
            Outcome::Success(_) => None,
        }
    }

    pub fn into_data(self) -> Option<Value> {
        match self {
            Outcome::Data(value) => Some(value),
            Outcome::Success(_) => None,
        }
    }

    /// Flatten into a JSON value; a success flag becomes a bool
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Data(value) => value,
            Outcome::Success(ok) => Value::Bool(ok),
        }
    }
}

/// Next move after looking at one response
#[derive(Debug)]
enum Step {
    Follow(HttpRequest),
    Done(Value),
}

/// Build the first request for an operation
pub fn prepare_request<F>(
    descriptor: &OperationDescriptor,
    base: &url::Url,
    lookup: F,
) -> Result<HttpRequest>
where
    F: Fn(&str) -> Option<String>,
{
    let route = resolve_route(descriptor.route_template, &lookup)?;
    let query = resolve_params(descriptor.param_bindings, &lookup)?;
    let url = base.join(&route)?;

    debug!(
        "Prepared {}: route={}, params={:?}",
        descriptor.name,
        descriptor.route_template,
        query.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>()
    );
    Ok(HttpRequest::new(url.to_string(), query))
}

fn interpret(request: &HttpRequest, response: HttpResponse) -> Result<Step> {
    if response.is_temporary_redirect() {
        let target = redirect_target(&response.body, &request.url)?;
        return Ok(Step::Follow(request.redirected(target)));
    }

    if !response.is_success() {
        return Err(LoginRadiusError::Transport {
            message: format!(
                "LoginRadius request failed ({}): {}",
                response.status,
                response.body.chars().take(200).collect::<String>()
            ),
            status: Some(response.status),
        });
    }

    Ok(Step::Done(parse_body(&response.body)?))
}

/// Parse a JSON body and normalize its keys
pub fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(LoginRadiusError::ResponseFormat(
            "empty response body".to_string(),
        ));
    }
    let json: Value = serde_json::from_str(body)?;
    Ok(normalize_keys(json))
}

fn redirect_budget_exceeded(max_redirects: u32) -> LoginRadiusError {
    warn!("Redirect limit of {} exceeded", max_redirects);
    LoginRadiusError::RedirectResolution(format!(
        "exceeded {} redirect hop(s)",
        max_redirects
    ))
}

/// Run a request to completion on a blocking transport
pub fn execute_blocking(
    transport: &dyn BlockingTransport,
    request: HttpRequest,
    max_redirects: u32,
) -> Result<Value> {
    let mut request = request;
    let mut hops = 0;
    loop {
        let response = transport.get(&request)?;
        match interpret(&request, response)? {
            Step::Done(value) => return Ok(value),
            Step::Follow(next) => {
                if hops >= max_redirects {
                    return Err(redirect_budget_exceeded(max_redirects));
                }
                hops += 1;
                debug!("Following redirect hop {}", hops);
                request = next;
            }
        }
    }
}

/// Run a request to completion on an async transport
pub async fn execute_async(
    transport: &dyn AsyncTransport,
    request: HttpRequest,
    max_redirects: u32,
) -> Result<Value> {
    let mut request = request;
    let mut hops = 0;
    loop {
        let response = transport.get(&request).await?;
        match interpret(&request, response)? {
            Step::Done(value) => return Ok(value),
            Step::Follow(next) => {
                if hops >= max_redirects {
                    return Err(redirect_budget_exceeded(max_redirects));
                }
                hops += 1;
                debug!("Following redirect hop {}", hops);
                request = next;
            }
        }
    }
}

/// Apply the operation's result convention to a normalized response
pub fn outcome(descriptor: &OperationDescriptor, response: Value) -> Outcome {
    match descriptor.success_key {
        Some(key) => {
            let ok = response.get(key).is_some_and(|v| !is_blank(v));
            if !ok {
                debug!("{} response has no '{}'", descriptor.name, key);
            }
            Outcome::Success(ok)
        }
        None => Outcome::Data(response),
    }
}
