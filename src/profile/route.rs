//! Route and parameter resolution against session fields

use serde_json::Value;

use crate::error::{LoginRadiusError, Result};

/// Render a bound field value for use in a path segment or query string
pub fn binding_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Substitute `:field` segments of a route template.
///
/// A placeholder is a path segment starting with ':' followed by word
/// characters; anything after the field name stays in the segment, so
/// "profile/:id.json" binds `id`.
pub fn resolve_route<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let segments = template
        .split('/')
        .map(|segment| -> Result<String> {
            let Some(rest) = segment.strip_prefix(':') else {
                return Ok(segment.to_string());
            };

            let name_len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            if name_len == 0 {
                return Ok(segment.to_string());
            }

            let (name, suffix) = rest.split_at(name_len);
            let value =
                lookup(name).ok_or_else(|| LoginRadiusError::UnresolvedField(name.to_string()))?;
            Ok(format!("{}{}", value, suffix))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(segments.join("/"))
}

/// Resolve (remote, local) parameter bindings into query pairs, keeping order
pub fn resolve_params<F>(bindings: &[(&str, &str)], lookup: F) -> Result<Vec<(String, String)>>
where
    F: Fn(&str) -> Option<String>,
{
    bindings
        .iter()
        .map(|(remote, local)| {
            lookup(local)
                .map(|value| (remote.to_string(), value))
                .ok_or_else(|| LoginRadiusError::UnresolvedField(local.to_string()))
        })
        .collect()
}
