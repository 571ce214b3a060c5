use serde_json::{Map, Value};

use super::{
    HttpMethod, MAX_EMAIL_LENGTH, MAX_IDENTIFIER_LENGTH, MAX_TEXT_LENGTH, OperationSpec,
    ParamKind, ParamLocation, ParamSpec,
};
use crate::error::GatewayError;

/// A request ready to send: path already substituted, query pairs in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRequest {
    pub operation: &'static str,
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// Validates `args` against `spec` and binds them into a request.
///
/// `args` must be a JSON object (or `null` for operations without required
/// parameters). Unknown argument names are rejected.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] describing the first offending argument.
pub fn bind(spec: &'static OperationSpec, args: &Value) -> Result<BoundRequest, GatewayError> {
    let empty = Map::new();
    let args = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(invalid("arguments must be a JSON object")),
    };

    if let Some(unknown) = args.keys().find(|key| spec.param(key).is_none()) {
        return Err(invalid(format!("unknown parameter '{unknown}'")));
    }

    let mut path = spec.path.to_string();
    let mut query = Vec::new();

    for param in spec.params {
        let value = match args.get(param.name) {
            None | Some(Value::Null) if param.required => {
                return Err(invalid(format!("missing required parameter '{}'", param.name)));
            }
            None | Some(Value::Null) => continue,
            Some(value) => render(param, value)?,
        };

        match param.location {
            ParamLocation::Path => {
                path = path.replace(&format!("{{{}}}", param.name), &value);
            }
            ParamLocation::Query => query.push((param.wire_name.to_string(), value)),
        }
    }

    Ok(BoundRequest {
        operation: spec.name,
        method: spec.method,
        path,
        query,
    })
}

fn invalid(message: impl Into<String>) -> GatewayError {
    GatewayError::Validation(message.into())
}

/// Checks one value against its kind and renders it as a string.
fn render(param: &ParamSpec, value: &Value) -> Result<String, GatewayError> {
    let name = param.name;
    match param.kind {
        ParamKind::Identifier => {
            let text = expect_str(name, value)?;
            if text.is_empty() || text.chars().count() > MAX_IDENTIFIER_LENGTH {
                return Err(invalid(format!(
                    "'{name}' must be between 1 and {MAX_IDENTIFIER_LENGTH} characters"
                )));
            }
            if !text
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
            {
                return Err(invalid(format!(
                    "'{name}' may only contain letters, digits, '_', '-', '.' and ':'"
                )));
            }
            if text.chars().all(|c| c == '.') {
                return Err(invalid(format!("'{name}' is not a valid identifier")));
            }
            Ok(text.to_string())
        }
        ParamKind::Text => {
            let text = expect_str(name, value)?;
            if text.chars().count() > MAX_TEXT_LENGTH {
                return Err(invalid(format!(
                    "'{name}' must be at most {MAX_TEXT_LENGTH} characters"
                )));
            }
            Ok(text.to_string())
        }
        ParamKind::Email => {
            let text = expect_str(name, value)?;
            let valid = text.chars().count() <= MAX_EMAIL_LENGTH
                && !text.chars().any(char::is_whitespace)
                && text
                    .split_once('@')
                    .is_some_and(|(local, domain)| {
                        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                    });
            if !valid {
                return Err(invalid(format!(
                    "'{name}' must be an email address of at most {MAX_EMAIL_LENGTH} characters"
                )));
            }
            Ok(text.to_string())
        }
        ParamKind::Integer { min, max } => {
            let number = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| invalid(format!("'{name}' must be an integer")))?;
            if !(min..=max).contains(&number) {
                return Err(invalid(format!(
                    "'{name}' must be between {min} and {max}"
                )));
            }
            Ok(number.to_string())
        }
        ParamKind::Boolean => match value {
            Value::Bool(b) => Ok(b.to_string()),
            Value::String(s) if s == "true" || s == "false" => Ok(s.clone()),
            _ => Err(invalid(format!("'{name}' must be a boolean"))),
        },
        ParamKind::Enum(allowed) => {
            let text = expect_str(name, value)?;
            if allowed.contains(&text) {
                Ok(text.to_string())
            } else {
                Err(invalid(format!(
                    "'{name}' must be one of: {}",
                    allowed.join(", ")
                )))
            }
        }
    }
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, GatewayError> {
    value
        .as_str()
        .ok_or_else(|| invalid(format!("'{name}' must be a string")))
}
