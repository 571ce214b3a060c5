//! JSON Schema generation for catalog operations.

use serde_json::{Map, Value, json};

use cloudrelay_client::catalog::{MAX_EMAIL_LENGTH, MAX_IDENTIFIER_LENGTH, MAX_TEXT_LENGTH};
use cloudrelay_client::{OperationSpec, ParamKind, ParamSpec};

/// Pattern every identifier argument must match.
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z0-9_.:-]+$";

/// Input schema for one catalog operation.
///
/// Mirrors the checks `catalog::bind` performs so that hosts can validate arguments
/// before calling. Unknown properties are disallowed.
#[must_use]
pub fn operation_schema(spec: &OperationSpec) -> Map<String, Value> {
    let properties: Map<String, Value> = spec
        .params
        .iter()
        .map(|param| (param.name.to_string(), param_schema(param)))
        .collect();

    let required: Vec<&str> = spec
        .params
        .iter()
        .filter(|param| param.required)
        .map(|param| param.name)
        .collect();

    object_schema(properties, &required)
}

pub(crate) fn object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), json!(required));
    schema.insert("additionalProperties".to_string(), json!(false));
    schema
}

fn param_schema(param: &ParamSpec) -> Value {
    let mut schema = match param.kind {
        ParamKind::Identifier => json!({
            "type": "string",
            "minLength": 1,
            "maxLength": MAX_IDENTIFIER_LENGTH,
            "pattern": IDENTIFIER_PATTERN,
        }),
        ParamKind::Text => json!({
            "type": "string",
            "maxLength": MAX_TEXT_LENGTH,
        }),
        ParamKind::Email => json!({
            "type": "string",
            "format": "email",
            "maxLength": MAX_EMAIL_LENGTH,
        }),
        ParamKind::Integer { min, max } => json!({
            "type": "integer",
            "minimum": min,
            "maximum": max,
        }),
        ParamKind::Boolean => json!({ "type": "boolean" }),
        ParamKind::Enum(values) => json!({
            "type": "string",
            "enum": values,
        }),
    };

    if let Value::Object(map) = &mut schema {
        map.insert("description".to_string(), json!(param.description));
    }
    schema
}
