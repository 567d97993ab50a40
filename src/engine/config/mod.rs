use jsonschema::validator_for;
use serde_json::{Value, json};

use crate::domain::ad::Config;
use crate::domain::error::{ConfigError, ConfigFieldError};

/// JSON Schema every QA config document must satisfy.
///
/// Unknown keys are allowed at every level and dropped on conversion.
pub fn config_schema() -> Value {
    json!({
        "type": "object",
        "required": ["expected_values", "ad_search_key"],
        "properties": {
            "expected_values": {
                "type": "object",
                "required": ["ad_name", "landing_page", "cta", "cgens", "campaigns"],
                "properties": {
                    "ad_name": {"type": "string"},
                    "landing_page": {"type": "string"},
                    "cta": {"type": "string"},
                    "cgens": {
                        "type": "object",
                        "additionalProperties": {"type": "integer"}
                    },
                    "campaigns": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "array",
                            "items": {"type": "string"}
                        }
                    }
                }
            },
            "checks": {
                "type": ["object", "null"],
                "properties": {
                    "cta": {"type": "boolean"},
                    "ad_name": {"type": "boolean"},
                    "cgen": {"type": "boolean"},
                    "landing_page": {"type": "boolean"}
                }
            },
            "ad_search_key": {"type": "string"}
        }
    })
}

/// Validates `value` against [`config_schema`] and converts it.
///
/// Every schema violation is returned at once; nothing is partially applied.
pub fn parse_config(value: &Value) -> Result<Config, ConfigError> {
    let schema = config_schema();
    let validator = validator_for(&schema)
        .map_err(|error| ConfigError::SchemaDefinition(error.to_string()))?;

    let mut errors: Vec<ConfigFieldError> = validator
        .iter_errors(value)
        .map(|error| ConfigFieldError {
            path: path_from_json_pointer(error.instance_path().as_str()),
            message: error.to_string(),
        })
        .collect();
    if !errors.is_empty() {
        errors.sort_by(|left, right| {
            (&left.path, &left.message).cmp(&(&right.path, &right.message))
        });
        return Err(ConfigError::Schema { errors });
    }

    serde_json::from_value(value.clone()).map_err(|error| ConfigError::Schema {
        errors: vec![ConfigFieldError {
            path: "$".to_string(),
            message: error.to_string(),
        }],
    })
}

/// Renders a JSON pointer such as `/expected_values/campaigns/Spring Sale/0`
/// as `$.expected_values.campaigns["Spring Sale"][0]`.
fn path_from_json_pointer(pointer: &str) -> String {
    let mut path = String::from("$");
    for token in pointer.split('/').skip(1) {
        let key = token.replace("~1", "/").replace("~0", "~");
        if !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit()) {
            path.push_str(&format!("[{key}]"));
        } else if is_bare_key(&key) {
            path.push('.');
            path.push_str(&key);
        } else {
            path.push_str(&format!("[{}]", Value::String(key)));
        }
    }
    path
}

fn is_bare_key(key: &str) -> bool {
    key.chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
