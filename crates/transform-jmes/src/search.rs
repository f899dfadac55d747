//! JMESPath lookups
//!
//! Thin adapter over the `jmespath` crate. A path that matches nothing
//! yields `Value::Null`; only malformed expressions and runtime type
//! errors inside the expression are reported as errors.

use crate::{Error, Result};
use serde_json::Value;

/// Search `data` with a JMESPath expression
///
/// # Errors
///
/// Returns [`Error::PathQuery`] when the expression is malformed or fails to evaluate.
pub fn search(path: &str, data: &Value) -> Result<Value> {
    let expression = jmespath::compile(path)
        .map_err(|e| Error::path_query(path, e.to_string()))?;
    let found = expression
        .search(data)
        .map_err(|e| Error::path_query(path, e.to_string()))?;

    if found.is_null() {
        return Ok(Value::Null);
    }

    serde_json::to_value(&*found)
        .map_err(|e| Error::path_query(path, e.to_string()))
}

/// Name of a value's type as used in error messages
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_simple_field() {
        let data = json!({"name": "John"});
        assert_eq!(search("name", &data).unwrap(), json!("John"));
    }

    #[test]
    fn test_search_projection() {
        let data = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
        assert_eq!(
            search("users[*].name", &data).unwrap(),
            json!(["Alice", "Bob"])
        );
    }

    #[test]
    fn test_search_missing_is_null() {
        let data = json!({"name": "John"});
        assert_eq!(search("address.city", &data).unwrap(), Value::Null);
    }

    #[test]
    fn test_search_malformed_expression() {
        let err = search("invalid[[", &json!({})).unwrap_err();
        match err {
            Error::PathQuery { path, .. } => assert_eq!(path, "invalid[["),
            other => panic!("Expected PathQuery error, got {other:?}"),
        }
    }

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&json!(1.5)), "number");
        assert_eq!(value_type_name(&json!([])), "array");
        assert_eq!(value_type_name(&Value::Null), "null");
    }
}
