//! `?name` built-ins

use crate::error::{EvalError, EvalResult};
use crate::value::{has_content, to_text, type_name};
use serde_json::Value;

/// Apply the built-in `name` to an already evaluated value
///
/// `has_content` is also handled by the engine before evaluation fails, so a
/// missing variable yields `false` instead of an error.
pub fn apply(name: &str, value: Value) -> EvalResult<Value> {
    match name {
        "upper_case" => map_text(&value, |s| s.to_uppercase()),
        "lower_case" => map_text(&value, |s| s.to_lowercase()),
        "cap_first" => map_text(&value, |s| map_first(s, char::to_uppercase)),
        "uncap_first" => map_text(&value, |s| map_first(s, char::to_lowercase)),
        "trim" => map_text(&value, |s| s.trim().to_string()),
        "string" => to_text(&value).map(Value::String),
        "length" => match &value {
            Value::String(s) => Ok(Value::from(s.chars().count())),
            other => Err(EvalError::type_error("string", type_name(other))),
        },
        "size" => match &value {
            Value::Array(items) => Ok(Value::from(items.len())),
            Value::Object(map) => Ok(Value::from(map.len())),
            other => Err(EvalError::type_error("sequence or hash", type_name(other))),
        },
        "c" => match &value {
            Value::Number(_) | Value::Bool(_) | Value::String(_) => {
                to_text(&value).map(Value::String)
            }
            other => Err(EvalError::type_error("number or boolean", type_name(other))),
        },
        "has_content" => Ok(Value::Bool(has_content(&value))),
        _ => Err(EvalError::UnknownBuiltin {
            name: name.to_string(),
        }),
    }
}

fn map_text(value: &Value, f: impl FnOnce(&str) -> String) -> EvalResult<Value> {
    let text = to_text(value)?;
    Ok(Value::String(f(&text)))
}

fn map_first<I>(text: &str, f: impl FnOnce(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_builtins() {
        assert_eq!(apply("upper_case", json!("paris")).unwrap(), json!("PARIS"));
        assert_eq!(apply("cap_first", json!("élan vital")).unwrap(), json!("Élan vital"));
        assert_eq!(apply("uncap_first", json!("Hello")).unwrap(), json!("hello"));
        assert_eq!(apply("cap_first", json!("")).unwrap(), json!(""));
        assert_eq!(apply("trim", json!("  x ")).unwrap(), json!("x"));
    }

    #[test]
    fn test_length_and_size() {
        assert_eq!(apply("length", json!("héllo")).unwrap(), json!(5));
        assert_eq!(apply("size", json!([1, 2, 3])).unwrap(), json!(3));
        assert!(matches!(
            apply("size", json!("abc")),
            Err(EvalError::TypeError { .. })
        ));
    }

    #[test]
    fn test_c_formats_numbers() {
        assert_eq!(apply("c", json!(1500.0)).unwrap(), json!("1500"));
        assert_eq!(apply("c", json!(true)).unwrap(), json!("true"));
    }

    #[test]
    fn test_unknown_builtin() {
        assert_eq!(
            apply("reverse", json!("x")).unwrap_err(),
            EvalError::UnknownBuiltin {
                name: "reverse".into()
            }
        );
    }
}
