//! Parsing and structural validation of raw remote output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::error::RemoteExtractionError;
use crate::types::ClassificationResult;

// Greedy: spans from the first `{` to the last `}` in the response.
static JSON_OBJECT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("Failed to compile JSON object regex"));

/// Shape the remote model is asked to produce.
///
/// Every key is required but values may be any JSON type; they are coerced to
/// strings afterwards.
#[derive(Debug, Deserialize)]
struct RemotePayload {
    zip: Value,
    brand: Value,
    category: Value,
    time_pref: Value,
}

impl From<RemotePayload> for ClassificationResult {
    fn from(payload: RemotePayload) -> Self {
        Self {
            zip: coerce_field(payload.zip),
            brand: coerce_field(payload.brand),
            category: coerce_field(payload.category),
            time_pref: coerce_field(payload.time_pref),
        }
    }
}

/// Returns the first-`{`-to-last-`}` span of `text`, if any.
///
/// # Examples
///
/// ```
/// use classify_core::extraction::locate_json_object;
///
/// assert_eq!(locate_json_object("Sure! {\"a\": 1} done"), Some("{\"a\": 1}"));
/// assert_eq!(locate_json_object("no braces here"), None);
/// ```
#[must_use]
pub fn locate_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_PATTERN.find(text).map(|m| m.as_str())
}

/// Turns raw remote output into a [`ClassificationResult`].
///
/// Falsy values (`null`, `false`, `0`, `""`) become empty strings; other
/// non-string values are rendered as compact JSON, with integral numbers
/// written without a fraction.
///
/// # Errors
///
/// Returns the matching [`RemoteExtractionError`] kind when the output is
/// empty, has no object span, does not parse, or lacks a required key.
pub fn parse_remote_output(raw: &str) -> Result<ClassificationResult, RemoteExtractionError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(RemoteExtractionError::EmptyResponse);
    }

    let candidate = locate_json_object(content).ok_or(RemoteExtractionError::NoJsonFound)?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| RemoteExtractionError::MalformedJson(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(RemoteExtractionError::SchemaViolation(
            "expected a JSON object".to_string(),
        ));
    };

    let payload: RemotePayload = serde_json::from_value(Value::Object(map))
        .map_err(|e| RemoteExtractionError::SchemaViolation(e.to_string()))?;

    Ok(payload.into())
}

fn coerce_field(value: Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s,
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER)
            .map_or_else(|| n.to_string(), render_integral),
        other => other.to_string(),
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// `1e2` renders as `100`, not `100.0`.
#[allow(clippy::cast_possible_truncation)]
fn render_integral(f: f64) -> String {
    (f as i64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_from_surrounding_prose() {
        let raw = r#"Sure! {"zip":"10001","brand":"Nike","category":"Shoes","time_pref":"Evening"} done"#;
        let result = parse_remote_output(raw).unwrap();

        assert_eq!(
            result,
            ClassificationResult {
                zip: "10001".to_string(),
                brand: "Nike".to_string(),
                category: "Shoes".to_string(),
                time_pref: "Evening".to_string(),
            }
        );
    }

    #[test]
    fn test_locate_spans_first_open_to_last_close() {
        let text = r#"a {"x": {"y": 1}} b } c"#;
        assert_eq!(locate_json_object(text), Some(r#"{"x": {"y": 1}} b }"#));
    }

    #[test]
    fn test_locate_spans_newlines() {
        let text = "```json\n{\n  \"zip\": \"\"\n}\n```";
        assert_eq!(locate_json_object(text), Some("{\n  \"zip\": \"\"\n}"));
    }

    #[test]
    fn test_empty_and_whitespace_output() {
        assert_eq!(
            parse_remote_output(""),
            Err(RemoteExtractionError::EmptyResponse)
        );
        assert_eq!(
            parse_remote_output("  \n\t "),
            Err(RemoteExtractionError::EmptyResponse)
        );
    }

    #[test]
    fn test_no_json_found() {
        assert_eq!(
            parse_remote_output("I could not find anything."),
            Err(RemoteExtractionError::NoJsonFound)
        );
    }

    #[test]
    fn test_two_fragments_are_malformed() {
        let raw = r#"{"zip":"1"} and also {"brand":"2"}"#;
        assert!(matches!(
            parse_remote_output(raw),
            Err(RemoteExtractionError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_missing_key_is_schema_violation() {
        let raw = r#"{"zip":"10001","brand":"Nike","category":"Shoes"}"#;
        match parse_remote_output(raw) {
            Err(RemoteExtractionError::SchemaViolation(message)) => {
                assert!(message.contains("time_pref"));
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_falsy_values_become_empty() {
        let raw = r#"{"zip":null,"brand":false,"category":0,"time_pref":""}"#;
        assert_eq!(parse_remote_output(raw).unwrap(), ClassificationResult::empty());
    }

    #[test]
    fn test_truthy_non_strings_are_rendered() {
        let raw = r#"{"zip":90210,"brand":true,"category":["a"],"time_pref":{"t":1}}"#;
        let result = parse_remote_output(raw).unwrap();

        assert_eq!(result.zip, "90210");
        assert_eq!(result.brand, "true");
        assert_eq!(result.category, r#"["a"]"#);
        assert_eq!(result.time_pref, r#"{"t":1}"#);
    }

    #[test]
    fn test_integral_float_renders_without_fraction() {
        let raw = r#"{"zip":1e2,"brand":-3.0,"category":2.5,"time_pref":0.0}"#;
        let result = parse_remote_output(raw).unwrap();

        assert_eq!(result.zip, "100");
        assert_eq!(result.brand, "-3");
        assert_eq!(result.category, "2.5");
        assert_eq!(result.time_pref, "");
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let raw = r#"{"zip":"1","brand":"b","category":"c","time_pref":"t","confidence":0.9}"#;
        let result = parse_remote_output(raw).unwrap();
        assert_eq!(result.time_pref, "t");
    }
}
