//! Declarative response contract for the structured analysis call.
//!
//! The same schema is sent to Gemini as `responseSchema` and used to check
//! the parsed payload before any field is trusted. Mismatches are rejected,
//! never coerced.

use serde_json::{json, Value};

use crate::{Error, Result};

/// Gemini `responseSchema` for one product analysis payload.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Executive summary of public sentiment."
            },
            "reviews": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "source": {
                            "type": "STRING",
                            "enum": ["Reddit", "Twitter", "Product Hunt", "Hacker News"]
                        },
                        "author": { "type": "STRING" },
                        "content": { "type": "STRING" },
                        "sentiment": {
                            "type": "STRING",
                            "enum": ["Positive", "Neutral", "Negative"]
                        },
                        "category": {
                            "type": "STRING",
                            "enum": ["Bug Report", "Feature Request", "Praise", "General Feedback"]
                        },
                        "likes": { "type": "INTEGER" },
                        "date": {
                            "type": "STRING",
                            "description": "ISO date string, recent relative to now (e.g. '2026-07-28')"
                        }
                    },
                    "required": ["id", "source", "author", "content", "sentiment", "category", "likes", "date"]
                }
            },
            "features": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "impactScore": { "type": "INTEGER", "description": "1-10 scale" },
                        "effortScore": { "type": "INTEGER", "description": "1-10 scale" },
                        "priority": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
                        "relatedReviewIds": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["id", "title", "description", "impactScore", "effortScore", "priority", "relatedReviewIds"]
                }
            }
        },
        "required": ["summary", "reviews", "features"]
    })
}

/// Check a parsed payload against the declared contract.
pub fn validate(schema: &Value, value: &Value) -> Result<()> {
    validate_at(schema, value, "$")
}

fn validate_at(schema: &Value, value: &Value, path: &str) -> Result<()> {
    match schema.get("type").and_then(Value::as_str) {
        Some("OBJECT") => {
            let object = value
                .as_object()
                .ok_or_else(|| mismatch(path, "object", value))?;

            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for field in required.iter().filter_map(Value::as_str) {
                    if !object.contains_key(field) {
                        return Err(Error::SchemaViolation(format!(
                            "{}.{}: missing required field",
                            path, field
                        )));
                    }
                }
            }

            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, property_schema) in properties {
                    if let Some(child) = object.get(name) {
                        validate_at(property_schema, child, &format!("{}.{}", path, name))?;
                    }
                }
            }
            Ok(())
        }
        Some("ARRAY") => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(path, "array", value))?;

            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    validate_at(item_schema, item, &format!("{}[{}]", path, index))?;
                }
            }
            Ok(())
        }
        Some("STRING") => {
            let text = value
                .as_str()
                .ok_or_else(|| mismatch(path, "string", value))?;

            if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
                let permitted = allowed.iter().filter_map(Value::as_str).any(|v| v == text);
                if !permitted {
                    return Err(Error::SchemaViolation(format!(
                        "{}: '{}' is not a permitted value",
                        path, text
                    )));
                }
            }
            Ok(())
        }
        Some("INTEGER") => {
            if value.as_i64().is_none() && value.as_u64().is_none() {
                return Err(mismatch(path, "integer", value));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> Error {
    Error::SchemaViolation(format!(
        "{}: expected {}, got {}",
        path,
        expected,
        json_type_name(value)
    ))
}

fn json_type_name(value: &Value) -> &'static str {
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

    fn valid_payload() -> Value {
        json!({
            "summary": "Mostly positive reception.",
            "reviews": [
                {
                    "id": "r1",
                    "source": "Reddit",
                    "author": "dev_dana",
                    "content": "Syncs flawlessly across devices.",
                    "sentiment": "Positive",
                    "category": "Praise",
                    "likes": 42,
                    "date": "2026-07-29"
                }
            ],
            "features": [
                {
                    "id": "f1",
                    "title": "Offline mode",
                    "description": "Work without a connection.",
                    "impactScore": 9,
                    "effortScore": 6,
                    "priority": "High",
                    "relatedReviewIds": ["r1"]
                }
            ]
        })
    }

    #[test]
    fn test_schema_declares_top_level_required_fields() {
        let schema = analysis_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["summary", "reviews", "features"]);
    }

    #[test]
    fn test_schema_declares_enum_spellings() {
        let schema = analysis_response_schema();
        let sentiment = &schema["properties"]["reviews"]["items"]["properties"]["sentiment"];
        let values: Vec<&str> = sentiment["enum"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(values, vec!["Positive", "Neutral", "Negative"]);
    }

    #[test]
    fn test_validate_accepts_conformant_payload() {
        let schema = analysis_response_schema();
        assert!(validate(&schema, &valid_payload()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_required_field() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("summary");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("summary"));
        assert!(err.to_string().contains("missing required field"));
    }

    #[test]
    fn test_validate_rejects_missing_nested_field() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["reviews"][0].as_object_mut().unwrap().remove("likes");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("likes"));
    }

    #[test]
    fn test_validate_rejects_value_outside_enum() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["reviews"][0]["sentiment"] = json!("Ecstatic");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("Ecstatic"));
        assert!(err.to_string().contains("not a permitted value"));
    }

    #[test]
    fn test_validate_rejects_wrong_scalar_type() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["reviews"][0]["likes"] = json!("many");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_validate_rejects_fractional_integer() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["features"][0]["impactScore"] = json!(7.5);

        assert!(validate(&schema, &payload).is_err());
    }

    #[test]
    fn test_validate_rejects_non_array_reviews() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["reviews"] = json!("none");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn test_validate_reports_item_index_in_path() {
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        let second = payload["reviews"][0].clone();
        payload["reviews"].as_array_mut().unwrap().push(second);
        payload["reviews"][1]["category"] = json!("Rant");

        let err = validate(&schema, &payload).unwrap_err();
        assert!(err.to_string().contains("reviews[1]"));
    }

    #[test]
    fn test_validate_tolerates_unknown_extra_fields() {
        // Extra fields are ignored; only declared shape is enforced.
        let schema = analysis_response_schema();
        let mut payload = valid_payload();
        payload["reviews"][0]["upvoteRatio"] = json!(0.97);

        assert!(validate(&schema, &payload).is_ok());
    }
}
