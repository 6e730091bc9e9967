//! Validation for farm input and for model replies
//!
//! Model output is decoded into an untyped [`serde_json::Value`] first and only
//! then checked field by field, so every rejection names the offending key.

use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use crate::extract::extract_json_payload;
use crate::models::{FarmInput, ModelReply, UrgencyLevel};

/// Number of raw reply characters kept for diagnostics
pub const RAW_EXCERPT_LIMIT: usize = 100;

// ============================================================================
// Farm Input Validation
// ============================================================================

/// A farm input field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct InputError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Checked in this order; the first failing field is reported
const INPUT_FIELDS: [(&str, &str, &str); 6] = [
    ("id", "id", "Input id must not be empty"),
    ("field_name", "fieldName", "Please fill in all fields."),
    ("crop_type", "cropType", "Please fill in all fields."),
    ("soil_moisture", "soilMoisture", "Soil moisture must be between 0.0 and 1.0."),
    ("current_weather", "currentWeather", "Please fill in all fields."),
    ("weather_forecast", "weatherForecast", "Please fill in all fields."),
];

/// Validate a farm observation before it enters the pipeline
///
/// Text fields must be non-empty after trimming and soil moisture must be a
/// finite value in `[0.0, 1.0]`.
pub fn validate_farm_input(input: &FarmInput) -> Result<(), InputError> {
    if let Err(errors) = input.validate() {
        let failed = errors.field_errors();
        for (name, field, message) in INPUT_FIELDS {
            if failed.contains_key(name) {
                return Err(InputError { field, message });
            }
        }
        return Err(InputError {
            field: "input",
            message: "Invalid farm input",
        });
    }

    // NaN slips past range comparisons
    if !input.soil_moisture.is_finite() {
        return Err(InputError {
            field: "soilMoisture",
            message: "Soil moisture must be between 0.0 and 1.0.",
        });
    }

    Ok(())
}

// ============================================================================
// Model Reply Validation
// ============================================================================

/// A decoded reply did not match the recommendation schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Received an invalid JSON structure from the AI: field `{field}` got {received}")]
pub struct SchemaError {
    pub field: &'static str,
    pub received: String,
}

impl SchemaError {
    fn new(field: &'static str, received: Option<&Value>) -> Self {
        Self {
            field,
            received: describe(received),
        }
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean {}", b),
        Some(Value::Number(n)) => format!("number {}", n),
        Some(Value::String(s)) => format!("string {:?}", s),
        Some(Value::Array(_)) => "array".to_string(),
        Some(Value::Object(_)) => "object".to_string(),
    }
}

/// Check a decoded reply against the recommendation schema
///
/// Checks `field_name`, then `urgency`, then `recommendation_text`, stopping
/// at the first failure. A payload that is not an object fails on
/// `field_name`.
pub fn validate_model_reply(parsed: &Value) -> Result<ModelReply, SchemaError> {
    let object = parsed.as_object();
    let lookup = |key: &str| object.and_then(|o| o.get(key));

    let field_name = match lookup("field_name") {
        Some(Value::String(s)) => s.clone(),
        other => {
            let received = match (object, other) {
                (None, _) => format!("payload of type {}", describe(Some(parsed))),
                (Some(_), other) => describe(other),
            };
            return Err(SchemaError {
                field: "field_name",
                received,
            });
        }
    };

    let urgency = match lookup("urgency") {
        Some(Value::String(s)) => s
            .parse::<UrgencyLevel>()
            .map_err(|_| SchemaError::new("urgency", lookup("urgency")))?,
        other => return Err(SchemaError::new("urgency", other)),
    };

    let recommendation_text = match lookup("recommendation_text") {
        Some(Value::String(s)) => s.clone(),
        other => return Err(SchemaError::new("recommendation_text", other)),
    };

    Ok(ModelReply {
        field_name,
        urgency,
        recommendation_text,
    })
}

/// Why a raw model reply could not be turned into a [`ModelReply`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("AI returned malformed JSON. Raw response: {excerpt}...")]
    Malformed { excerpt: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// First [`RAW_EXCERPT_LIMIT`] characters of a raw reply
pub fn raw_excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_LIMIT).collect()
}

/// Extract, decode and validate a raw model reply
pub fn parse_model_reply(raw: &str) -> Result<ModelReply, ReplyError> {
    let payload = extract_json_payload(raw);
    let parsed: Value = serde_json::from_str(payload).map_err(|_| ReplyError::Malformed {
        excerpt: raw_excerpt(raw),
    })?;
    Ok(validate_model_reply(&parsed)?)
}
