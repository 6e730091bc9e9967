//! WebAssembly module for AgroSage
//!
//! Provides client-side helpers for the browser form:
//! - Farm input validation before submission
//! - Prompt preview
//! - Model reply parsing
//! - Urgency badge styling

use shared::{FarmInput, TemperatureUnit, UrgencyLevel};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

fn parse_input(input_json: &str) -> Result<FarmInput, JsValue> {
    serde_json::from_str(input_json)
        .map_err(|e| js_error(format!("Invalid farm input JSON: {}", e)))
}

/// Validate a farm input (camelCase JSON) before it is submitted
#[wasm_bindgen]
pub fn validate_farm_input_json(input_json: &str) -> Result<(), JsValue> {
    let input = parse_input(input_json)?;
    shared::validate_farm_input(&input).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        js_error(e.message)
    })
}

/// Render the context summary that will be sent to the model
#[wasm_bindgen]
pub fn preview_prompt(input_json: &str, unit: &str) -> Result<String, JsValue> {
    let input = parse_input(input_json)?;
    let unit: TemperatureUnit = unit.parse().map_err(js_error)?;
    Ok(shared::build_prompt(&input, unit))
}

/// Extract, decode and validate a raw model reply, returning normalized JSON
#[wasm_bindgen]
pub fn parse_model_reply(raw: &str) -> Result<String, JsValue> {
    let reply = shared::parse_model_reply(raw).map_err(|e| js_error(e.to_string()))?;
    serde_json::to_string(&reply).map_err(|e| js_error(e.to_string()))
}

/// Badge styling for an urgency tag, as JSON
#[wasm_bindgen]
pub fn urgency_style_json(urgency: &str) -> Result<String, JsValue> {
    let level: UrgencyLevel = urgency.parse().map_err(js_error)?;
    let style = level.style();
    serde_json::to_string(&serde_json::json!({
        "label": level.label(),
        "background": style.background,
        "text": style.text,
        "border": style.border,
        "icon": style.icon,
    }))
    .map_err(|e| js_error(e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    fn message(err: JsValue) -> String {
        err.unchecked_into::<js_sys::Error>().message().into()
    }

    #[wasm_bindgen_test]
    fn test_undecodable_input_is_js_error() {
        let err = validate_farm_input_json("{not json").unwrap_err();
        assert!(message(err).starts_with("Invalid farm input JSON"));
    }

    #[wasm_bindgen_test]
    fn test_out_of_range_moisture_is_js_error() {
        let input = r#"{"id":"a","fieldName":"F","cropType":"Corn","soilMoisture":1.5,"currentWeather":"Sunny","temperature":80,"weatherForecast":"Clear"}"#;
        let err = validate_farm_input_json(input).unwrap_err();
        assert!(message(err).contains("Soil moisture"));
    }

    #[wasm_bindgen_test]
    fn test_unknown_unit_is_js_error() {
        let input = r#"{"id":"a","fieldName":"F","cropType":"Corn","soilMoisture":0.5,"currentWeather":"Sunny","temperature":80,"weatherForecast":"Clear"}"#;
        assert!(preview_prompt(input, "K").is_err());
    }

    #[wasm_bindgen_test]
    fn test_rejected_reply_is_js_error() {
        assert!(parse_model_reply("not json at all").is_err());
        assert!(parse_model_reply(r#"{"field_name":"A","urgency":"Urgent","recommendation_text":"x"}"#).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_urgency_is_js_error() {
        assert!(urgency_style_json("high").is_err());
    }
}
