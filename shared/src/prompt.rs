//! Prompt construction for the text-generation endpoint
//!
//! The decision policy lives in [`SYSTEM_INSTRUCTION`] and is applied by the
//! remote model; nothing here evaluates it.

use crate::models::FarmInput;
use crate::types::TemperatureUnit;

/// Model identifier sent with every generation request
pub const MODEL_NAME: &str = "gemini-2.5-flash-preview-04-17";

/// MIME type requesting a machine-parseable JSON reply
pub const JSON_RESPONSE_MIME_TYPE: &str = "application/json";

/// Persona and decision policy given to the model as its system instruction
pub const SYSTEM_INSTRUCTION: &str = "You are AgroSage, an expert agronomist AI. Given the following farm data, provide a concise, actionable recommendation. Respond ONLY with a valid JSON object with three keys: 'field_name' (string, echoing the input field name), 'urgency' (string: 'Low', 'Medium', or 'High'), and 'recommendation_text' (string, max 100 characters). Base your recommendation on this logic: If moisture is below 0.4 and no rain is forecast (or forecast implies drying conditions), recommend irrigation with High urgency. If moisture is between 0.4 and 0.6 and no rain is forecast, recommend monitoring with Medium urgency. If moisture is high (above 0.6) or significant rain is forecast, state conditions are optimal or advise caution against overwatering with Low urgency. Consider temperature in your advice (e.g., high temperatures might increase urgency).";

/// Render a farm observation as a single-line context summary
pub fn build_prompt(input: &FarmInput, unit: TemperatureUnit) -> String {
    format!(
        "Field: '{}', Crop: '{}', Soil Moisture: {:.2}, Current Weather: '{}', Temperature: {}{}, Forecast (next 3 hours): '{}'",
        input.field_name,
        input.crop_type,
        round_half_up(input.soil_moisture),
        input.current_weather,
        input.temperature,
        unit.symbol(),
        input.weather_forecast,
    )
}

/// Round to two places with ties away from zero, so 0.125 renders as 0.13
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// User turn sent to the model for a context summary
pub fn request_contents(prompt: &str) -> String {
    format!("Data: {}", prompt)
}
