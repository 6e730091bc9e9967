//! Farm observation models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One farm observation submitted for a recommendation
///
/// The record is immutable once accepted. `id` is assigned by whoever creates
/// the record and is copied onto the resulting [`crate::Recommendation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmInput {
    #[validate(custom = "not_blank")]
    pub id: String,

    #[validate(custom = "not_blank")]
    pub field_name: String,

    #[validate(custom = "not_blank")]
    pub crop_type: String,

    /// Volumetric soil moisture, 0.0 (dry) to 1.0 (saturated)
    #[validate(range(min = 0.0, max = 1.0))]
    pub soil_moisture: f64,

    #[validate(custom = "not_blank")]
    pub current_weather: String,

    /// Reading in the configured temperature unit
    pub temperature: f64,

    /// Forecast for the next 3 hours
    #[validate(custom = "not_blank")]
    pub weather_forecast: String,
}

impl FarmInput {
    pub fn new(
        id: impl Into<String>,
        field_name: impl Into<String>,
        crop_type: impl Into<String>,
        soil_moisture: f64,
        current_weather: impl Into<String>,
        temperature: f64,
        weather_forecast: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            field_name: field_name.into(),
            crop_type: crop_type.into(),
            soil_moisture,
            current_weather: current_weather.into(),
            temperature,
            weather_forecast: weather_forecast.into(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
