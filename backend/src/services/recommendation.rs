//! Recommendation service
//!
//! Turns one farm observation into a validated [`Recommendation`]:
//! prompt → remote generation → fence stripping → JSON decode → schema
//! validation. Every failure is terminal for the call; nothing is retried.

use std::sync::Arc;

use chrono::Utc;
use shared::{
    build_prompt, parse_model_reply, request_contents, validate_farm_input, FarmInput,
    Recommendation, TemperatureUnit, JSON_RESPONSE_MIME_TYPE, MODEL_NAME, SYSTEM_INSTRUCTION,
};

use crate::error::{AppError, AppResult};
use crate::external::{GenerationFailure, GenerationRequest, TextGenerator};

/// Substring the Gemini API uses when rejecting a key
const INVALID_KEY_MARKER: &str = "API key not valid";

/// Static settings for recommendation generation
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub system_instruction: String,
    pub temperature_unit: TemperatureUnit,
}

impl RecommendationSettings {
    pub fn new(api_key: Option<String>, temperature_unit: TemperatureUnit) -> Self {
        Self {
            api_key,
            model: MODEL_NAME.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature_unit,
        }
    }
}

/// Recommendation service; stateless between calls
#[derive(Clone)]
pub struct RecommendationService {
    generator: Arc<dyn TextGenerator>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    /// Create a new RecommendationService instance
    pub fn new(generator: Arc<dyn TextGenerator>, settings: RecommendationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Whether a credential is present
    pub fn is_configured(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Generate a recommendation for one farm observation
    pub async fn generate(&self, input: &FarmInput) -> AppResult<Recommendation> {
        let api_key = self.credential().ok_or_else(|| {
            AppError::Configuration(
                "Gemini API key is not configured. Please set the API_KEY environment variable."
                    .to_string(),
            )
        })?;

        validate_farm_input(input)?;

        let prompt = build_prompt(input, self.settings.temperature_unit);
        let request = GenerationRequest {
            api_key: api_key.to_string(),
            model: self.settings.model.clone(),
            contents: request_contents(&prompt),
            system_instruction: self.settings.system_instruction.clone(),
            response_mime_type: JSON_RESPONSE_MIME_TYPE.to_string(),
        };

        tracing::info!("Requesting recommendation for input {}", input.id);

        let raw = self
            .generator
            .generate(&request)
            .await
            .map_err(classify_failure)?;

        let reply = parse_model_reply(&raw).map_err(|e| {
            tracing::warn!("Rejected model reply for input {}: {}", input.id, e);
            tracing::debug!("Original model text response: {}", raw);
            AppError::from(e)
        })?;

        let recommendation = Recommendation::from_reply(input.id.clone(), reply, Utc::now());
        tracing::info!(
            "Recommendation for input {} has {} urgency",
            recommendation.id,
            recommendation.urgency
        );

        Ok(recommendation)
    }
}

/// Map a generator failure onto the error taxonomy
fn classify_failure(failure: GenerationFailure) -> AppError {
    tracing::error!("Error calling Gemini API: {}", failure);
    if failure.message.contains(INVALID_KEY_MARKER) {
        AppError::InvalidCredential(failure.message)
    } else {
        AppError::Remote(failure.message)
    }
}
