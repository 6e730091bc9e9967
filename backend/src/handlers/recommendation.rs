//! HTTP handlers for recommendation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{validate_farm_input, FarmInput, Recommendation};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

/// Farm observation as submitted by the form
///
/// `id` is optional; a fresh one is assigned when the client omits it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmInputRequest {
    pub id: Option<String>,
    pub field_name: String,
    pub crop_type: String,
    pub soil_moisture: f64,
    pub current_weather: String,
    pub temperature: f64,
    pub weather_forecast: String,
}

impl FarmInputRequest {
    pub fn into_input(self) -> FarmInput {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        FarmInput {
            id,
            field_name: self.field_name,
            crop_type: self.crop_type,
            soil_moisture: self.soil_moisture,
            current_weather: self.current_weather,
            temperature: self.temperature,
            weather_forecast: self.weather_forecast,
        }
    }
}

/// Generate a recommendation and put it at the top of the board
///
/// A body that does not decode is reported through the same error envelope
/// as any other validation failure.
pub async fn create_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<FarmInputRequest>, JsonRejection>,
) -> AppResult<Json<Recommendation>> {
    let Json(request) = payload?;
    let input = request.into_input();
    validate_farm_input(&input)?;

    let recommendation = state.recommendations.generate(&input).await?;
    state.board.write().await.upsert(recommendation.clone());

    Ok(Json(recommendation))
}

/// List recommendations, most recent first
pub async fn list_recommendations(State(state): State<AppState>) -> Json<Vec<Recommendation>> {
    Json(state.board.read().await.list().to_vec())
}

/// Clear all recommendations
pub async fn clear_recommendations(State(state): State<AppState>) -> StatusCode {
    state.board.write().await.clear();
    tracing::info!("Recommendation board cleared");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<&str>) -> FarmInputRequest {
        FarmInputRequest {
            id: id.map(str::to_string),
            field_name: "North Paddock".to_string(),
            crop_type: "Corn".to_string(),
            soil_moisture: 0.3,
            current_weather: "Sunny".to_string(),
            temperature: 88.0,
            weather_forecast: "Clear".to_string(),
        }
    }

    #[test]
    fn test_client_id_is_kept() {
        assert_eq!(request(Some("abc")).into_input().id, "abc");
    }

    #[test]
    fn test_missing_or_blank_id_is_assigned() {
        let assigned = request(None).into_input().id;
        assert!(Uuid::parse_str(&assigned).is_ok());
        assert_ne!(request(Some("  ")).into_input().id.trim(), "");
    }
}
