//! Gemini API client
//!
//! Calls the Generative Language `generateContent` endpoint with a system
//! instruction and JSON response mode.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationFailure, GenerationRequest, TextGenerator};
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini text-generation API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

/// Gemini API response for generateContent
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiClient {
    /// Create a new GeminiClient against `base_url`
    ///
    /// Production uses [`DEFAULT_BASE_URL`] via configuration; tests point it
    /// at a local server.
    pub fn with_base_url(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.contents,
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: &request.response_mime_type,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let url = self.endpoint(&request.model);
        tracing::debug!("Calling Gemini model {}", request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| GenerationFailure::new(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(GenerationFailure::new(format!(
                "API returned {}: {}",
                status, message
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationFailure::new(format!("Failed to parse response: {}", e)))?;

        // An empty text part is still a reply; the service reports it as malformed.
        let content = result
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| GenerationFailure::new("Gemini response contained no candidate"))?;

        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::{RecommendationService, RecommendationSettings};
    use mockito::Matcher;
    use serde_json::json;
    use shared::{FarmInput, TemperatureUnit};

    const MODEL: &str = "gemini-test";

    fn request() -> GenerationRequest {
        GenerationRequest {
            api_key: "test-key".to_string(),
            model: MODEL.to_string(),
            contents: "Data: Field: 'North Paddock'".to_string(),
            system_instruction: "You are AgroSage".to_string(),
            response_mime_type: "application/json".to_string(),
        }
    }

    fn client(server: &mockito::Server) -> GeminiClient {
        GeminiClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "Data: Field: 'North Paddock'"}]}],
                "systemInstruction": {"parts": [{"text": "You are AgroSage"}]},
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                        "finishReason": "STOP"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let text = client(&server).generate(&request()).await.unwrap();
        assert_eq!(text, "{\"a\":1}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(400)
            .with_body(
                json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).generate(&request()).await.unwrap_err();
        assert!(err.message.contains("400"));
        assert!(err.message.contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(503)
            .with_body("upstream overloaded")
            .create_async()
            .await;

        let err = client(&server).generate(&request()).await.unwrap_err();
        assert!(err.message.contains("upstream overloaded"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(json!({"candidates": []}).to_string())
            .create_async()
            .await;

        assert!(client(&server).generate(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_content_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(json!({"candidates": [{"finishReason": "SAFETY"}]}).to_string())
            .create_async()
            .await;

        assert!(client(&server).generate(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_text_is_returned() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}).to_string())
            .create_async()
            .await;

        let text = client(&server).generate(&request()).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_empty_reply_is_malformed_through_service() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"^/models/.+:generateContent$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}).to_string())
            .create_async()
            .await;

        let service = RecommendationService::new(
            Arc::new(client(&server)),
            RecommendationSettings::new(Some("test-key".to_string()), TemperatureUnit::Fahrenheit),
        );
        let input = FarmInput::new(
            "input-1",
            "North Paddock",
            "Corn",
            0.25,
            "Sunny",
            91.0,
            "No rain expected",
        );

        let err = service.generate(&input).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { ref excerpt } if excerpt.is_empty()));
        mock.assert_async().await;
    }
}
