//! Test helpers shared by the backend integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use agrosage_backend::external::{GenerationFailure, GenerationRequest, TextGenerator};
use agrosage_backend::services::{RecommendationService, RecommendationSettings};
use async_trait::async_trait;
use shared::{FarmInput, TemperatureUnit};

/// Text generator returning a canned reply and counting calls
pub struct MockGenerator {
    reply: Result<String, GenerationFailure>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockGenerator {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(GenerationFailure::new(message)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone()
    }
}

pub fn service_with(generator: Arc<MockGenerator>, api_key: Option<&str>) -> RecommendationService {
    RecommendationService::new(
        generator,
        RecommendationSettings::new(api_key.map(str::to_string), TemperatureUnit::Fahrenheit),
    )
}

pub fn north_paddock(id: &str) -> FarmInput {
    FarmInput::new(
        id,
        "North Paddock",
        "Corn",
        0.25,
        "Sunny and dry",
        91.0,
        "No rain expected",
    )
}

pub const SCENARIO_A_REPLY: &str = "```json\n{\"field_name\":\"North Paddock\",\"urgency\":\"High\",\"recommendation_text\":\"Irrigate now\"}\n```";
