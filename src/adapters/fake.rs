//! Scripted text-generation service.
//!
//! Returns the same outcome on every call and records each request, so runs
//! are deterministic and need no network access or API key spend.

use crate::domain::message::{MessageRequest, MessageResponse};
use crate::domain::model::ApiKey;
use crate::domain::ports::{ServiceError, TextGenerationService};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

const SAMPLE_PLAN: [&str; 2] = [
    "Day 1: Breakfast - steel-cut oats with walnuts and berries. \
     Lunch - grilled chicken salad with olive oil dressing. \
     Dinner - baked salmon, quinoa and steamed broccoli.\n",
    "Day 2: Breakfast - Greek yogurt with chia seeds. \
     Lunch - lentil soup with a side of mixed greens. \
     Dinner - turkey stir-fry with brown rice and vegetables.",
];

#[derive(Debug)]
pub struct FakeService {
    outcome: Result<MessageResponse, ServiceError>,
    requests: Mutex<Vec<MessageRequest>>,
}

impl FakeService {
    pub fn responding(response: MessageResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Respond with one text block per entry.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::responding(MessageResponse::from_texts(texts))
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Canned two-day plan used by `provider = "fake"`.
    pub fn sample_plan() -> Self {
        Self::with_texts(SAMPLE_PLAN)
    }

    pub fn requests(&self) -> Vec<MessageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl TextGenerationService for FakeService {
    async fn create_message(
        &self,
        _api_key: &ApiKey,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ServiceError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.outcome.clone()
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
