use crate::domain::message::{Message, MessageRequest, MessageResponse};
use crate::domain::model::{
    ApiKey, FailureKind, MealPlanResult, PatientProfile, MALFORMED_RESPONSE_MESSAGE,
};
use crate::domain::ports::{ServiceError, ServiceSettings, TextGenerationService};
use crate::domain::prompt::render_prompt;

/// Most probable completion, not a sampled one.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl RequestSettings {
    pub fn from_settings<C: ServiceSettings>(settings: &C) -> Self {
        Self {
            model: settings.model().to_string(),
            max_tokens: settings.max_tokens(),
        }
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            model: crate::config::toml_config::DEFAULT_MODEL.to_string(),
            max_tokens: crate::config::toml_config::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Turns one profile into one meal plan request and normalizes the answer.
///
/// Every failure comes back as a [`MealPlanResult::Failed`] value; nothing
/// here returns an error. Profiles are passed through as given.
pub struct MealPlanRequester<S: TextGenerationService> {
    service: S,
    settings: RequestSettings,
}

impl<S: TextGenerationService> MealPlanRequester<S> {
    pub fn new(service: S, settings: RequestSettings) -> Self {
        Self { service, settings }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub fn build_request(&self, profile: &PatientProfile) -> MessageRequest {
        MessageRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: TEMPERATURE,
            messages: vec![Message::user(render_prompt(profile))],
        }
    }

    pub async fn request_plan(&self, profile: &PatientProfile, api_key: &ApiKey) -> MealPlanResult {
        let request = self.build_request(profile);

        tracing::info!(
            provider = self.service.provider_name(),
            model = %request.model,
            "🍽️ Requesting meal plan"
        );

        let result = match self.service.create_message(api_key, &request).await {
            Ok(response) => normalize_response(response),
            Err(err) => normalize_error(err),
        };

        match &result {
            MealPlanResult::Plan { text } => {
                tracing::info!(chars = text.len(), "✅ Meal plan received");
            }
            MealPlanResult::Failed(failure) => {
                tracing::warn!(kind = ?failure.kind, "❌ Meal plan request failed: {}", failure.message);
            }
        }

        result
    }
}

/// 依序串接所有 text block，去掉頭尾空白
pub fn normalize_response(response: MessageResponse) -> MealPlanResult {
    match response.content {
        Some(blocks) if !blocks.is_empty() => {
            let text: String = blocks.into_iter().filter_map(|block| block.text).collect();
            MealPlanResult::plan(text.trim())
        }
        _ => MealPlanResult::failed(FailureKind::MalformedResponse, MALFORMED_RESPONSE_MESSAGE),
    }
}

pub fn normalize_error(err: ServiceError) -> MealPlanResult {
    match err {
        ServiceError::ClientRequest { message, .. } => {
            MealPlanResult::failed(FailureKind::ClientRequest, message)
        }
        other => MealPlanResult::failed(FailureKind::Unexpected, other.to_string()),
    }
}
