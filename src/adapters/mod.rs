// Adapters layer: concrete text-generation services.

pub mod anthropic;
pub mod fake;

pub use anthropic::AnthropicClient;
pub use fake::FakeService;

use crate::domain::ports::{ServiceSettings, TextGenerationService};
use crate::utils::error::{GlucoError, Result};

/// Build the service named by `service.provider` ("anthropic" | "fake").
pub fn create_service<C: ServiceSettings>(settings: &C) -> Result<Box<dyn TextGenerationService>> {
    match settings.provider() {
        "anthropic" => Ok(Box::new(AnthropicClient::new(settings)?)),
        "fake" => {
            tracing::warn!("🔶 Using the offline fake provider, plans are canned");
            Ok(Box::new(FakeService::sample_plan()))
        }
        other => Err(GlucoError::InvalidConfigValueError {
            field: "service.provider".to_string(),
            value: other.to_string(),
            reason: "Unknown provider".to_string(),
        }),
    }
}
