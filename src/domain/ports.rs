use crate::domain::message::{MessageRequest, MessageResponse};
use crate::domain::model::ApiKey;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of one call to a text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service refused the request itself (bad key, malformed payload).
    #[error("{message}")]
    ClientRequest {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Something that can answer a single-turn message request.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn create_message(
        &self,
        api_key: &ApiKey,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ServiceError>;

    /// e.g. "anthropic", "fake"
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: TextGenerationService + ?Sized> TextGenerationService for Box<T> {
    async fn create_message(
        &self,
        api_key: &ApiKey,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ServiceError> {
        (**self).create_message(api_key, request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

/// Settings the HTTP adapter and the requester read.
pub trait ServiceSettings: Send + Sync {
    fn provider(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
    fn api_version(&self) -> &str;
}
