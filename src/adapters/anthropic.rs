//! Anthropic Messages API over HTTPS.

use crate::domain::message::{ErrorEnvelope, MessageRequest, MessageResponse};
use crate::domain::model::ApiKey;
use crate::domain::ports::{ServiceError, ServiceSettings, TextGenerationService};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    endpoint: String,
    api_version: String,
    timeout_seconds: u64,
}

impl AnthropicClient {
    pub fn new<C: ServiceSettings>(settings: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint().to_string(),
            api_version: settings.api_version().to_string(),
            timeout_seconds: settings.timeout_seconds(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            return ServiceError::Timeout {
                seconds: self.timeout_seconds,
            };
        }
        ServiceError::Transport(describe(&err))
    }
}

/// reqwest 的錯誤訊息本身很籠統，把 source chain 也串起來
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn error_from_status(status: StatusCode, body: String) -> ServiceError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();

    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        return match envelope {
            Some(envelope) => ServiceError::ClientRequest {
                status: status.as_u16(),
                error_type: envelope.error.error_type,
                message: envelope.error.message,
            },
            None => ServiceError::ClientRequest {
                status: status.as_u16(),
                error_type: String::new(),
                message: body,
            },
        };
    }

    ServiceError::Api {
        status: status.as_u16(),
        message: envelope.map(|e| e.error.message).unwrap_or(body),
    }
}

#[async_trait]
impl TextGenerationService for AnthropicClient {
    async fn create_message(
        &self,
        api_key: &ApiKey,
        request: &MessageRequest,
    ) -> std::result::Result<MessageResponse, ServiceError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            max_tokens = request.max_tokens,
            "📡 Sending message request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(error_from_status(status, body));
        }

        serde_json::from_str::<MessageResponse>(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlConfig;
    use crate::domain::message::Message;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, timeout_seconds: u64) -> AnthropicClient {
        let mut config = TomlConfig::default();
        config.service.endpoint = server.url("/v1/messages");
        config.service.timeout_seconds = timeout_seconds;
        AnthropicClient::new(&config).unwrap()
    }

    fn request() -> MessageRequest {
        MessageRequest {
            model: "claude-3-5-sonnet-20240620".to_string(),
            max_tokens: 2000,
            temperature: 0.0,
            messages: vec![Message::user("My fasting sugar level is 100")],
        }
    }

    #[tokio::test]
    async fn test_success_sends_headers_and_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-ant-test")
                .header("anthropic-version", "2023-06-01")
                .json_body_partial(
                    r#"{"model": "claude-3-5-sonnet-20240620", "max_tokens": 2000, "temperature": 0.0,
                        "messages": [{"role": "user", "content": "My fasting sugar level is 100"}]}"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "msg_01",
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "text", "text": "Breakfast: oatmeal"}],
                    "stop_reason": "end_turn"
                }));
        });

        let client = client_for(&server, 10);
        let response = client
            .create_message(&ApiKey::new("sk-ant-test"), &request())
            .await
            .unwrap();

        api_mock.assert();
        let blocks = response.content.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text.as_deref(), Some("Breakfast: oatmeal"));
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_client_request() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(400).json_body(serde_json::json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "max_tokens: field required"}
            }));
        });

        let err = client_for(&server, 10)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::ClientRequest {
                status: 400,
                error_type: "invalid_request_error".to_string(),
                message: "max_tokens: field required".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unauthorized_without_envelope_uses_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(401).body("unauthorized");
        });

        let err = client_for(&server, 10)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::ClientRequest { status: 401, ref message, .. } if message == "unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_and_server_errors_are_api_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(429).json_body(serde_json::json!({
                "type": "error",
                "error": {"type": "rate_limit_error", "message": "slow down"}
            }));
        });

        let err = client_for(&server, 10)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Api {
                status: 429,
                message: "slow down".to_string()
            }
        );

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(529).body("overloaded");
        });

        let err = client_for(&server, 10)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Api { status: 529, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).body("<html>not json</html>");
        });

        let err = client_for(&server, 10)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .delay(std::time::Duration::from_secs(3))
                .json_body(serde_json::json!({"content": []}));
        });

        let err = client_for(&server, 1)
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Timeout { seconds: 1 });
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let mut config = TomlConfig::default();
        config.service.endpoint = "http://127.0.0.1:1/v1/messages".to_string();
        config.service.timeout_seconds = 5;
        let client = AnthropicClient::new(&config).unwrap();

        let err = client
            .create_message(&ApiKey::new("k"), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
