use tracing::{debug, error};

use super::http_client::HttpClientTrait;
use crate::domain::llm::{ChatCompletionError, ChatCompletionRequest, ChatCompletionResult};

pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.kimi.com/v1/chat/completions";

/// Client for an OpenAI-style chat-completions endpoint
#[derive(Debug)]
pub struct ChatCompletionClient<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    endpoint: String,
}

impl<C: HttpClientTrait> ChatCompletionClient<C> {
    pub fn new(client: C, api_key: impl AsRef<str>) -> Self {
        Self::with_endpoint(client, api_key, DEFAULT_CHAT_COMPLETIONS_URL)
    }

    pub fn with_endpoint(
        client: C,
        api_key: impl AsRef<str>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.as_ref()),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    /// Send one completion request and decode the reply envelope
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResult, ChatCompletionError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ChatCompletionError::transport(format!("Failed to encode request: {}", e)))?;

        debug!(endpoint = %self.endpoint, model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post_json(&self.endpoint, self.headers(), &body)
            .await
            .map_err(|e| ChatCompletionError::transport(e.to_string()))?;

        if !response.is_success() {
            let body = describe_error_body(&response.body);
            error!(status = response.status, body = %body, "Chat completion request failed");
            return Err(ChatCompletionError::http(response.status, body));
        }

        serde_json::from_str(&response.body).map_err(|e| ChatCompletionError::decode(e.to_string()))
    }
}

/// Best-effort rendering of an error body: compact JSON when it parses,
/// otherwise the trimmed text
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
