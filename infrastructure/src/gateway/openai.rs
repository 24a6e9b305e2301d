//! OpenAI-compatible chat-completions gateway
//!
//! Implements the [`LlmGateway`] port against any endpoint speaking the
//! chat-completions wire format. Retry policy lives here, not in the
//! orchestrator: transient transport failures and empty completions are
//! retried up to `max_attempts` times; after that an empty string is
//! returned and the turn simply yields no fields.

use async_trait::async_trait;
use plenum_application::{ChatMessage, GatewayError, LlmGateway};
use serde_json::{Value, json};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// Gateway speaking the OpenAI chat-completions protocol.
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    max_attempts: u32,
}

impl OpenAiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            max_tokens: 2000,
            max_attempts: 3,
        }
    }

    /// Point the gateway at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: &[ChatMessage]) -> Value {
        let messages: Vec<Value> = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": messages,
        })
    }

    fn content_of(response: &Value) -> &str {
        response["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.request_body(messages);
        let mut last_error: Option<GatewayError> = None;

        for attempt in 1..=self.max_attempts {
            let response = match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(attempt, error = %e, "completion request failed");
                    last_error = Some(GatewayError::ConnectionError(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!(attempt, %status, "completion request rejected");
                last_error = Some(GatewayError::RequestFailed(format!(
                    "status {status}"
                )));
                continue;
            }

            let payload: Value = match response.json().await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(attempt, error = %e, "malformed completion payload");
                    last_error = Some(GatewayError::RequestFailed(e.to_string()));
                    continue;
                }
            };

            if let Some(usage) = payload.get("usage") {
                debug!(
                    prompt_tokens = usage["prompt_tokens"].as_u64().unwrap_or(0),
                    completion_tokens = usage["completion_tokens"].as_u64().unwrap_or(0),
                    model = %self.model,
                    "completion usage"
                );
            }

            let content = Self::content_of(&payload);
            if content.trim().is_empty() {
                debug!(attempt, "empty completion, retrying");
                continue;
            }

            return Ok(content.to_string());
        }

        match last_error {
            // Every attempt failed in transport; surface the last error.
            Some(error) => Err(error),
            // Attempts succeeded but produced nothing usable. The core
            // treats an empty result as "this turn yields no fields".
            None => {
                warn!(attempts = self.max_attempts, "no usable completion");
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plenum_application::ChatRole;

    #[test]
    fn test_request_body_shape() {
        let gateway = OpenAiGateway::new("sk-test")
            .with_model("local-model")
            .with_temperature(0.5)
            .with_max_tokens(512);

        let body = gateway.request_body(&[
            ChatMessage::system("Be terse."),
            ChatMessage::user("Say hi."),
        ]);

        assert_eq!(body["model"], "local-model");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be terse.");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_content_extraction() {
        let payload = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hello." } }]
        });
        assert_eq!(OpenAiGateway::content_of(&payload), "Hello.");

        let empty = serde_json::json!({ "choices": [] });
        assert_eq!(OpenAiGateway::content_of(&empty), "");
    }

    #[test]
    fn test_roles_serialize() {
        assert_eq!(ChatRole::System.as_str(), "system");
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_max_attempts_floor() {
        let gateway = OpenAiGateway::new("sk-test").with_max_attempts(0);
        assert_eq!(gateway.max_attempts, 1);
    }
}
