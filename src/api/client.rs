use super::{config, errors::GenerationError, CodeGenerator};
use crate::models::chat::{ConversationTurn, Role};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// API client for a hosted chat-completion gateway.
pub struct GenerationClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl GenerationClient {
    /// Creates a new `GenerationClient`. A missing key is reported on the
    /// first call, not here.
    pub fn new(api_key: Option<String>, base_url: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }

    /// Builds the message list: system prompt first, then the history.
    fn build_messages(history: &[ConversationTurn]) -> Vec<Value> {
        std::iter::once(json!({
            "role": Role::System.as_str(),
            "content": config::CODE_GENERATOR_SYSTEM_PROMPT,
        }))
        .chain(history.iter().map(|turn| {
            json!({
                "role": turn.role.as_str(),
                "content": turn.content,
            })
        }))
        .collect()
    }

    /// Sends a request to the gateway.
    async fn send_request(&self, messages: Vec<Value>) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        log::debug!(
            "Calling {} with {} message(s)",
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "stream": false,
                "max_tokens": self.max_tokens,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("AI gateway error: {} {}", status, error_text);
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => GenerationError::PaymentRequired,
                _ => GenerationError::GatewayError {
                    status: status.as_u16(),
                    body: error_text,
                },
            });
        }

        let raw_response = response.text().await?;
        let json_response: Value = serde_json::from_str(&raw_response)?;

        let content = json_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(GenerationError::InvalidResponse)?
            .to_string();

        log::info!("Gateway response received ({} bytes)", content.len());
        Ok(content)
    }
}

#[async_trait]
impl CodeGenerator for GenerationClient {
    async fn generate(&self, history: &[ConversationTurn]) -> Result<String, GenerationError> {
        self.send_request(Self::build_messages(history)).await
    }
}
