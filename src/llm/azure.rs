use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Credential, LlmConfig};
use crate::error::{AppError, Result};
use crate::llm::{render_prompt, LlmClient};

/// Chat-completion client for Azure OpenAI style deployments.
pub struct AzureChatClient {
    client: Client,
    url: String,
    credential: Credential,
    max_tokens: u32,
    temperature: f32,
}

impl AzureChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let credential = config.credential()?;
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&config.deployment),
            urlencoding::encode(&config.api_version),
        );

        Ok(Self {
            client: Client::new(),
            url,
            credential,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let builder = self
            .client
            .post(&self.url)
            .header("content-type", "application/json");

        let builder = match &self.credential {
            Credential::ApiKey(key) => builder.header("api-key", key),
            Credential::Bearer(token) => builder.bearer_auth(token),
        };

        let response = builder.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LlmApi(format!("API returned {status}: {body}")));
        }

        let body = response.json::<ChatResponse>().await?;
        Ok(body)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LlmClient for AzureChatClient {
    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        context: Option<&serde_json::Value>,
    ) -> Result<String> {
        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: render_prompt(system_prompt, user_prompt, context),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .send_message(&request)
            .await
            .map_err(|e| AppError::LlmInvocation(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LlmInvocation("response contained no choices".to_string()))?;

        tracing::debug!(
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            prompt_tokens = response.usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens = response.usage.as_ref().map(|u| u.completion_tokens),
            "Chat completion finished"
        );

        choice
            .message
            .content
            .ok_or_else(|| AppError::LlmInvocation("response contained no message content".to_string()))
    }
}

// --- Request types ---

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// --- Response types ---

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}
