pub mod azure;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;

use crate::error::Result;

pub use azure::AzureChatClient;

/// A chat-completion backend.
///
/// Implementations make exactly one outbound request per call and never retry;
/// any transport, authentication or service failure is returned as
/// [`AppError::LlmInvocation`](crate::error::AppError::LlmInvocation).
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        context: Option<&serde_json::Value>,
    ) -> Result<String>;
}

/// Fold the system prompt, the task prompt and any context into the single
/// message sent to the model.
pub fn render_prompt(
    system_prompt: &str,
    user_prompt: &str,
    context: Option<&serde_json::Value>,
) -> String {
    let mut prompt = format!("{system_prompt}\n\nUser Input: {user_prompt}");

    if let Some(context) = context.filter(|c| !is_empty(c)) {
        prompt.push_str(&format!("\n\nContext: {context}"));
    }

    prompt
}

fn is_empty(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}
