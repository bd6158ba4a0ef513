//! In-memory [`LlmClient`] that replays scripted replies per system prompt.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::llm::LlmClient;

#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<HashMap<String, VecDeque<Result<String>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub context: Option<serde_json::Value>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for calls made with `system_prompt`. Unscripted calls
    /// get a generic reply.
    pub fn reply(self, system_prompt: &str, text: &str) -> Self {
        self.push(system_prompt, Ok(text.to_string()));
        self
    }

    pub fn fail(self, system_prompt: &str, message: &str) -> Self {
        self.push(system_prompt, Err(AppError::LlmInvocation(message.to_string())));
        self
    }

    fn push(&self, system_prompt: &str, reply: Result<String>) {
        self.replies
            .lock()
            .unwrap()
            .entry(system_prompt.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls_for(&self, system_prompt: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.system_prompt == system_prompt)
            .count()
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        context: Option<&serde_json::Value>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            context: context.cloned(),
        });

        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(system_prompt)
            .and_then(|queue| queue.pop_front());

        next.unwrap_or_else(|| Ok("Generated output".to_string()))
    }
}
