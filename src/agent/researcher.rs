use std::sync::Arc;

use crate::agent::prompt::{research_task, RESEARCHER_ROLE};
use crate::agent::{StageAgent, StageInput, StageResult};
use crate::llm::LlmClient;

/// Trend analysis for the requested topic.
pub struct Researcher {
    client: Arc<dyn LlmClient>,
}

impl Researcher {
    pub const NAME: &'static str = "Researcher";

    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

impl StageAgent for Researcher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn role_prompt(&self) -> &'static str {
        RESEARCHER_ROLE
    }

    fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    fn task_prompt(&self, input: &StageInput) -> String {
        research_task(
            input.get_or("topic", ""),
            input.get_or("target_audience", "general audience"),
            input.get_or("platform", "multiple platforms"),
            input.get_or("industry", "general"),
        )
    }

    fn complete(&self, input: &StageInput, response: String) -> StageResult {
        StageResult::completed(Self::NAME)
            .with("research_insights", response)
            .with("topic", input.get_or("topic", ""))
            .with("target_audience", input.get_or("target_audience", "general audience"))
            .with("platform", input.get_or("platform", "multiple platforms"))
            .with("industry", input.get_or("industry", "general"))
    }
}
