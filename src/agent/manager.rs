use std::sync::Arc;

use crate::agent::prompt::{optimization_task, OptimizationBrief, MANAGER_ROLE};
use crate::agent::{StageAgent, StageInput, StageResult};
use crate::llm::LlmClient;

/// Platform optimization and posting strategy.
pub struct Manager {
    client: Arc<dyn LlmClient>,
}

impl Manager {
    pub const NAME: &'static str = "Manager";

    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn brief<'a>(input: &'a StageInput) -> OptimizationBrief<'a> {
        OptimizationBrief {
            created_content: input.get_or("created_content", ""),
            platform: input.get_or("platform", "Instagram"),
            budget: input.get_or("budget", "organic only"),
            goals: input.get_or("goals", "increase engagement"),
            brand_guidelines: input.get_or(
                "brand_guidelines",
                "maintain professional and authentic tone",
            ),
            topic: input.get_or("topic", ""),
        }
    }
}

impl StageAgent for Manager {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn role_prompt(&self) -> &'static str {
        MANAGER_ROLE
    }

    fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    fn task_prompt(&self, input: &StageInput) -> String {
        optimization_task(&Self::brief(input))
    }

    fn complete(&self, input: &StageInput, response: String) -> StageResult {
        let brief = Self::brief(input);

        StageResult::completed(Self::NAME)
            .with("optimization_strategy", response)
            .with("platform", brief.platform)
            .with("goals", brief.goals)
            .with("budget", brief.budget)
            .with("brand_guidelines", brief.brand_guidelines)
            .with("topic", brief.topic)
    }
}
