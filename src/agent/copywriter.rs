use std::sync::Arc;

use crate::agent::prompt::{copywriting_task, CopyBrief, COPYWRITER_ROLE};
use crate::agent::{StageAgent, StageInput, StageResult};
use crate::llm::LlmClient;

/// Platform-ready post copy written from the research insights.
pub struct Copywriter {
    client: Arc<dyn LlmClient>,
}

impl Copywriter {
    pub const NAME: &'static str = "Copywriter";

    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn brief<'a>(input: &'a StageInput) -> CopyBrief<'a> {
        CopyBrief {
            research_insights: input.get_or("research_insights", ""),
            content_type: input.get_or("content_type", "general post"),
            platform: input.get_or("platform", "Instagram"),
            tone: input.get_or("tone", "engaging and professional"),
            call_to_action: input.get_or("call_to_action", "engage with the content"),
            topic: input.get_or("topic", ""),
        }
    }
}

impl StageAgent for Copywriter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn role_prompt(&self) -> &'static str {
        COPYWRITER_ROLE
    }

    fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    fn task_prompt(&self, input: &StageInput) -> String {
        copywriting_task(&Self::brief(input))
    }

    fn complete(&self, input: &StageInput, response: String) -> StageResult {
        let brief = Self::brief(input);

        StageResult::completed(Self::NAME)
            .with("created_content", response)
            .with("platform", brief.platform)
            .with("content_type", brief.content_type)
            .with("tone", brief.tone)
            .with("call_to_action", brief.call_to_action)
            .with("topic", brief.topic)
    }
}
