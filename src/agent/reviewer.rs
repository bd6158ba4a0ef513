use std::sync::Arc;

use crate::agent::prompt::{review_task, ReviewBrief, REVIEWER_ROLE};
use crate::agent::{ApprovalStatus, StageAgent, StageInput, StageResult};
use crate::llm::LlmClient;

/// Final quality and compliance review. The model's recommendation is
/// classified into an [`ApprovalStatus`] once per call.
pub struct Reviewer {
    client: Arc<dyn LlmClient>,
}

impl Reviewer {
    pub const NAME: &'static str = "Reviewer";

    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn brief<'a>(input: &'a StageInput) -> ReviewBrief<'a> {
        ReviewBrief {
            created_content: input.get_or("created_content", ""),
            optimization_strategy: input.get_or("optimization_strategy", ""),
            brand_guidelines: input.get_or("brand_guidelines", "maintain professional tone"),
            compliance_requirements: input.get_or(
                "compliance_requirements",
                "standard social media policies",
            ),
            target_audience: input.get_or("target_audience", "general audience"),
            platform: input.get_or("platform", "Instagram"),
            topic: input.get_or("topic", ""),
        }
    }
}

impl StageAgent for Reviewer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn role_prompt(&self) -> &'static str {
        REVIEWER_ROLE
    }

    fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    fn task_prompt(&self, input: &StageInput) -> String {
        review_task(&Self::brief(input))
    }

    fn complete(&self, input: &StageInput, response: String) -> StageResult {
        let brief = Self::brief(input);
        let approval = ApprovalStatus::classify(&response);
        tracing::info!(approval_status = %approval, "Review classified");

        StageResult::completed(Self::NAME)
            .with_approval(approval)
            .with("review_feedback", response)
            .with("platform", brief.platform)
            .with("topic", brief.topic)
            .with("brand_guidelines", brief.brand_guidelines)
            .with("compliance_requirements", brief.compliance_requirements)
            .with("target_audience", brief.target_audience)
    }
}
