use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::agent::{
    ApprovalStatus, Copywriter, Manager, Researcher, Reviewer, StageAgent, StageInput, StageResult,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::{AzureChatClient, LlmClient};
use crate::workflow::types::{
    CompletedWorkflow, FailedWorkflow, FinalApprovalStatus, WorkflowRequest, WorkflowResult,
};

/// Runs research, content creation, optimization and review in sequence.
///
/// Agents hold no request data, so one instance can serve concurrent runs.
pub struct Workflow {
    researcher: Researcher,
    copywriter: Copywriter,
    manager: Manager,
    reviewer: Reviewer,
}

/// Why a run stopped before producing content.
struct Abort {
    message: &'static str,
    stage: StageResult,
}

impl Workflow {
    /// Build the pipeline against the configured chat-completion deployment.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let client = AzureChatClient::new(&config.llm)?;
        tracing::info!(deployment = %config.llm.deployment, "Workflow initialized with all agents");
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self {
            researcher: Researcher::new(Arc::clone(&client)),
            copywriter: Copywriter::new(Arc::clone(&client)),
            manager: Manager::new(Arc::clone(&client)),
            reviewer: Reviewer::new(client),
        }
    }

    /// Run the full pipeline. Stage failures are reported in the returned
    /// [`WorkflowResult`], never as an error.
    pub async fn run_workflow(&self, request: &WorkflowRequest) -> WorkflowResult {
        let workflow_id = format!("workflow_{}", Uuid::new_v4().simple());
        let started_at = Utc::now();

        tracing::info!(
            workflow_id = %workflow_id,
            topic = %request.topic,
            platform = %request.platform,
            "Starting workflow"
        );

        match self.run_stages(request).await {
            Ok(stages) => {
                let final_approval_status = stages
                    .review
                    .as_ref()
                    .and_then(|r| r.approval_status)
                    .map(FinalApprovalStatus::from)
                    .unwrap_or(FinalApprovalStatus::Failed);

                tracing::info!(
                    workflow_id = %workflow_id,
                    approval_status = %final_approval_status,
                    retries_used = stages.retries,
                    "Workflow completed"
                );

                WorkflowResult::Completed(CompletedWorkflow {
                    workflow_id,
                    started_at,
                    completed_at: Utc::now(),
                    input_parameters: request.clone(),
                    research_phase: stages.research,
                    content_creation_phase: stages.content,
                    optimization_phase: stages.optimization,
                    review_phase: stages.review,
                    final_approval_status,
                    retries_used: stages.retries,
                })
            }
            Err(abort) => {
                tracing::error!(
                    workflow_id = %workflow_id,
                    agent = %abort.stage.agent,
                    error = abort.stage.error.as_deref().unwrap_or_default(),
                    "{}",
                    abort.message
                );
                failed(workflow_id, started_at, abort)
            }
        }
    }

    async fn run_stages(&self, request: &WorkflowRequest) -> std::result::Result<Stages, Abort> {
        tracing::info!("Step 1: Starting research phase");
        let research_input = StageInput::new()
            .with("topic", &request.topic)
            .with("target_audience", &request.target_audience)
            .with("platform", &request.platform)
            .with("industry", request.industry.as_deref().unwrap_or("general"));
        let research = run_stage(&self.researcher, &research_input, "Research phase failed").await?;

        tracing::info!("Step 2: Starting content creation phase");
        let content_input = StageInput::new()
            .with("research_insights", research.field("research_insights").unwrap_or_default())
            .with("content_type", &request.content_type)
            .with("platform", &request.platform)
            .with("tone", &request.tone)
            .with("call_to_action", &request.call_to_action)
            .with("topic", &request.topic)
            .with("target_audience", &request.target_audience);
        let content =
            run_stage(&self.copywriter, &content_input, "Content creation phase failed").await?;

        tracing::info!("Step 3: Starting optimization phase");
        let created_content = content.field("created_content").unwrap_or_default();
        let optimization_input = StageInput::new()
            .with("created_content", created_content)
            .with("platform", &request.platform)
            .with("budget", &request.budget)
            .with("goals", &request.goals)
            .with("brand_guidelines", &request.brand_guidelines)
            .with("topic", &request.topic)
            .with("target_audience", &request.target_audience);
        let optimization =
            run_stage(&self.manager, &optimization_input, "Optimization phase failed").await?;

        // Retries re-send the same review input; content is not regenerated.
        let review_input = StageInput::new()
            .with("created_content", created_content)
            .with(
                "optimization_strategy",
                optimization.field("optimization_strategy").unwrap_or_default(),
            )
            .with("brand_guidelines", &request.brand_guidelines)
            .with("compliance_requirements", &request.compliance_requirements)
            .with("target_audience", &request.target_audience)
            .with("platform", &request.platform)
            .with("topic", &request.topic);
        let (review, retries) = self.review_loop(&review_input, request.max_retries).await?;

        Ok(Stages {
            research,
            content,
            optimization,
            review,
            retries,
        })
    }

    /// Invoke the reviewer until the content is approved, rejected, or the
    /// retry budget is spent. Returns the last review and the retries used.
    async fn review_loop(
        &self,
        input: &StageInput,
        max_retries: u32,
    ) -> std::result::Result<(Option<StageResult>, u32), Abort> {
        let mut retries = 0;

        loop {
            tracing::info!(attempt = retries + 1, "Step 4: Starting review phase");
            let review = run_stage(&self.reviewer, input, "Review phase failed").await?;
            let approval = review.approval_status.unwrap_or(ApprovalStatus::Pending);

            match approval {
                ApprovalStatus::Approved => {
                    tracing::info!("Content approved");
                    return Ok((Some(review), retries));
                }
                ApprovalStatus::Rejected => {
                    tracing::warn!("Content rejected");
                    return Ok((Some(review), retries));
                }
                ApprovalStatus::ConditionalApproval | ApprovalStatus::Pending
                    if retries < max_retries =>
                {
                    retries += 1;
                    tracing::info!(
                        approval_status = %approval,
                        retry = retries,
                        max_retries,
                        "Review not approved, retrying"
                    );
                }
                ApprovalStatus::ConditionalApproval | ApprovalStatus::Pending => {
                    tracing::warn!(approval_status = %approval, max_retries, "Max retries reached");
                    return Ok((Some(review), retries));
                }
            }
        }
    }
}

struct Stages {
    research: StageResult,
    content: StageResult,
    optimization: StageResult,
    review: Option<StageResult>,
    retries: u32,
}

async fn run_stage(
    agent: &dyn StageAgent,
    input: &StageInput,
    failure: &'static str,
) -> std::result::Result<StageResult, Abort> {
    let result = agent.process(input).await;
    if result.is_error() {
        return Err(Abort {
            message: failure,
            stage: result,
        });
    }
    Ok(result)
}

fn failed(workflow_id: String, started_at: DateTime<Utc>, abort: Abort) -> WorkflowResult {
    WorkflowResult::Error(FailedWorkflow {
        workflow_id,
        started_at,
        completed_at: Utc::now(),
        error_message: abort.message.to_string(),
        error_data: abort.stage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::prompt::{COPYWRITER_ROLE, MANAGER_ROLE, RESEARCHER_ROLE, REVIEWER_ROLE};
    use crate::agent::StageStatus;
    use crate::llm::scripted::ScriptedClient;
    use crate::workflow::types::WorkflowStatus;

    const CONDITIONAL: &str = "Final Recommendation: APPROVE WITH MODIFICATIONS";
    const APPROVED: &str = "Final Recommendation: APPROVE";
    const REJECTED: &str = "Final Recommendation: REJECT";

    fn scripted_reviews(reviews: &[&str]) -> ScriptedClient {
        reviews
            .iter()
            .fold(ScriptedClient::new(), |client, text| client.reply(REVIEWER_ROLE, text))
    }

    async fn run(client: &Arc<ScriptedClient>, max_retries: u32) -> WorkflowResult {
        let workflow = Workflow::with_client(client.clone());
        let mut request = WorkflowRequest::new("sustainable technology trends");
        request.max_retries = max_retries;
        workflow.run_workflow(&request).await
    }

    #[tokio::test]
    async fn test_zero_retries_keeps_conditional_approval() {
        let client = Arc::new(scripted_reviews(&[CONDITIONAL, APPROVED]));
        let result = run(&client, 0).await;

        let run = result.as_completed().unwrap();
        assert_eq!(run.retries_used, 0);
        assert_eq!(run.final_approval_status, FinalApprovalStatus::ConditionalApproval);
        assert_eq!(client.calls_for(REVIEWER_ROLE), 1);
    }

    #[tokio::test]
    async fn test_conditional_then_approved() {
        let client = Arc::new(scripted_reviews(&[CONDITIONAL, CONDITIONAL, APPROVED]));
        let result = run(&client, 2).await;

        let run = result.as_completed().unwrap();
        assert_eq!(run.retries_used, 2);
        assert_eq!(run.final_approval_status, FinalApprovalStatus::Approved);
        assert_eq!(client.calls_for(REVIEWER_ROLE), 3);
    }

    #[tokio::test]
    async fn test_conditional_stops_at_retry_bound() {
        let client = Arc::new(scripted_reviews(&[CONDITIONAL, CONDITIONAL, CONDITIONAL, APPROVED]));
        let result = run(&client, 2).await;

        let run = result.as_completed().unwrap();
        assert_eq!(run.retries_used, 2);
        assert_eq!(run.final_approval_status, FinalApprovalStatus::ConditionalApproval);
        assert_eq!(client.calls_for(REVIEWER_ROLE), 3);
    }

    #[tokio::test]
    async fn test_pending_consumes_retries() {
        let client = Arc::new(scripted_reviews(&["Needs more thought.", "Still unsure.", "Hmm."]));
        let result = run(&client, 2).await;

        let run = result.as_completed().unwrap();
        assert_eq!(run.retries_used, 2);
        assert_eq!(run.final_approval_status, FinalApprovalStatus::Pending);
        assert_eq!(client.calls_for(REVIEWER_ROLE), 3);
    }

    #[tokio::test]
    async fn test_retries_resend_identical_review_input() {
        let client = Arc::new(scripted_reviews(&[CONDITIONAL, APPROVED]));
        run(&client, 2).await;

        let reviews: Vec<_> = client
            .recorded()
            .into_iter()
            .filter(|c| c.system_prompt == REVIEWER_ROLE)
            .collect();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_prompt, reviews[1].user_prompt);
        assert_eq!(reviews[0].context, reviews[1].context);
        assert_eq!(client.calls_for(COPYWRITER_ROLE), 1);
        assert_eq!(client.calls_for(MANAGER_ROLE), 1);
    }

    #[tokio::test]
    async fn test_research_failure_short_circuits() {
        let client = Arc::new(ScriptedClient::new().fail(RESEARCHER_ROLE, "service unavailable"));
        let result = run(&client, 2).await;

        assert_eq!(result.status(), WorkflowStatus::Error);
        let failure = result.as_failed().unwrap();
        assert_eq!(failure.error_message, "Research phase failed");
        assert_eq!(failure.error_data.agent, "Researcher");
        assert_eq!(failure.error_data.status, StageStatus::Error);

        assert_eq!(client.calls_for(RESEARCHER_ROLE), 1);
        assert_eq!(client.calls_for(COPYWRITER_ROLE), 0);
        assert_eq!(client.calls_for(MANAGER_ROLE), 0);
        assert_eq!(client.calls_for(REVIEWER_ROLE), 0);
    }

    #[tokio::test]
    async fn test_later_stage_failures_use_phase_messages() {
        let client = Arc::new(ScriptedClient::new().fail(COPYWRITER_ROLE, "boom"));
        let result = run(&client, 2).await;
        assert_eq!(result.as_failed().unwrap().error_message, "Content creation phase failed");
        assert_eq!(client.calls_for(MANAGER_ROLE), 0);

        let client = Arc::new(ScriptedClient::new().fail(MANAGER_ROLE, "boom"));
        let result = run(&client, 2).await;
        assert_eq!(result.as_failed().unwrap().error_message, "Optimization phase failed");
        assert_eq!(client.calls_for(REVIEWER_ROLE), 0);
    }

    #[tokio::test]
    async fn test_review_failure_aborts_despite_retry_budget() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply(REVIEWER_ROLE, CONDITIONAL)
                .fail(REVIEWER_ROLE, "rate limited"),
        );
        let result = run(&client, 5).await;

        assert_eq!(result.as_failed().unwrap().error_message, "Review phase failed");
        assert_eq!(client.calls_for(REVIEWER_ROLE), 2);
    }

    #[tokio::test]
    async fn test_stage_outputs_flow_into_next_stage() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply(RESEARCHER_ROLE, "insight-123")
                .reply(COPYWRITER_ROLE, "draft-456")
                .reply(MANAGER_ROLE, "strategy-789")
                .reply(REVIEWER_ROLE, APPROVED),
        );
        let workflow = Workflow::with_client(client.clone());
        let mut request = WorkflowRequest::new("coffee");
        request.industry = Some("hospitality".to_string());
        let result = workflow.run_workflow(&request).await;

        let calls = client.recorded();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].context.as_ref().unwrap()["industry"], "hospitality");
        assert!(calls[1].user_prompt.contains("Research Insights: insight-123"));
        assert!(calls[2].user_prompt.contains("Created Content: draft-456"));
        assert!(calls[3].user_prompt.contains("Content to Review: draft-456"));
        assert!(calls[3].user_prompt.contains("Optimization Strategy: strategy-789"));

        let run = result.as_completed().unwrap();
        assert_eq!(run.content_creation_phase.field("created_content"), Some("draft-456"));
        assert_eq!(run.input_parameters, request);
    }

    #[tokio::test]
    async fn test_result_json_round_trip() {
        let client = Arc::new(scripted_reviews(&[CONDITIONAL, APPROVED]));
        let result = run(&client, 2).await;

        let json = serde_json::to_string_pretty(&result).unwrap();
        let parsed: WorkflowResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["final_approval_status"], "approved");
        assert_eq!(value["review_phase"]["approval_status"], "approved");
        assert_eq!(value["research_phase"]["research_insights"], "Generated output");
    }

    #[tokio::test]
    async fn test_rejected_run_still_completes() {
        let client = Arc::new(scripted_reviews(&[REJECTED, APPROVED]));
        let workflow = Workflow::with_client(client.clone());
        let mut request = WorkflowRequest::new("sustainable technology trends");
        request.platform = "LinkedIn".to_string();
        request.max_retries = 2;

        let result = workflow.run_workflow(&request).await;

        assert_eq!(result.status(), WorkflowStatus::Completed);
        assert!(result.workflow_id().starts_with("workflow_"));
        let run = result.as_completed().unwrap();
        assert_eq!(run.retries_used, 0);
        assert_eq!(run.final_approval_status, FinalApprovalStatus::Rejected);
        assert_eq!(run.research_phase.field("platform"), Some("LinkedIn"));
        assert_eq!(client.calls_for(REVIEWER_ROLE), 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = crate::config::test_config("https://example.openai.azure.com");
        config.llm.api_key = None;
        assert!(Workflow::new(&config).is_err());

        let config = crate::config::test_config("https://example.openai.azure.com");
        assert!(Workflow::new(&config).is_ok());
    }
}
