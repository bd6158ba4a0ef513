pub mod copywriter;
pub mod manager;
pub mod prompt;
pub mod researcher;
pub mod result;
pub mod reviewer;

use async_trait::async_trait;

use crate::llm::LlmClient;

pub use copywriter::Copywriter;
pub use manager::Manager;
pub use researcher::Researcher;
pub use result::{ApprovalStatus, StageInput, StageResult, StageStatus};
pub use reviewer::Reviewer;

/// One pipeline stage backed by the chat-completion service.
///
/// Implementors supply the role prompt, the task prompt built from their input,
/// and the shape of a completed result. [`StageAgent::process`] ties these
/// together and never fails: a failed model call comes back as a
/// [`StageResult`] with `status: error`.
#[async_trait]
pub trait StageAgent: Send + Sync {
    fn name(&self) -> &'static str;

    fn role_prompt(&self) -> &'static str;

    fn client(&self) -> &dyn LlmClient;

    fn task_prompt(&self, input: &StageInput) -> String;

    fn complete(&self, input: &StageInput, response: String) -> StageResult;

    async fn process(&self, input: &StageInput) -> StageResult {
        let agent = self.name();
        tracing::info!(agent, "Processing stage");

        let context = match serde_json::to_value(input) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!(agent, error = %e, "Failed to render stage context");
                return StageResult::failed(agent, e);
            }
        };

        let task = self.task_prompt(input);

        match self.client().invoke(self.role_prompt(), &task, Some(&context)).await {
            Ok(response) => {
                let result = self.complete(input, response);
                tracing::info!(agent, "Stage completed");
                result
            }
            Err(e) => {
                tracing::error!(agent, error = %e, "Stage failed");
                StageResult::failed(agent, e)
            }
        }
    }
}
