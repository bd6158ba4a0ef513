pub mod orchestrator;
pub mod types;

pub use orchestrator::Workflow;
pub use types::{
    CompletedWorkflow, FailedWorkflow, FinalApprovalStatus, WorkflowRequest, WorkflowResult,
    WorkflowStatus,
};
