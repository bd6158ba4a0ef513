use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{ApprovalStatus, StageResult};

/// Parameters of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub topic: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_target_audience")]
    pub target_audience: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_goals")]
    pub goals: String,
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_brand_guidelines")]
    pub brand_guidelines: String,
    #[serde(default = "default_compliance_requirements")]
    pub compliance_requirements: String,
    #[serde(default = "default_call_to_action")]
    pub call_to_action: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl WorkflowRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            platform: default_platform(),
            target_audience: default_target_audience(),
            content_type: default_content_type(),
            tone: default_tone(),
            goals: default_goals(),
            budget: default_budget(),
            brand_guidelines: default_brand_guidelines(),
            compliance_requirements: default_compliance_requirements(),
            call_to_action: default_call_to_action(),
            industry: None,
            max_retries: default_max_retries(),
        }
    }
}

pub fn default_platform() -> String {
    "Instagram".to_string()
}

pub fn default_target_audience() -> String {
    "general audience".to_string()
}

pub fn default_content_type() -> String {
    "general post".to_string()
}

pub fn default_tone() -> String {
    "engaging and professional".to_string()
}

pub fn default_goals() -> String {
    "increase engagement".to_string()
}

pub fn default_budget() -> String {
    "organic only".to_string()
}

pub fn default_brand_guidelines() -> String {
    "maintain professional and authentic tone".to_string()
}

pub fn default_compliance_requirements() -> String {
    "standard social media policies".to_string()
}

pub fn default_call_to_action() -> String {
    "engage with the content".to_string()
}

fn default_max_retries() -> u32 {
    2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Completed,
    Error,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Completed => f.write_str("completed"),
            WorkflowStatus::Error => f.write_str("error"),
        }
    }
}

/// Approval status reported for the whole run; `Failed` when no review result
/// was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalApprovalStatus {
    Pending,
    Approved,
    ConditionalApproval,
    Rejected,
    Failed,
}

impl From<ApprovalStatus> for FinalApprovalStatus {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => FinalApprovalStatus::Pending,
            ApprovalStatus::Approved => FinalApprovalStatus::Approved,
            ApprovalStatus::ConditionalApproval => FinalApprovalStatus::ConditionalApproval,
            ApprovalStatus::Rejected => FinalApprovalStatus::Rejected,
        }
    }
}

impl fmt::Display for FinalApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinalApprovalStatus::Pending => "pending",
            FinalApprovalStatus::Approved => "approved",
            FinalApprovalStatus::ConditionalApproval => "conditional_approval",
            FinalApprovalStatus::Rejected => "rejected",
            FinalApprovalStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Terminal artifact of a workflow run, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowResult {
    Completed(CompletedWorkflow),
    Error(FailedWorkflow),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkflow {
    pub workflow_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub input_parameters: WorkflowRequest,
    pub research_phase: StageResult,
    pub content_creation_phase: StageResult,
    pub optimization_phase: StageResult,
    pub review_phase: Option<StageResult>,
    pub final_approval_status: FinalApprovalStatus,
    pub retries_used: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedWorkflow {
    pub workflow_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub error_message: String,
    pub error_data: StageResult,
}

impl WorkflowResult {
    pub fn status(&self) -> WorkflowStatus {
        match self {
            WorkflowResult::Completed(_) => WorkflowStatus::Completed,
            WorkflowResult::Error(_) => WorkflowStatus::Error,
        }
    }

    pub fn workflow_id(&self) -> &str {
        match self {
            WorkflowResult::Completed(run) => &run.workflow_id,
            WorkflowResult::Error(run) => &run.workflow_id,
        }
    }

    pub fn as_completed(&self) -> Option<&CompletedWorkflow> {
        match self {
            WorkflowResult::Completed(run) => Some(run),
            WorkflowResult::Error(_) => None,
        }
    }

    pub fn as_failed(&self) -> Option<&FailedWorkflow> {
        match self {
            WorkflowResult::Completed(_) => None,
            WorkflowResult::Error(run) => Some(run),
        }
    }
}
