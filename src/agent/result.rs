use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Named string fields handed to a stage agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageInput(BTreeMap<String, String>);

impl StageInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// The value for `key`, or `default` when the field is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Error,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageStatus::Completed => f.write_str("completed"),
            StageStatus::Error => f.write_str("error"),
        }
    }
}

/// Classified outcome of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    ConditionalApproval,
    Rejected,
}

impl ApprovalStatus {
    /// Classify free-form review text by marker substrings, case-insensitively.
    ///
    /// Markers are checked in a fixed order, so "APPROVE WITH MODIFICATIONS"
    /// wins over a bare "APPROVE", which wins over "REJECT".
    pub fn classify(review: &str) -> Self {
        let review = review.to_uppercase();

        if review.contains("APPROVE WITH MODIFICATIONS") {
            ApprovalStatus::ConditionalApproval
        } else if review.contains("APPROVE") {
            ApprovalStatus::Approved
        } else if review.contains("REJECT") {
            ApprovalStatus::Rejected
        } else {
            ApprovalStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::ConditionalApproval => "conditional_approval",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one stage agent.
///
/// Completed results carry the generated text plus the input fields the agent
/// used; error results carry only `agent`, `status` and `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub agent: String,
    pub status: StageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl StageResult {
    pub fn completed(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            status: StageStatus::Completed,
            approval_status: None,
            error: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn failed(agent: &str, error: impl fmt::Display) -> Self {
        Self {
            agent: agent.to_string(),
            status: StageStatus::Error,
            approval_status: None,
            error: Some(error.to_string()),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_approval(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = Some(status);
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.status == StageStatus::Error
    }
}
