use std::fmt::Write;
use std::path::Path;

use colored::{ColoredString, Colorize};
use tabled::{Table, Tabled};

use crate::agent::StageResult;
use crate::error::Result;
use crate::workflow::{FinalApprovalStatus, WorkflowResult};

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "Phase")]
    phase: &'static str,
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Output Summary")]
    summary: String,
}

impl PhaseRow {
    fn new(phase: &'static str, stage: &StageResult, summary: String) -> Self {
        Self {
            phase,
            agent: stage.agent.clone(),
            status: stage.status.to_string(),
            summary,
        }
    }
}

fn status_banner(status: FinalApprovalStatus) -> ColoredString {
    let label = status.to_string().to_uppercase();
    match status {
        FinalApprovalStatus::Approved => label.green().bold(),
        FinalApprovalStatus::ConditionalApproval => label.yellow().bold(),
        _ => label.red().bold(),
    }
}

/// Human-readable summary of a run for the terminal.
pub fn render(result: &WorkflowResult) -> String {
    let mut out = String::new();

    let run = match result {
        WorkflowResult::Error(failure) => {
            let headline = format!("Workflow failed: {}", failure.error_message);
            let _ = writeln!(out, "{}", headline.red());
            if let Some(error) = &failure.error_data.error {
                let _ = writeln!(out, "  {}: {error}", failure.error_data.agent);
            }
            return out;
        }
        WorkflowResult::Completed(run) => run,
    };

    let _ = writeln!(out, "{} ({})", "Workflow Results".bold(), run.workflow_id);
    let _ = writeln!(out, "Status: {}", status_banner(run.final_approval_status));
    let _ = writeln!(out, "Retries used: {}", run.retries_used);
    let _ = writeln!(out);

    let mut rows = vec![
        PhaseRow::new(
            "Research",
            &run.research_phase,
            "Trends and insights analyzed".to_string(),
        ),
        PhaseRow::new(
            "Content Creation",
            &run.content_creation_phase,
            "Social media content created".to_string(),
        ),
        PhaseRow::new(
            "Optimization",
            &run.optimization_phase,
            "Strategy and optimization provided".to_string(),
        ),
    ];
    if let Some(review) = &run.review_phase {
        let approval = review
            .approval_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        rows.push(PhaseRow::new(
            "Review",
            review,
            format!("Review completed - {approval}"),
        ));
    }

    let _ = writeln!(out, "{}", Table::new(rows));

    if matches!(
        run.final_approval_status,
        FinalApprovalStatus::Approved | FinalApprovalStatus::ConditionalApproval
    ) {
        if let Some(content) = run.content_creation_phase.field("created_content") {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "Final Content".bold());
            let _ = writeln!(out, "{content}");
        }
    }

    out
}

/// Write the result as pretty-printed JSON.
pub async fn save(result: &WorkflowResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), "Saved workflow result");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ApprovalStatus;
    use crate::workflow::{CompletedWorkflow, FailedWorkflow, WorkflowRequest};
    use chrono::Utc;
    use colored::Color;

    fn completed(status: FinalApprovalStatus, approval: ApprovalStatus) -> WorkflowResult {
        let now = Utc::now();
        WorkflowResult::Completed(CompletedWorkflow {
            workflow_id: "workflow_test".to_string(),
            started_at: now,
            completed_at: now,
            input_parameters: WorkflowRequest::new("coffee"),
            research_phase: StageResult::completed("Researcher").with("research_insights", "r"),
            content_creation_phase: StageResult::completed("Copywriter")
                .with("created_content", "Wake up and smell the coffee"),
            optimization_phase: StageResult::completed("Manager").with("optimization_strategy", "o"),
            review_phase: Some(
                StageResult::completed("Reviewer")
                    .with("review_feedback", "f")
                    .with_approval(approval),
            ),
            final_approval_status: status,
            retries_used: 1,
        })
    }

    #[test]
    fn test_render_approved_shows_content() {
        let text = render(&completed(FinalApprovalStatus::Approved, ApprovalStatus::Approved));

        assert!(text.contains("APPROVED"));
        assert!(text.contains("Retries used: 1"));
        assert!(text.contains("Review completed - approved"));
        assert!(text.contains("Copywriter"));
        assert!(text.contains("Wake up and smell the coffee"));
    }

    #[test]
    fn test_render_rejected_hides_content() {
        let text = render(&completed(FinalApprovalStatus::Rejected, ApprovalStatus::Rejected));

        assert!(text.contains("REJECTED"));
        assert!(!text.contains("Final Content"));
    }

    #[test]
    fn test_render_phase_table() {
        let text = render(&completed(
            FinalApprovalStatus::ConditionalApproval,
            ApprovalStatus::ConditionalApproval,
        ));

        assert!(text.contains("Output Summary"));
        for phase in ["Research", "Content Creation", "Optimization", "Review"] {
            assert!(text.contains(phase), "missing phase row {phase}");
        }
        assert!(text.contains("Trends and insights analyzed"));
        assert!(text.contains("Review completed - conditional_approval"));
        assert!(text.contains("Wake up and smell the coffee"));
    }

    #[test]
    fn test_status_banner_colours() {
        assert_eq!(
            status_banner(FinalApprovalStatus::Approved).fgcolor(),
            Some(Color::Green)
        );
        assert_eq!(
            status_banner(FinalApprovalStatus::ConditionalApproval).fgcolor(),
            Some(Color::Yellow)
        );
        for status in [
            FinalApprovalStatus::Rejected,
            FinalApprovalStatus::Pending,
            FinalApprovalStatus::Failed,
        ] {
            assert_eq!(status_banner(status).fgcolor(), Some(Color::Red));
        }
    }

    #[test]
    fn test_render_error() {
        let now = Utc::now();
        let result = WorkflowResult::Error(FailedWorkflow {
            workflow_id: "workflow_test".to_string(),
            started_at: now,
            completed_at: now,
            error_message: "Review phase failed".to_string(),
            error_data: StageResult::failed("Reviewer", "quota exceeded"),
        });

        let text = render(&result);
        assert!(text.contains("Workflow failed: Review phase failed"));
        assert!(text.contains("Reviewer: quota exceeded"));
    }

    #[tokio::test]
    async fn test_save_writes_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let result = completed(FinalApprovalStatus::Approved, ApprovalStatus::Approved);

        save(&result, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: WorkflowResult = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, result);
    }
}
