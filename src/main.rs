use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use social_agent::config::{AppConfig, Credential, LogFormat};
use social_agent::output;
use social_agent::shutdown::{run_until, wait_for_shutdown};
use social_agent::workflow::{Workflow, WorkflowRequest, WorkflowStatus};

#[derive(Parser)]
#[command(name = "social-agent", about = "AI-powered social media content workflow", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level filter (overrides the configured level; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the research, writing, optimization and review pipeline
    Create(CreateArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
struct CreateArgs {
    /// Main topic for content creation
    #[arg(long)]
    topic: String,

    /// Target social media platform
    #[arg(long, default_value = "Instagram")]
    platform: String,

    /// Target audience description
    #[arg(long, default_value = "general audience")]
    audience: String,

    /// Type of content to create
    #[arg(long, default_value = "general post")]
    content_type: String,

    /// Desired tone for the content
    #[arg(long, default_value = "engaging and professional")]
    tone: String,

    /// Marketing objectives
    #[arg(long, default_value = "increase engagement")]
    goals: String,

    /// Available budget for promotion
    #[arg(long, default_value = "organic only")]
    budget: String,

    /// Brand voice and guidelines
    #[arg(long, default_value = "maintain professional and authentic tone")]
    brand_guidelines: String,

    /// Compliance requirements
    #[arg(long, default_value = "standard social media policies")]
    compliance: String,

    /// Call to action
    #[arg(long, default_value = "engage with the content")]
    cta: String,

    /// Industry context
    #[arg(long)]
    industry: Option<String>,

    /// Review retries for conditional approvals (defaults to workflow.max_retries)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Save the full result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let format = cli.log_format.map(LogFormat::from).unwrap_or(config.logging.format);
    init_tracing(level, format);

    match cli.command {
        Command::Create(args) => create(&config, args).await,
        Command::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (json, text) = match format {
        LogFormat::Json => (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

fn build_request(config: &AppConfig, args: &CreateArgs) -> WorkflowRequest {
    WorkflowRequest {
        topic: args.topic.clone(),
        platform: args.platform.clone(),
        target_audience: args.audience.clone(),
        content_type: args.content_type.clone(),
        tone: args.tone.clone(),
        goals: args.goals.clone(),
        budget: args.budget.clone(),
        brand_guidelines: args.brand_guidelines.clone(),
        compliance_requirements: args.compliance.clone(),
        call_to_action: args.cta.clone(),
        industry: args.industry.clone(),
        max_retries: args.max_retries.unwrap_or(config.workflow.max_retries),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn create(config: &AppConfig, args: CreateArgs) -> anyhow::Result<()> {
    let request = build_request(config, &args);

    println!(
        "Social Agent Workflow\nTopic: {}\nPlatform: {}\nAudience: {}\n",
        request.topic, request.platform, request.target_audience
    );

    let workflow = Workflow::new(config)?;
    let timeout = Duration::from_secs(config.workflow.timeout_secs);

    let progress = spinner("Running AI workflow...");
    let outcome = run_until(workflow.run_workflow(&request), timeout, wait_for_shutdown()).await;
    progress.finish_and_clear();

    let Some(result) = outcome? else {
        anyhow::bail!("Workflow cancelled");
    };

    print!("{}", output::render(&result));

    if let Some(path) = &args.output {
        output::save(&result, path).await?;
        println!("Results saved to {}", path.display());
    }

    if result.status() == WorkflowStatus::Error {
        tracing::warn!(workflow_id = %result.workflow_id(), "Workflow finished with errors");
    }

    Ok(())
}

fn print_config(config: &AppConfig) {
    let llm = &config.llm;
    let auth = match llm.credential() {
        Ok(Credential::ApiKey(_)) => "API key",
        Ok(Credential::Bearer(_)) => "Bearer token (identity)",
        Err(_) => "not configured",
    };

    println!("Current Configuration\n");
    println!("Endpoint: {}", llm.endpoint);
    println!("Deployment: {}", llm.deployment);
    println!("API version: {}", llm.api_version);
    println!("Authentication: {auth}");
    println!("Log level: {}", config.logging.level);
    println!("Workflow timeout: {}s", config.workflow.timeout_secs);
    println!("Max review retries: {}", config.workflow.max_retries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn config_with_retries(max_retries: u32) -> AppConfig {
        serde_json::from_value(serde_json::json!({
            "llm": { "endpoint": "https://example.openai.azure.com", "api_key": "k" },
            "workflow": { "max_retries": max_retries },
        }))
        .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_config_flag_with_config_command() {
        let cli = Cli::try_parse_from(["social-agent", "--config", "x.toml", "config"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn test_create_defaults() {
        let cli = Cli::try_parse_from(["social-agent", "create", "--topic", "x"]).unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create command");
        };

        let request = build_request(&config_with_retries(4), &args);

        assert_eq!(request.topic, "x");
        assert_eq!(request.platform, "Instagram");
        assert_eq!(request.target_audience, "general audience");
        assert_eq!(request.content_type, "general post");
        assert_eq!(request.tone, "engaging and professional");
        assert_eq!(request.goals, "increase engagement");
        assert_eq!(request.budget, "organic only");
        assert_eq!(request.brand_guidelines, "maintain professional and authentic tone");
        assert_eq!(request.compliance_requirements, "standard social media policies");
        assert_eq!(request.call_to_action, "engage with the content");
        assert_eq!(request.industry, None);
        assert_eq!(request.max_retries, 4);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_create_max_retries_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "social-agent",
            "create",
            "--topic",
            "x",
            "--max-retries",
            "0",
            "--platform",
            "LinkedIn",
        ])
        .unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create command");
        };

        let request = build_request(&config_with_retries(4), &args);
        assert_eq!(request.max_retries, 0);
        assert_eq!(request.platform, "LinkedIn");
    }

    #[test]
    fn test_create_requires_topic() {
        assert!(Cli::try_parse_from(["social-agent", "create"]).is_err());
    }
}
