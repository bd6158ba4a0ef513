use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Key-based authentication (`api-key` header).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Identity-based authentication (`Authorization: Bearer`).
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_deployment")]
    pub deployment: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

// Manual Debug impl to avoid leaking credentials
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// How requests to the chat-completion service are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    Bearer(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Credential::Bearer(_) => f.write_str("Bearer([REDACTED])"),
        }
    }
}

fn default_deployment() -> String {
    "gpt-4".to_string()
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("social-agent").required(false));
        }

        // Environment variable overrides, e.g. SOCIAL_AGENT__LLM__ENDPOINT
        builder = builder.add_source(
            config::Environment::with_prefix("SOCIAL_AGENT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Reject configurations that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.llm.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(AppError::Config(format!(
                "llm.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }

        if self.llm.deployment.trim().is_empty() {
            return Err(AppError::Config("llm.deployment must not be empty".to_string()));
        }

        self.llm.credential().map(|_| ())
    }
}

impl LlmConfig {
    pub fn credential(&self) -> Result<Credential> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty());
        let token = self.bearer_token.as_deref().filter(|t| !t.trim().is_empty());

        match (api_key, token) {
            (Some(key), None) => Ok(Credential::ApiKey(key.to_string())),
            (None, Some(token)) => Ok(Credential::Bearer(token.to_string())),
            (Some(_), Some(_)) => Err(AppError::Config(
                "configure either llm.api_key or llm.bearer_token, not both".to_string(),
            )),
            (None, None) => Err(AppError::Config(
                "llm.api_key or llm.bearer_token is required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config(endpoint: &str) -> AppConfig {
    AppConfig {
        llm: LlmConfig {
            endpoint: endpoint.to_string(),
            api_key: Some("test-key".to_string()),
            bearer_token: None,
            deployment: default_deployment(),
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        },
        workflow: WorkflowConfig::default(),
        logging: LoggingConfig::default(),
    }
}
