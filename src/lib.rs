pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod output;
pub mod shutdown;
pub mod workflow;
