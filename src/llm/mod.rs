pub mod client;
pub mod config;

pub use client::{ChatCompletionClient, CreateResult, FinishReason, OpenAiClient, RequestUsage};
pub use config::LlmConfig;
