pub mod agents;
pub mod cli;
pub mod llm;
pub mod runner;
pub mod team;
pub mod types;

pub use llm::LlmConfig;
pub use runner::{AgentBackend, OpenAiBackend, PromptRunner, FALLBACK_REPLY};
