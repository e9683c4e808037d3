use crate::agents::{AssistantAgent, CodeExecutionConfig, ConversableAgent, UserProxyAgent};
use crate::llm::LlmConfig;
use crate::types::AgentResult;

/// Builds the two parties of a prompt run. Swapped out in tests so no
/// network-backed agent is ever constructed.
pub trait AgentBackend: Send + Sync {
    fn assistant(&self, name: &str, llm_config: &LlmConfig) -> AgentResult<Box<dyn ConversableAgent>>;

    fn user_proxy(&self, name: &str, code_execution: CodeExecutionConfig) -> AgentResult<Box<dyn ConversableAgent>>;
}

/// Assistant on the OpenAI chat-completions API, user proxy that never asks
/// a human.
#[derive(Debug, Clone, Default)]
pub struct OpenAiBackend;

impl AgentBackend for OpenAiBackend {
    fn assistant(&self, name: &str, llm_config: &LlmConfig) -> AgentResult<Box<dyn ConversableAgent>> {
        Ok(Box::new(AssistantAgent::new(name, llm_config.clone())))
    }

    fn user_proxy(&self, name: &str, code_execution: CodeExecutionConfig) -> AgentResult<Box<dyn ConversableAgent>> {
        Ok(Box::new(UserProxyAgent::new(name, code_execution)))
    }
}
