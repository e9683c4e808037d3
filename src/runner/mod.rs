pub mod backend;

use tracing::info;

use crate::agents::CodeExecutionConfig;
use crate::llm::LlmConfig;
use crate::team::{initiate_chat, ChatOptions};
use crate::types::AgentResult;

pub use backend::{AgentBackend, OpenAiBackend};

pub const ASSISTANT_NAME: &str = "assistant";
pub const USER_PROXY_NAME: &str = "user";
pub const FALLBACK_REPLY: &str = "AutoGen completed task.";

/// Runs one prompt through an assistant / user-proxy pair and returns the
/// assistant's last words.
pub struct PromptRunner<B = OpenAiBackend> {
    backend: B,
    llm_config: LlmConfig,
}

impl PromptRunner<OpenAiBackend> {
    pub fn new(llm_config: LlmConfig) -> Self {
        Self::with_backend(OpenAiBackend, llm_config)
    }
}

impl<B: AgentBackend> PromptRunner<B> {
    pub fn with_backend(backend: B, llm_config: LlmConfig) -> Self {
        Self { backend, llm_config }
    }

    pub fn llm_config(&self) -> &LlmConfig {
        &self.llm_config
    }

    /// Errors from the backend, the agents or the model surface unchanged.
    pub async fn run(&self, prompt: &str) -> AgentResult<String> {
        let mut assistant = self.backend.assistant(ASSISTANT_NAME, &self.llm_config)?;
        // never configurable: the proxy must not run model-written code here
        let mut user = self.backend.user_proxy(USER_PROXY_NAME, CodeExecutionConfig::Disabled)?;

        info!(model = %self.llm_config.model, "running prompt");
        initiate_chat(user.as_mut(), assistant.as_mut(), prompt, ChatOptions::default()).await?;

        Ok(assistant
            .last_message(None)
            .and_then(|message| message.content.clone())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
