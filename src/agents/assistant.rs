use async_trait::async_trait;
use tracing::debug;

use crate::agents::agent::{ConversableAgent, Conversations};
use crate::llm::{ChatCompletionClient, LlmConfig, OpenAiClient};
use crate::types::{chat_history_to_llm_messages, AgentResult, ChatMessage, LLMMessage};

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful AI assistant. \
Solve the task you are given using your own knowledge and reasoning. \
Answer clearly and completely in a single reply.";

/// LLM-backed agent that answers whatever its peer sends.
pub struct AssistantAgent {
    name: String,
    system_message: String,
    client: Box<dyn ChatCompletionClient>,
    conversations: Conversations,
}

impl AssistantAgent {
    pub fn new(name: impl Into<String>, llm_config: LlmConfig) -> Self {
        Self::with_client(name, Box::new(OpenAiClient::new(llm_config)))
    }

    pub fn with_client(name: impl Into<String>, client: Box<dyn ChatCompletionClient>) -> Self {
        Self {
            name: name.into(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            client,
            conversations: Conversations::default(),
        }
    }

    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = system_message.into();
        self
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }
}

#[async_trait]
impl ConversableAgent for AssistantAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    fn conversations_mut(&mut self) -> &mut Conversations {
        &mut self.conversations
    }

    async fn generate_reply(&mut self, peer: &str) -> AgentResult<Option<ChatMessage>> {
        if self.peer_wants_to_stop(peer) {
            debug!(agent = %self.name, peer, "peer asked to terminate");
            return Ok(None);
        }

        let mut messages = vec![LLMMessage::System(self.system_message.clone())];
        messages.extend(chat_history_to_llm_messages(self.conversations.with(peer)));

        let result = self.client.create(messages).await?;
        debug!(agent = %self.name, finish_reason = ?result.finish_reason, "model replied");

        Ok(Some(ChatMessage::new(self.name.clone(), result.content)))
    }
}
