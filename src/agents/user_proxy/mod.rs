pub mod code_executor;
pub mod config;

use async_trait::async_trait;
use dialoguer::Input;
use tracing::{debug, info};

use crate::agents::agent::{ConversableAgent, Conversations};
use crate::types::{AgentError, AgentResult, ChatMessage};

pub use code_executor::{extract_code_blocks, CodeBlock, CodeResult, LocalCodeExecutor};
pub use config::{CodeExecutionConfig, HumanInputMode, LocalExecutorConfig, UserProxyConfig};

/// Speaks for the caller. Never calls a model; it either relays human input,
/// runs code the peer wrote, or stays silent.
pub struct UserProxyAgent {
    name: String,
    config: UserProxyConfig,
    executor: Option<LocalCodeExecutor>,
    consecutive_auto_reply: usize,
    conversations: Conversations,
}

impl UserProxyAgent {
    pub fn new(name: impl Into<String>, code_execution: CodeExecutionConfig) -> Self {
        Self::with_config(
            name,
            UserProxyConfig {
                code_execution,
                ..Default::default()
            },
        )
    }

    pub fn with_config(name: impl Into<String>, config: UserProxyConfig) -> Self {
        let executor = match &config.code_execution {
            CodeExecutionConfig::Disabled => None,
            CodeExecutionConfig::Local(local) => Some(LocalCodeExecutor::new(local.clone())),
        };
        Self {
            name: name.into(),
            config,
            executor,
            consecutive_auto_reply: 0,
            conversations: Conversations::default(),
        }
    }

    pub fn config(&self) -> &UserProxyConfig {
        &self.config
    }

    async fn ask_human(&self, peer: &str, last: Option<&ChatMessage>) -> AgentResult<String> {
        let prompt = format!(
            "Reply to {} (press enter to auto-reply, type 'exit' to end){}",
            peer,
            last.map(|m| format!("\n{}: {}\n", m.name, m.text())).unwrap_or_default()
        );
        tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| AgentError::HumanInput(e.to_string()))
        })
        .await
        .map_err(|e| AgentError::HumanInput(e.to_string()))?
    }
}

#[async_trait]
impl ConversableAgent for UserProxyAgent {
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
        let last = self.conversations.last_received(peer).cloned();

        if self.config.human_input_mode == HumanInputMode::Always {
            let input = self.ask_human(peer, last.as_ref()).await?;
            match input.trim() {
                "exit" => return Ok(None),
                "" => {}
                _ => {
                    self.consecutive_auto_reply = 0;
                    return Ok(Some(ChatMessage::new_text(self.name.clone(), input)));
                }
            }
        }

        if self.consecutive_auto_reply >= self.config.max_consecutive_auto_reply {
            info!(agent = %self.name, "auto reply limit reached");
            return Ok(None);
        }

        let Some(executor) = &self.executor else {
            return Ok(None);
        };
        let blocks = extract_code_blocks(last.as_ref().map(ChatMessage::text).unwrap_or_default());
        if blocks.is_empty() {
            return Ok(None);
        }

        info!(agent = %self.name, blocks = blocks.len(), "executing code from {}", peer);
        let result = executor.execute(&blocks).await?;
        self.consecutive_auto_reply += 1;
        Ok(Some(ChatMessage::new_text(self.name.clone(), result.to_reply())))
    }

    fn reset(&mut self) {
        self.conversations.clear();
        self.consecutive_auto_reply = 0;
    }
}
