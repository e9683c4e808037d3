use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, FinishReason as OpenAiFinishReason,
    },
    Client,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::config::LlmConfig;
use crate::types::{AgentError, AgentResult, LLMMessage};

#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    async fn create(&self, messages: Vec<LLMMessage>) -> AgentResult<CreateResult>;
}

impl std::fmt::Debug for dyn ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient").finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinishReason {
    #[serde(rename = "stop")]
    Stop,
    #[serde(rename = "length")]
    Length,
    #[serde(rename = "tool_calls")]
    ToolCalls,
    #[serde(rename = "content_filter")]
    ContentFilter,
    #[serde(rename = "unknown")]
    Unknown,
}

impl From<Option<OpenAiFinishReason>> for FinishReason {
    fn from(reason: Option<OpenAiFinishReason>) -> Self {
        match reason {
            Some(OpenAiFinishReason::Stop) => FinishReason::Stop,
            Some(OpenAiFinishReason::Length) => FinishReason::Length,
            Some(OpenAiFinishReason::ToolCalls) | Some(OpenAiFinishReason::FunctionCall) => {
                FinishReason::ToolCalls
            }
            Some(OpenAiFinishReason::ContentFilter) => FinishReason::ContentFilter,
            None => FinishReason::Unknown,
        }
    }
}

/// One completion. `content` is absent when the model produced no text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateResult {
    pub content: Option<String>,
    pub finish_reason: FinishReason,
    pub usage: Option<RequestUsage>,
}

/// Chat-completions client for OpenAI and compatible servers.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(api_base) = &config.api_base {
            openai_config = openai_config.with_api_base(api_base.clone());
        }

        Self {
            client: Client::with_config(openai_config),
            config,
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn to_request_messages(messages: Vec<LLMMessage>) -> AgentResult<Vec<ChatCompletionRequestMessage>> {
        messages
            .into_iter()
            .map(|msg| {
                let request_msg: ChatCompletionRequestMessage = match msg {
                    LLMMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
                        .content(content)
                        .build()?
                        .into(),
                    LLMMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
                        .content(content)
                        .build()?
                        .into(),
                    LLMMessage::Assistant(content) => ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content)
                        .build()?
                        .into(),
                };
                Ok(request_msg)
            })
            .collect()
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiClient {
    async fn create(&self, messages: Vec<LLMMessage>) -> AgentResult<CreateResult> {
        if messages.is_empty() {
            return Err(AgentError::InvalidRequest("Messages cannot be empty".to_string()));
        }

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.config.model.clone())
            .messages(Self::to_request_messages(messages)?);
        if let Some(temperature) = self.config.temperature {
            args.temperature(temperature);
        }
        let request = args.build()?;

        debug!(model = %self.config.model, messages = request.messages.len(), "sending chat completion");
        let response = self.client.chat().create(request).await?;

        let usage = response.usage.map(|u| RequestUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        });
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(AgentError::EmptyResponse)?;

        Ok(CreateResult {
            content: choice.message.content,
            finish_reason: choice.finish_reason.into(),
            usage,
        })
    }
}
