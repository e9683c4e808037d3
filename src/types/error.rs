use async_openai::error::OpenAIError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
	#[error(transparent)]
	Llm(#[from] OpenAIError),

	#[error("Model returned no choices")]
	EmptyResponse,

	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	#[error("Config error: {0}")]
	Config(String),

	#[error("Code execution error: {0}")]
	CodeExecution(#[from] std::io::Error),

	#[error("Human input error: {0}")]
	HumanInput(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
