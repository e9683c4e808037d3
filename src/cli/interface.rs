use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::llm::LlmConfig;
use crate::runner::{AgentBackend, PromptRunner};

pub const DEFAULT_PROMPT: &str = "Summarize this task.";

/// Send one prompt to an assistant agent and print its final reply.
#[derive(Parser, Debug)]
#[command(name = "autogen-worker", version, about)]
pub struct Cli {
    /// Prompt forwarded to the assistant as-is.
    #[arg(allow_hyphen_values = true)]
    pub prompt: Option<String>,
}

impl Cli {
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

/// Logs go to stderr; stdout is reserved for the reply.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn execute<B: AgentBackend>(cli: &Cli, runner: &PromptRunner<B>) -> Result<String> {
    runner.run(cli.prompt()).await.context("prompt run failed")
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = LlmConfig::from_env().context("invalid configuration")?;
    let runner = PromptRunner::new(config);
    let reply = execute(&cli, &runner).await?;
    println!("{}", reply);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::assistant::tests::ScriptedClient;
    use crate::agents::{AssistantAgent, CodeExecutionConfig, ConversableAgent, UserProxyAgent};
    use crate::types::{AgentResult, LLMMessage};

    struct EchoBackend {
        client: ScriptedClient,
    }

    impl AgentBackend for EchoBackend {
        fn assistant(&self, name: &str, _llm_config: &LlmConfig) -> AgentResult<Box<dyn ConversableAgent>> {
            Ok(Box::new(AssistantAgent::with_client(name, Box::new(self.client.clone()))))
        }

        fn user_proxy(&self, name: &str, code_execution: CodeExecutionConfig) -> AgentResult<Box<dyn ConversableAgent>> {
            Ok(Box::new(UserProxyAgent::new(name, code_execution)))
        }
    }

    #[test]
    fn test_no_argument_uses_default_prompt() {
        let cli = Cli::try_parse_from(["autogen-worker"]).unwrap();
        assert_eq!(cli.prompt(), "Summarize this task.");
    }

    #[test]
    fn test_argument_used_verbatim() {
        for prompt in ["Plan a trip to Rome", "  padded  ", "", "line one\nline two"] {
            let cli = Cli::try_parse_from(["autogen-worker", prompt]).unwrap();
            assert_eq!(cli.prompt(), prompt);
        }
    }

    #[test]
    fn test_two_arguments_rejected() {
        assert!(Cli::try_parse_from(["autogen-worker", "one", "two"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_sends_prompt_and_returns_reply() {
        let client = ScriptedClient::new(vec![Some("summary")]);
        let runner = PromptRunner::with_backend(EchoBackend { client: client.clone() }, LlmConfig::default());
        let cli = Cli::try_parse_from(["autogen-worker"]).unwrap();

        assert_eq!(execute(&cli, &runner).await.unwrap(), "summary");
        assert_eq!(
            client.requests.lock().unwrap()[0].last(),
            Some(&LLMMessage::User(DEFAULT_PROMPT.to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_reports_failure() {
        let runner = PromptRunner::with_backend(
            EchoBackend { client: ScriptedClient::new(vec![]) },
            LlmConfig::default(),
        );
        let cli = Cli::try_parse_from(["autogen-worker", "hi"]).unwrap();

        let err = execute(&cli, &runner).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Model returned no choices"));
    }
}
