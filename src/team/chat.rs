use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agents::ConversableAgent;
use crate::types::{AgentResult, ChatMessage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Replies allowed after the opening message; unlimited when unset.
    pub max_turns: Option<usize>,
    pub clear_history: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            max_turns: None,
            clear_history: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    /// History as the initiating agent recorded it.
    pub chat_history: Vec<ChatMessage>,
    /// Replies produced after the opening message.
    pub turns: usize,
}

/// Sends `message` from `sender` to `recipient`, then lets the two take turns
/// until one has no reply or `max_turns` is reached.
pub async fn initiate_chat<'a>(
    sender: &'a mut (dyn ConversableAgent + 'a),
    recipient: &'a mut (dyn ConversableAgent + 'a),
    message: impl Into<String>,
    options: ChatOptions,
) -> AgentResult<ChatResult> {
    if options.clear_history {
        sender.reset();
        recipient.reset();
    }

    let sender_name = sender.name().to_string();
    let recipient_name = recipient.name().to_string();
    info!(sender = %sender_name, recipient = %recipient_name, "chat started");

    let opening = ChatMessage::new_text(sender_name.clone(), message);
    sender.record_sent(&recipient_name, opening.clone());
    recipient.receive(&sender_name, opening);

    let mut speaker = recipient;
    let mut listener = sender;
    let mut turns = 0;

    while options.max_turns.map_or(true, |max| turns < max) {
        let Some(reply) = speaker.generate_reply(listener.name()).await? else {
            break;
        };
        debug!(from = %speaker.name(), to = %listener.name(), content = reply.text(), "message");

        speaker.record_sent(listener.name(), reply.clone());
        listener.receive(speaker.name(), reply);
        turns += 1;

        std::mem::swap(&mut speaker, &mut listener);
    }

    // each turn swaps the pair, so parity tells which side the sender is on
    let sender_ref: &dyn ConversableAgent = if turns % 2 == 0 { listener } else { speaker };
    let chat_history = sender_ref.chat_messages(&recipient_name).to_vec();

    info!(sender = %sender_name, recipient = %recipient_name, turns, "chat finished");
    Ok(ChatResult { chat_history, turns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::assistant::tests::ScriptedClient;
    use crate::agents::user_proxy::LocalExecutorConfig;
    use crate::agents::{AssistantAgent, CodeExecutionConfig, UserProxyAgent};
    use crate::types::MessageRole;

    #[tokio::test]
    async fn test_single_exchange_with_silent_user_proxy() {
        let client = ScriptedClient::new(vec![Some("4")]);
        let mut assistant = AssistantAgent::with_client("assistant", Box::new(client.clone()));
        let mut user = UserProxyAgent::new("user", CodeExecutionConfig::Disabled);

        let result = initiate_chat(&mut user, &mut assistant, "2 + 2?", ChatOptions::default())
            .await
            .unwrap();

        assert_eq!(result.turns, 1);
        assert_eq!(result.chat_history.len(), 2);
        assert_eq!(result.chat_history[0].role, MessageRole::Assistant);
        assert_eq!(result.chat_history[0].text(), "2 + 2?");
        assert_eq!(result.chat_history[1].role, MessageRole::User);
        assert_eq!(result.chat_history[1].text(), "4");
        assert_eq!(assistant.last_message(None).unwrap().text(), "4");
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_code_round_trip_until_terminate() {
        let client = ScriptedClient::new(vec![
            Some("```sh\necho 42\n```"),
            Some("TERMINATE"),
        ]);
        let mut assistant = AssistantAgent::with_client("assistant", Box::new(client.clone()));
        let mut user = UserProxyAgent::new(
            "user",
            CodeExecutionConfig::Local(LocalExecutorConfig::default()),
        );

        let result = initiate_chat(&mut user, &mut assistant, "compute", ChatOptions::default())
            .await
            .unwrap();

        assert_eq!(result.turns, 3);
        assert_eq!(result.chat_history.len(), 4);
        assert_eq!(
            result.chat_history[2].text(),
            "exitcode: 0 (execution succeeded)\nCode output: 42\n"
        );
        assert_eq!(
            assistant.last_message(None).unwrap().text(),
            "TERMINATE"
        );

        // the model saw the execution result as a user message
        let requests = client.requests.lock().unwrap();
        assert_eq!(
            requests[1].last(),
            Some(&crate::types::LLMMessage::User(
                "exitcode: 0 (execution succeeded)\nCode output: 42\n".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_max_turns_stops_chat() {
        let client = ScriptedClient::new(vec![Some("```sh\necho 1\n```"), Some("never sent")]);
        let mut assistant = AssistantAgent::with_client("assistant", Box::new(client.clone()));
        let mut user = UserProxyAgent::new(
            "user",
            CodeExecutionConfig::Local(LocalExecutorConfig::default()),
        );

        let options = ChatOptions {
            max_turns: Some(1),
            ..Default::default()
        };
        let result = initiate_chat(&mut user, &mut assistant, "go", options).await.unwrap();

        assert_eq!(result.turns, 1);
        assert_eq!(client.requests.lock().unwrap().len(), 1);
        assert!(user.last_message(None).unwrap().text().contains("echo 1"));
    }

    #[tokio::test]
    async fn test_history_cleared_between_chats() {
        let client = ScriptedClient::new(vec![Some("first"), Some("second")]);
        let mut assistant = AssistantAgent::with_client("assistant", Box::new(client.clone()));
        let mut user = UserProxyAgent::new("user", CodeExecutionConfig::Disabled);

        initiate_chat(&mut user, &mut assistant, "one", ChatOptions::default())
            .await
            .unwrap();
        let result = initiate_chat(&mut user, &mut assistant, "two", ChatOptions::default())
            .await
            .unwrap();

        assert_eq!(result.chat_history.len(), 2);
        assert_eq!(assistant.chat_messages("user").len(), 2);
        assert_eq!(client.requests.lock().unwrap()[1].len(), 2);
    }

    #[tokio::test]
    async fn test_error_propagates() {
        let client = ScriptedClient::new(vec![]);
        let mut assistant = AssistantAgent::with_client("assistant", Box::new(client));
        let mut user = UserProxyAgent::new("user", CodeExecutionConfig::Disabled);

        let result = initiate_chat(&mut user, &mut assistant, "hi", ChatOptions::default()).await;
        assert!(result.is_err());
    }
}
