use std::collections::HashMap;

use async_trait::async_trait;

use crate::types::{AgentResult, ChatMessage, MessageRole};

pub const TERMINATION_KEYWORD: &str = "TERMINATE";

/// Per-peer message histories of one agent.
#[derive(Debug, Clone, Default)]
pub struct Conversations {
    by_peer: HashMap<String, Vec<ChatMessage>>,
}

impl Conversations {
    pub fn push(&mut self, peer: &str, message: ChatMessage) {
        self.by_peer.entry(peer.to_string()).or_default().push(message);
    }

    pub fn with(&self, peer: &str) -> &[ChatMessage] {
        self.by_peer.get(peer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Last message exchanged with `peer`. Without a peer, only answers when
    /// there has been exactly one conversation.
    pub fn last(&self, peer: Option<&str>) -> Option<&ChatMessage> {
        match peer {
            Some(peer) => self.with(peer).last(),
            None if self.by_peer.len() == 1 => self.by_peer.values().next()?.last(),
            None => None,
        }
    }

    pub fn last_received(&self, peer: &str) -> Option<&ChatMessage> {
        self.with(peer).iter().rev().find(|m| m.role == MessageRole::User)
    }

    pub fn clear(&mut self) {
        self.by_peer.clear();
    }
}

#[async_trait]
pub trait ConversableAgent: Send + Sync {
    fn name(&self) -> &str;

    fn conversations(&self) -> &Conversations;

    fn conversations_mut(&mut self) -> &mut Conversations;

    /// Next message for `peer`, or `None` when this agent has nothing more to say.
    async fn generate_reply(&mut self, peer: &str) -> AgentResult<Option<ChatMessage>>;

    fn receive(&mut self, sender: &str, message: ChatMessage) {
        self.conversations_mut()
            .push(sender, message.with_role(MessageRole::User));
    }

    fn record_sent(&mut self, recipient: &str, message: ChatMessage) {
        self.conversations_mut()
            .push(recipient, message.with_role(MessageRole::Assistant));
    }

    fn chat_messages(&self, peer: &str) -> &[ChatMessage] {
        self.conversations().with(peer)
    }

    fn last_message(&self, peer: Option<&str>) -> Option<&ChatMessage> {
        self.conversations().last(peer)
    }

    fn is_termination_msg(&self, message: &ChatMessage) -> bool {
        message.text().trim() == TERMINATION_KEYWORD
    }

    /// True when `peer` answered this agent with a termination message. The
    /// message that opened the conversation never counts.
    fn peer_wants_to_stop(&self, peer: &str) -> bool {
        let history = self.conversations().with(peer);
        let answered = history.iter().any(|m| m.role == MessageRole::Assistant);
        answered
            && self
                .conversations()
                .last_received(peer)
                .map_or(false, |m| self.is_termination_msg(m))
    }

    fn reset(&mut self) {
        self.conversations_mut().clear();
    }
}
