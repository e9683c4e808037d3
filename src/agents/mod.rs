pub mod agent;
pub mod assistant;
pub mod user_proxy;

pub use agent::{ConversableAgent, Conversations, TERMINATION_KEYWORD};
pub use assistant::AssistantAgent;
pub use user_proxy::{CodeExecutionConfig, HumanInputMode, UserProxyAgent, UserProxyConfig};
