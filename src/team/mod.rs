pub mod chat;

pub use chat::{initiate_chat, ChatOptions, ChatResult};
