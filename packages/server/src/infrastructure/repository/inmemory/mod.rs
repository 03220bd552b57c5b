//! InMemory Repository 実装

mod conversation;
mod message;
mod user;

pub use conversation::InMemoryConversationRepository;
pub use message::InMemoryMessageRepository;
pub use user::InMemoryUserDirectory;
