//! Domain layer: value objects, entities, outbound events and the
//! interfaces of every collaborator the relay talks to.

pub mod auth;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use auth::CredentialVerifier;
pub use entity::{
    Conversation, DeliveredMessage, NewMessage, ParticipantRole, RequestStatus, SenderInfo,
    SignalKind, StoredMessage, TypingState, UserProfile,
};
pub use error::{AuthError, DomainError, MessagePushError, RegistryError, RepositoryError};
pub use event::{ErrorCode, RelayEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use repository::{ConversationRepository, MessageRepository, UserDirectory};
pub use value_object::{
    ConnectionId, MAX_MESSAGE_LENGTH, MessageId, MessageText, RoomId, Timestamp, UserId,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::{MockConversationRepository, MockMessageRepository};
