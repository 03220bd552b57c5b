//! Shared fixtures for use-case tests.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use tutorlink_shared::time::FixedClock;

use crate::{
    domain::{
        ConnectionId, ConnectionRegistry, Conversation, MessagePusher, RoomId, UserId,
        UserProfile,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryConnectionRegistry,
        repository::{
            InMemoryConversationRepository, InMemoryMessageRepository, InMemoryUserDirectory,
        },
    },
};

use super::AuthorizeRoomUseCase;

pub(crate) const NOW: i64 = 1_700_000_000_000;

pub(crate) fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

pub(crate) fn room(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

/// In-memory wiring with two requests:
/// - `req-42`: owner `student`, assignee `tutor`
/// - `req-open`: owner `student`, no assignee yet
pub(crate) struct Harness {
    pub conversations: Arc<InMemoryConversationRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub users: Arc<InMemoryUserDirectory>,
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        let mut accepted = Conversation::new(room("req-42"), user("student"));
        accepted.accept(user("tutor")).unwrap();
        let open = Conversation::new(room("req-open"), user("student"));

        Self {
            conversations: Arc::new(InMemoryConversationRepository::with_conversations(vec![
                accepted, open,
            ])),
            messages: Arc::new(InMemoryMessageRepository::new()),
            users: Arc::new(InMemoryUserDirectory::new(vec![
                UserProfile {
                    id: user("student"),
                    name: "Sam Student".to_string(),
                    email: "sam@example.com".to_string(),
                },
                UserProfile {
                    id: user("tutor"),
                    name: "Tia Tutor".to_string(),
                    email: "tia@example.com".to_string(),
                },
            ])),
            registry: Arc::new(InMemoryConnectionRegistry::new()),
            pusher: Arc::new(WebSocketMessagePusher::default()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    pub fn authority(&self) -> Arc<AuthorizeRoomUseCase> {
        Arc::new(AuthorizeRoomUseCase::new(self.conversations.clone()))
    }

    /// Register an authenticated connection with an outbound channel.
    pub async fn connect(&self, user_id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();
        self.registry.register(connection_id, user(user_id)).await;
        self.pusher.register_client(connection_id, tx).await;
        (connection_id, rx)
    }

    /// Register and put the connection straight into `room_id`.
    pub async fn connect_and_join(
        &self,
        user_id: &str,
        room_id: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection_id, rx) = self.connect(user_id).await;
        self.registry
            .join(&connection_id, &room(room_id))
            .await
            .unwrap();
        (connection_id, rx)
    }
}

/// Everything currently queued on a connection, decoded.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}
