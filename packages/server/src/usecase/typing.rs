//! UseCase: 入力中インジケーターの中継（Typing Signaler）
//!
//! 永続化はせず、参加済みの接続から届いた通知を同じ room の他の接続へそのまま流します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, RelayEvent, RoomId, TypingState,
};

use super::error::RelayError;

pub struct TypingUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TypingUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 通知を送った接続数を返す
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        state: TypingState,
    ) -> Result<usize, RelayError> {
        let sender = self
            .registry
            .user_of(connection_id)
            .await
            .ok_or(RelayError::AuthorizationFailed)?;

        if !self.registry.is_member(connection_id, &room_id).await {
            return Err(RelayError::NotJoined);
        }

        let targets = self.registry.members_of(&room_id, Some(connection_id)).await;
        let count = targets.len();
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::Typing { sender, state })
            .await
        {
            tracing::debug!("Typing indicator in '{}' not delivered: {}", room_id, e);
        }
        Ok(count)
    }
}
