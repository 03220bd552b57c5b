//! UseCase: room への参加
//!
//! 参加資格を確認してから Registry にメンバーとして登録し、参加した接続にのみ
//! `joined` を返します。既に参加済みの場合も成功として扱います（冪等）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, ParticipantRole, RelayEvent, RoomId,
};

use super::{authorize_room::AuthorizeRoomUseCase, error::RelayError};

pub struct JoinRoomUseCase {
    authority: Arc<AuthorizeRoomUseCase>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        authority: Arc<AuthorizeRoomUseCase>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            authority,
            registry,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<ParticipantRole, RelayError> {
        let user_id = self
            .registry
            .user_of(connection_id)
            .await
            .ok_or(RelayError::AuthorizationFailed)?;

        let role = self.authority.execute(&user_id, &room_id).await?;

        self.registry
            .join(connection_id, &room_id)
            .await
            .map_err(|e| {
                // 認可確認の間に切断された
                tracing::warn!("Join of '{}' dropped: {}", room_id, e);
                RelayError::AuthorizationFailed
            })?;

        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::Joined {
                room_id: room_id.clone(),
            })
            .await
        {
            tracing::warn!("Failed to acknowledge join of '{}': {}", room_id, e);
        }
        tracing::info!("User '{}' joined room '{}' as {:?}", user_id, room_id, role);

        Ok(role)
    }
}
