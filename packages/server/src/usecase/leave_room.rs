//! UseCase: room からの退出

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, RelayEvent, RoomId};

pub struct LeaveRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 常に成功する。参加していない room を指定しても `left` を返す
    pub async fn execute(&self, connection_id: &ConnectionId, room_id: RoomId) {
        self.registry.leave(connection_id, &room_id).await;
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::Left {
                room_id: room_id.clone(),
            })
            .await
        {
            tracing::warn!("Failed to acknowledge leave of '{}': {}", room_id, e);
        }
        tracing::info!("Connection '{}' left room '{}'", connection_id, room_id);
    }
}
