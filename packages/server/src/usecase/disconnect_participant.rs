//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続の登録解除（Registry の全 room からの削除、送信チャンネルの破棄）
//!
//! ### なぜこのテストが必要か
//! - 切断後の接続にはどの room のファンアウトも届かないことを保証
//! - 空になった room のエントリが残らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数 room に参加した接続の切断
//! - エッジケース：同一ユーザーの別接続は残る、未登録の接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, RoomId};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続を破棄し、参加していた room の一覧を返す
    ///
    /// 未登録の接続に対しては何もせず空のリストを返す（冪等）。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let user_id = self.registry.user_of(connection_id).await;
        let rooms = self.registry.disconnect(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        if let Some(user_id) = user_id {
            tracing::info!(
                "User '{}' disconnected ('{}'), left {} room(s)",
                user_id,
                connection_id,
                rooms.len()
            );
        }
        rooms
    }
}
