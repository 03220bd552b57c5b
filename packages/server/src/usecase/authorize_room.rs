//! UseCase: 会話への参加資格の確認（Room Membership Authority）
//!
//! join・メッセージ送信・シグナリング中継のたびに呼ばれ、毎回リクエストの
//! レコードを読み直します。担当者が途中で設定された場合も、再接続なしで
//! 次のイベントから参加資格が反映されます。

use std::sync::Arc;

use crate::domain::{ConversationRepository, ParticipantRole, RepositoryError, RoomId, UserId};

use super::error::RelayError;

/// 参加資格確認のユースケース
pub struct AuthorizeRoomUseCase {
    conversations: Arc<dyn ConversationRepository>,
}

impl AuthorizeRoomUseCase {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    /// `user_id` が `room_id` のオーナーまたは担当者であれば、その役割を返す
    ///
    /// # Returns
    ///
    /// * `Ok(ParticipantRole)` - 参加資格あり
    /// * `Err(RelayError::NotFound)` - 会話が存在しない
    /// * `Err(RelayError::AuthorizationFailed)` - 参加資格なし
    /// * `Err(RelayError::PersistenceFailure)` - ストレージに到達できない
    pub async fn execute(
        &self,
        user_id: &UserId,
        room_id: &RoomId,
    ) -> Result<ParticipantRole, RelayError> {
        let conversation = self
            .conversations
            .find(room_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => RelayError::NotFound,
                RepositoryError::Unavailable(reason) => {
                    tracing::error!("Conversation lookup for '{}' failed: {}", room_id, reason);
                    RelayError::PersistenceFailure
                }
            })?;

        conversation.role_of(user_id).ok_or_else(|| {
            tracing::warn!("User '{}' is not a participant of '{}'", user_id, room_id);
            RelayError::AuthorizationFailed
        })
    }
}
