//! UseCase: ヘルプリクエストの受諾
//!
//! 担当者が設定されると、その時点から担当者も会話の参加者になります。
//! 接続済みのセッションは再接続なしで次の join から参加できます。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    Conversation, ConversationRepository, DomainError, RepositoryError, RoomId, UserId,
};

use super::error::AcceptRequestError;

pub struct AcceptRequestUseCase {
    conversations: Arc<dyn ConversationRepository>,
    /// 読み込みから保存までを直列化し、同時受諾で担当者が上書きされないようにする
    update_lock: Mutex<()>,
}

impl AcceptRequestUseCase {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversations,
            update_lock: Mutex::new(()),
        }
    }

    pub async fn execute(
        &self,
        tutor: UserId,
        room_id: RoomId,
    ) -> Result<Conversation, AcceptRequestError> {
        let _guard = self.update_lock.lock().await;

        let mut conversation = self
            .conversations
            .find(&room_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => AcceptRequestError::NotFound,
                RepositoryError::Unavailable(reason) => {
                    tracing::error!("Request lookup for '{}' failed: {}", room_id, reason);
                    AcceptRequestError::PersistenceFailure
                }
            })?;

        conversation.accept(tutor.clone()).map_err(|e| match e {
            DomainError::OwnRequest => AcceptRequestError::OwnRequest,
            _ => AcceptRequestError::NotOpen,
        })?;

        self.conversations
            .save(conversation.clone())
            .await
            .map_err(|e| {
                tracing::error!("Failed to save request '{}': {}", room_id, e);
                AcceptRequestError::PersistenceFailure
            })?;

        tracing::info!("Request '{}' accepted by '{}'", room_id, tutor);
        Ok(conversation)
    }
}
