//! UseCase: 会話のメッセージ履歴取得

use std::sync::Arc;

use crate::domain::{
    DeliveredMessage, MessageRepository, RoomId, SenderInfo, UserDirectory, UserId,
};

use super::{authorize_room::AuthorizeRoomUseCase, error::RelayError};

pub struct GetMessageHistoryUseCase {
    authority: Arc<AuthorizeRoomUseCase>,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserDirectory>,
}

impl GetMessageHistoryUseCase {
    pub fn new(
        authority: Arc<AuthorizeRoomUseCase>,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            authority,
            messages,
            users,
        }
    }

    /// 参加者であれば、作成時刻の昇順でメッセージを返す
    pub async fn execute(
        &self,
        user_id: &UserId,
        room_id: &RoomId,
    ) -> Result<Vec<DeliveredMessage>, RelayError> {
        self.authority.execute(user_id, room_id).await?;

        let stored = self.messages.list_by_room(room_id).await.map_err(|e| {
            tracing::error!("Failed to load history of '{}': {}", room_id, e);
            RelayError::PersistenceFailure
        })?;

        let mut history = Vec::with_capacity(stored.len());
        for message in stored {
            let profile = self.users.find_profile(&message.sender).await;
            let sender = SenderInfo::resolve(message.sender.clone(), profile);
            history.push(DeliveredMessage { message, sender });
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageText, NewMessage, Timestamp},
        usecase::test_support::{Harness, room, user},
    };

    fn usecase(harness: &Harness) -> GetMessageHistoryUseCase {
        GetMessageHistoryUseCase::new(
            harness.authority(),
            harness.messages.clone(),
            harness.users.clone(),
        )
    }

    async fn seed(harness: &Harness, sender: &str, text: &str, at: i64) {
        harness
            .messages
            .append(
                NewMessage {
                    room_id: room("req-42"),
                    sender: user(sender),
                    text: MessageText::new(text.to_string()).unwrap(),
                },
                Timestamp::new(at),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_history_is_ordered_with_senders() {
        // テスト項目: 履歴は作成時刻の昇順で、送信者の表示情報付きで返る
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        seed(&harness, "tutor", "hi", 2_000).await;
        seed(&harness, "student", "hello", 1_000).await;

        // when (操作):
        let history = usecase
            .execute(&user("student"), &room("req-42"))
            .await
            .unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = history.iter().map(|m| m.message.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "hi"]);
        assert_eq!(history[1].sender.name.as_deref(), Some("Tia Tutor"));
    }

    #[tokio::test]
    async fn test_history_requires_participation() {
        // テスト項目: 参加者以外は履歴を取得できない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        seed(&harness, "student", "private", 1_000).await;

        // when (操作):
        let result = usecase.execute(&user("intruder"), &room("req-42")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::AuthorizationFailed));
    }

    #[tokio::test]
    async fn test_history_of_missing_room() {
        // テスト項目: 存在しない会話の履歴は NotFound になる
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);

        // when (操作):
        let result = usecase.execute(&user("student"), &room("nope")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::NotFound));
    }
}
