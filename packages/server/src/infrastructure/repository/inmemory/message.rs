//! InMemory Message Repository 実装
//!
//! 追記専用のログとして Vec にメッセージを保持します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    MessageId, MessageRepository, NewMessage, RepositoryError, RoomId, StoredMessage, Timestamp,
};

/// インメモリ Message Repository 実装
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<StoredMessage>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全会話の合計メッセージ数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(
        &self,
        message: NewMessage,
        created_at: Timestamp,
    ) -> Result<StoredMessage, RepositoryError> {
        let stored = StoredMessage {
            id: MessageId::generate(),
            room_id: message.room_id,
            sender: message.sender,
            text: message.text,
            created_at,
        };
        self.messages.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let mut found: Vec<StoredMessage> = messages
            .iter()
            .filter(|message| &message.room_id == room_id)
            .cloned()
            .collect();
        // stable: equal timestamps keep insertion order
        found.sort_by_key(|message| message.created_at);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, UserId};

    fn new_message(room: &str, text: &str) -> NewMessage {
        NewMessage {
            room_id: RoomId::new(room.to_string()).unwrap(),
            sender: UserId::new("amy".to_string()).unwrap(),
            text: MessageText::new(text.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        // テスト項目: 追記時に ID とサーバー時刻が付与される
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();

        // when (操作):
        let stored = repo
            .append(new_message("req-1", "hello"), Timestamp::new(1000))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(stored.created_at, Timestamp::new(1000));
        assert_eq!(stored.text.as_str(), "hello");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_list_by_room_filters_and_sorts() {
        // テスト項目: 指定した会話のメッセージだけが作成日時順に返る
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        repo.append(new_message("req-1", "second"), Timestamp::new(2000))
            .await
            .unwrap();
        repo.append(new_message("req-2", "other room"), Timestamp::new(1500))
            .await
            .unwrap();
        repo.append(new_message("req-1", "first"), Timestamp::new(1000))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .list_by_room(&RoomId::new("req-1".to_string()).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = result.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
