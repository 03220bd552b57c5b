//! InMemory Conversation Repository 実装
//!
//! ヘルプリクエスト（会話）を HashMap に保持します。
//! 受諾などによる担当者の変更は `save` で上書きされ、次の認可チェックから反映されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Conversation, ConversationRepository, RepositoryError, RoomId};

/// インメモリ Conversation Repository 実装
#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: Mutex<HashMap<RoomId, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データ付きで作成
    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        let conversations = conversations
            .into_iter()
            .map(|conversation| (conversation.id.clone(), conversation))
            .collect();
        Self {
            conversations: Mutex::new(conversations),
        }
    }

    pub async fn count(&self) -> usize {
        self.conversations.lock().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find(&self, room_id: &RoomId) -> Result<Conversation, RepositoryError> {
        let conversations = self.conversations.lock().await;
        conversations
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(room_id.as_str().to_string()))
    }

    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        conversations.insert(conversation.id.clone(), conversation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn conversation(id: &str, owner: &str) -> Conversation {
        Conversation::new(
            RoomId::new(id.to_string()).unwrap(),
            UserId::new(owner.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_find_existing_conversation() {
        // テスト項目: 登録済みの会話を取得できる
        // given (前提条件):
        let repo =
            InMemoryConversationRepository::with_conversations(vec![conversation("req-1", "amy")]);

        // when (操作):
        let result = repo.find(&RoomId::new("req-1".to_string()).unwrap()).await;

        // then (期待する結果):
        let found = result.unwrap();
        assert_eq!(found.owner.as_str(), "amy");
        assert_eq!(found.assignee, None);
    }

    #[tokio::test]
    async fn test_find_missing_conversation() {
        // テスト項目: 存在しない会話は NotFound になる
        // given (前提条件):
        let repo = InMemoryConversationRepository::new();

        // when (操作):
        let result = repo.find(&RoomId::new("nope".to_string()).unwrap()).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_conversation() {
        // テスト項目: 保存すると既存の会話が上書きされる
        // given (前提条件):
        let repo =
            InMemoryConversationRepository::with_conversations(vec![conversation("req-1", "amy")]);
        let mut updated = conversation("req-1", "amy");
        updated.accept(UserId::new("tom".to_string()).unwrap()).unwrap();

        // when (操作):
        repo.save(updated).await.unwrap();

        // then (期待する結果):
        let found = repo
            .find(&RoomId::new("req-1".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(found.assignee.map(UserId::into_string), Some("tom".to_string()));
        assert_eq!(repo.count().await, 1);
    }
}
