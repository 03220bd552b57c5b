//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! リレーはこれらを外部コラボレーターとして扱い、呼び出しのたびに
//! 最新の状態を読み直します（キャッシュしない）。

use async_trait::async_trait;

use super::{
    entity::{Conversation, NewMessage, StoredMessage, UserProfile},
    error::RepositoryError,
    value_object::{RoomId, Timestamp, UserId},
};

/// ヘルプリクエスト（会話）の参照・更新
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// 会話を取得。存在しない場合は `RepositoryError::NotFound`
    async fn find(&self, room_id: &RoomId) -> Result<Conversation, RepositoryError>;

    /// 会話を保存（新規作成または上書き）
    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError>;
}

/// 追記専用のメッセージログ
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを追記し、サーバー側で採番・時刻付与したレコードを返す
    async fn append(
        &self,
        message: NewMessage,
        created_at: Timestamp,
    ) -> Result<StoredMessage, RepositoryError>;

    /// 会話のメッセージを作成日時の昇順で取得
    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError>;
}

/// 送信者の表示用属性の参照
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_profile(&self, user_id: &UserId) -> Option<UserProfile>;
}
