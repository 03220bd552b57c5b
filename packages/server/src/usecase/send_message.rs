//! UseCase: メッセージ送信処理（Message Relay）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / execute_as() メソッド
//! - 本文の検証、送信ごとの参加資格の再確認、永続化、ファンアウト
//!
//! ### なぜこのテストが必要か
//! - 送信者以外の room メンバーにのみ message:new が届くことを保証
//! - 永続化に失敗した場合に一切配信されないこと（at-most-once）を保証
//! - 検証・認可エラーが送信者にだけ返り、何も保存されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の参加者間のメッセージ送信
//! - 異常系：参加資格なし、空文字・長すぎる本文、ストレージ障害
//! - エッジケース：同一ユーザーの複数接続、REST 経由の送信

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use tutorlink_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRegistry, DeliveredMessage, MessagePusher, MessageRepository,
    MessageText, NewMessage, RelayEvent, RoomId, SenderInfo, Timestamp, UserDirectory, UserId,
};

use super::{authorize_room::AuthorizeRoomUseCase, error::RelayError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    authority: Arc<AuthorizeRoomUseCase>,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserDirectory>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    /// 永続化順と配信順を一致させるための room ごとのロック
    room_locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl SendMessageUseCase {
    pub fn new(
        authority: Arc<AuthorizeRoomUseCase>,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserDirectory>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authority,
            messages,
            users,
            registry,
            message_pusher,
            clock,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    /// WebSocket 接続からのメッセージ送信
    ///
    /// 永続化したメッセージを送信者以外の room メンバーへ `message:new` として配信し、
    /// 送信した接続には `message:sent` で確定を返す。
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveredMessage)` - 永続化されたメッセージ
    /// * `Err(RelayError)` - 検証・認可・永続化の失敗。何も保存・配信されない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        text: String,
    ) -> Result<DeliveredMessage, RelayError> {
        let sender = self
            .registry
            .user_of(connection_id)
            .await
            .ok_or(RelayError::AuthorizationFailed)?;

        let delivered = self
            .relay(sender, room_id, text, Some(connection_id))
            .await?;

        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::MessageSent(delivered.clone()))
            .await
        {
            // 送信直後に切断された場合など。配信済みなので失敗扱いにはしない
            tracing::debug!("Could not confirm message to sender: {}", e);
        }

        Ok(delivered)
    }

    /// 接続を持たない送信（REST のフォールバック経路）
    ///
    /// 除外する送信元接続が無いため、room の全メンバーに配信する。
    pub async fn execute_as(
        &self,
        sender: UserId,
        room_id: RoomId,
        text: String,
    ) -> Result<DeliveredMessage, RelayError> {
        self.relay(sender, room_id, text, None).await
    }

    async fn relay(
        &self,
        sender: UserId,
        room_id: RoomId,
        text: String,
        exclude: Option<&ConnectionId>,
    ) -> Result<DeliveredMessage, RelayError> {
        // 1. 本文の検証（I/O 無し）
        let text = MessageText::new(text)?;

        // 2. 送信ごとに参加資格を再確認
        self.authority.execute(&sender, &room_id).await?;

        // 3. 表示用の送信者情報を解決（ロックの外で）
        let profile = self.users.find_profile(&sender).await;

        // 4. 永続化から配信までは room ごとに直列化する
        let room_lock = self.room_lock(&room_id).await;
        let _ordered = room_lock.lock().await;

        let created_at = Timestamp::new(self.clock.now_millis());
        let stored = self
            .messages
            .append(
                NewMessage {
                    room_id,
                    sender: sender.clone(),
                    text,
                },
                created_at,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist message from '{}': {}", sender, e);
                RelayError::PersistenceFailure
            })?;

        let delivered = DeliveredMessage {
            message: stored,
            sender: SenderInfo::resolve(sender, profile),
        };
        self.fan_out(&delivered, exclude).await;
        Ok(delivered)
    }

    async fn room_lock(&self, room_id: &RoomId) -> Arc<Mutex<()>> {
        let mut locks = self.room_locks.lock().await;
        locks.entry(room_id.clone()).or_default().clone()
    }

    async fn fan_out(&self, delivered: &DeliveredMessage, exclude: Option<&ConnectionId>) {
        let room_id = &delivered.message.room_id;
        let targets = self.registry.members_of(room_id, exclude).await;
        let target_count = targets.len();

        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::MessageNew(delivered.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast message in '{}': {}", room_id, e);
            return;
        }
        tracing::debug!(
            "Relayed message '{}' in '{}' to {} connection(s)",
            delivered.message.id,
            room_id,
            target_count
        );
    }
}
