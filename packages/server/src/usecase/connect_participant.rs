//! UseCase: 接続の認証と登録（Session Authenticator）
//!
//! 認証は接続確立時に 1 度だけ行い、成功した場合のみ接続を登録します。
//! 認証に失敗した接続はイベントを 1 つも処理しません。

use std::sync::Arc;

use crate::domain::{
    AuthError, ConnectionId, ConnectionRegistry, CredentialVerifier, MessagePusher,
    PusherChannel, UserId,
};

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    verifier: Arc<dyn CredentialVerifier>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            verifier,
            registry,
            message_pusher,
        }
    }

    /// ハンドシェイクで提示されたトークンを検証し、ユーザー ID を返す
    pub fn authenticate(&self, token: Option<&str>) -> Result<UserId, AuthError> {
        let token = token.ok_or(AuthError::Missing)?;
        self.verifier.verify(token)
    }

    /// 認証済みの接続を登録し、接続ハンドルを返す
    ///
    /// # Arguments
    ///
    /// * `user_id` - `authenticate` で得たユーザー ID
    /// * `sender` - この接続へのフレーム送信用チャンネル
    pub async fn execute(&self, user_id: UserId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.registry.register(connection_id, user_id.clone()).await;
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        tracing::info!("User '{}' connected as '{}'", user_id, connection_id);
        connection_id
    }
}
