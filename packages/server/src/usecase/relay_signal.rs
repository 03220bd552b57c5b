//! UseCase: 通話シグナリングの中継（Call Signaling Relay）
//!
//! offer / answer / ICE candidate / hangup を同じ room の他の接続へ転送します。
//! ペイロードは解釈せず、そのまま渡します。中継のたびに参加資格を確認し直します。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, RelayEvent, RoomId, SignalKind,
};

use super::{authorize_room::AuthorizeRoomUseCase, error::RelayError};

pub struct RelaySignalUseCase {
    authority: Arc<AuthorizeRoomUseCase>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(
        authority: Arc<AuthorizeRoomUseCase>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            authority,
            registry,
            message_pusher,
        }
    }

    /// シグナリングメッセージを中継し、転送した接続数を返す
    ///
    /// # Arguments
    ///
    /// * `payload` - SDP または ICE candidate。hangup の場合は `None`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        kind: SignalKind,
        payload: Option<Value>,
    ) -> Result<usize, RelayError> {
        let from = self
            .registry
            .user_of(connection_id)
            .await
            .ok_or(RelayError::AuthorizationFailed)?;

        let payload = match payload {
            Some(Value::Null) | None if kind.requires_payload() => {
                return Err(RelayError::ValidationFailed(format!(
                    "Missing {} payload",
                    kind.as_str()
                )));
            }
            Some(value) if kind.requires_payload() => value,
            _ => Value::Null,
        };

        self.authority.execute(&from, &room_id).await?;

        let targets = self.registry.members_of(&room_id, Some(connection_id)).await;
        let count = targets.len();
        let event = RelayEvent::Signal {
            kind,
            from: from.clone(),
            payload,
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &event).await {
            tracing::warn!("Failed to relay {} in '{}': {}", kind.as_str(), room_id, e);
            return Ok(0);
        }

        tracing::debug!(
            "Relayed {} from '{}' in '{}' to {} connection(s)",
            kind.as_str(),
            from,
            room_id,
            count
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::usecase::test_support::{Harness, drain, room};

    fn usecase(harness: &Harness) -> RelaySignalUseCase {
        RelaySignalUseCase::new(
            harness.authority(),
            harness.registry.clone(),
            harness.pusher.clone(),
        )
    }

    #[tokio::test]
    async fn test_offer_then_candidate_arrive_in_order() {
        // テスト項目: offer の後に送った ICE candidate は同じ順序で相手に届く
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (student, _student_rx) = harness.connect_and_join("student", "req-42").await;
        let (_tutor, mut tutor_rx) = harness.connect_and_join("tutor", "req-42").await;
        let sdp = json!({"type": "offer", "sdp": "v=0"});
        let candidate = json!({"candidate": "candidate:1 1 UDP 2122252543 10.0.0.1 54400 typ host"});

        // when (操作):
        usecase
            .execute(&student, room("req-42"), SignalKind::Offer, Some(sdp.clone()))
            .await
            .unwrap();
        usecase
            .execute(
                &student,
                room("req-42"),
                SignalKind::IceCandidate,
                Some(candidate.clone()),
            )
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut tutor_rx);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["event"], "webrtc:offer");
        assert_eq!(frames[0]["data"]["fromUserId"], "student");
        assert_eq!(frames[0]["data"]["payload"], sdp);
        assert_eq!(frames[1]["event"], "webrtc:ice-candidate");
        assert_eq!(frames[1]["data"]["payload"], candidate);
    }

    #[tokio::test]
    async fn test_hangup_carries_no_payload() {
        // テスト項目: hangup はペイロード無しで相手に届く
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (tutor, _tutor_rx) = harness.connect_and_join("tutor", "req-42").await;
        let (_student, mut student_rx) = harness.connect_and_join("student", "req-42").await;

        // when (操作):
        let result = usecase
            .execute(&tutor, room("req-42"), SignalKind::Hangup, None)
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        let frames = drain(&mut student_rx);
        assert_eq!(frames[0]["event"], "webrtc:call:hangup");
        assert_eq!(frames[0]["data"]["fromUserId"], "tutor");
        assert!(frames[0]["data"]["payload"].is_null());
    }

    #[tokio::test]
    async fn test_outsider_signal_is_rejected() {
        // テスト項目: 参加資格の無いユーザーのシグナリングは中継されない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (intruder, _rx) = harness.connect("intruder").await;
        let (_tutor, mut tutor_rx) = harness.connect_and_join("tutor", "req-42").await;

        // when (操作):
        let result = usecase
            .execute(
                &intruder,
                room("req-42"),
                SignalKind::Offer,
                Some(json!({"sdp": "v=0"})),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::AuthorizationFailed));
        assert!(drain(&mut tutor_rx).is_empty());
    }

    #[tokio::test]
    async fn test_offer_without_sdp_is_rejected() {
        // テスト項目: SDP の無い offer は ValidationFailed になる
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (student, _rx) = harness.connect_and_join("student", "req-42").await;

        // when (操作):
        let result = usecase
            .execute(&student, room("req-42"), SignalKind::Offer, None)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RelayError::ValidationFailed("Missing offer payload".to_string()))
        );
    }

    #[tokio::test]
    async fn test_eligible_user_can_signal_before_joining() {
        // テスト項目: 参加資格があれば join 前でもシグナリングを送れる
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (student, _rx) = harness.connect("student").await;
        let (_tutor, mut tutor_rx) = harness.connect_and_join("tutor", "req-42").await;

        // when (操作):
        let result = usecase
            .execute(
                &student,
                room("req-42"),
                SignalKind::Answer,
                Some(json!({"type": "answer", "sdp": "v=0"})),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert_eq!(drain(&mut tutor_rx)[0]["event"], "webrtc:answer");
    }
}
