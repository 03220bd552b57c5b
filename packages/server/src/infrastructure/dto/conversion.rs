//! Conversion logic between domain values and DTOs.

use serde_json::Value;

use tutorlink_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Conversation, DeliveredMessage, RelayEvent, RequestStatus, SenderInfo, SignalKind,
    TypingState,
};
use crate::infrastructure::dto::{http as http_dto, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<SenderInfo> for dto::SenderDto {
    fn from(model: SenderInfo) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name,
            email: model.email,
        }
    }
}

impl From<DeliveredMessage> for dto::MessageDto {
    fn from(model: DeliveredMessage) -> Self {
        Self {
            id: model.message.id.to_string(),
            room_id: model.message.room_id.into_string(),
            sender: model.sender.into(),
            text: model.message.text.into_string(),
            created_at: timestamp_to_rfc3339(model.message.created_at.value()),
        }
    }
}

impl From<RelayEvent> for dto::ServerEvent {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::Joined { room_id } => Self::Joined(dto::RoomAckDto {
                room_id: room_id.into_string(),
            }),
            RelayEvent::Left { room_id } => Self::Left(dto::RoomAckDto {
                room_id: room_id.into_string(),
            }),
            RelayEvent::MessageNew(message) => Self::MessageNew(message.into()),
            RelayEvent::MessageSent(message) => Self::MessageSent(message.into()),
            RelayEvent::Typing { sender, state } => {
                let typing = dto::TypingDto {
                    sender_id: sender.into_string(),
                };
                match state {
                    TypingState::Started => Self::TypingUser(typing),
                    TypingState::Stopped => Self::TypingStop(typing),
                }
            }
            RelayEvent::Signal {
                kind,
                from,
                payload,
            } => signal_event(kind, from.into_string(), payload),
            RelayEvent::Error { code, message } => Self::Error(dto::ErrorDto {
                code: code.as_str().to_string(),
                message,
            }),
        }
    }
}

fn signal_event(kind: SignalKind, from_user_id: String, payload: Value) -> dto::ServerEvent {
    let signal = dto::SignalDto {
        from_user_id,
        payload,
    };
    match kind {
        SignalKind::Offer => dto::ServerEvent::Offer(signal),
        SignalKind::Answer => dto::ServerEvent::Answer(signal),
        SignalKind::IceCandidate => dto::ServerEvent::IceCandidate(signal),
        SignalKind::Hangup => dto::ServerEvent::Hangup(signal),
    }
}

impl From<Conversation> for http_dto::ConversationDto {
    fn from(model: Conversation) -> Self {
        Self {
            id: model.id.into_string(),
            owner_id: model.owner.into_string(),
            assignee_id: model.assignee.map(|id| id.into_string()),
            status: status_label(model.status).to_string(),
        }
    }
}

fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Open => "open",
        RequestStatus::Accepted => "accepted",
        RequestStatus::InProgress => "in-progress",
        RequestStatus::Completed => "completed",
        RequestStatus::Cancelled => "cancelled",
    }
}

/// Encode a relay event as a WebSocket text frame.
pub fn encode_event(event: &RelayEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerEvent::from(event.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ErrorCode, MessageId, MessageText, RoomId, StoredMessage, Timestamp, UserId,
    };
    use serde_json::json;

    fn delivered(name: Option<&str>) -> DeliveredMessage {
        let sender = UserId::new("u-amy".to_string()).unwrap();
        DeliveredMessage {
            message: StoredMessage {
                id: MessageId::generate(),
                room_id: RoomId::new("req-42".to_string()).unwrap(),
                sender: sender.clone(),
                text: MessageText::new("hello".to_string()).unwrap(),
                created_at: Timestamp::new(1672531200000),
            },
            sender: SenderInfo {
                id: sender,
                name: name.map(str::to_string),
                email: name.map(|_| "amy@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_delivered_message_to_dto() {
        // テスト項目: 永続化済みメッセージが送信者情報付きの DTO に変換される
        // given (前提条件):
        let model = delivered(Some("Amy"));

        // when (操作):
        let dto_msg: dto::MessageDto = model.into();

        // then (期待する結果):
        assert_eq!(dto_msg.room_id, "req-42");
        assert_eq!(dto_msg.sender.id, "u-amy");
        assert_eq!(dto_msg.sender.name.as_deref(), Some("Amy"));
        assert_eq!(dto_msg.text, "hello");
        assert_eq!(dto_msg.created_at, "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_sender_without_profile_omits_name_and_email() {
        // テスト項目: プロフィールが無い送信者は name/email を出力しない
        // given (前提条件):
        let model = delivered(None);

        // when (操作):
        let frame = encode_event(&RelayEvent::MessageNew(model)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();

        // then (期待する結果):
        assert_eq!(value["event"], "message:new");
        assert_eq!(value["data"]["sender"], json!({"id": "u-amy"}));
    }

    #[test]
    fn test_typing_state_selects_event_name() {
        // テスト項目: 入力開始/終了でイベント名が切り替わる
        // given (前提条件):
        let sender = UserId::new("u-amy".to_string()).unwrap();

        // when (操作):
        let started = encode_event(&RelayEvent::Typing {
            sender: sender.clone(),
            state: TypingState::Started,
        })
        .unwrap();
        let stopped = encode_event(&RelayEvent::Typing {
            sender,
            state: TypingState::Stopped,
        })
        .unwrap();

        // then (期待する結果):
        assert_eq!(
            started,
            r#"{"event":"typing:user","data":{"senderId":"u-amy"}}"#
        );
        assert_eq!(
            stopped,
            r#"{"event":"typing:stop","data":{"senderId":"u-amy"}}"#
        );
    }

    #[test]
    fn test_hangup_payload_is_null() {
        // テスト項目: hangup は payload が null のまま転送される
        // given (前提条件):
        let event = RelayEvent::Signal {
            kind: SignalKind::Hangup,
            from: UserId::new("u-tom".to_string()).unwrap(),
            payload: Value::Null,
        };

        // when (操作):
        let value: serde_json::Value =
            serde_json::from_str(&encode_event(&event).unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "webrtc:call:hangup", "data": {"fromUserId": "u-tom", "payload": null}})
        );
    }

    #[test]
    fn test_error_event_uses_code_string() {
        // テスト項目: エラーイベントはコード文字列とメッセージを持つ
        // given (前提条件):
        let event = RelayEvent::Error {
            code: ErrorCode::NotFound,
            message: "Request not found".to_string(),
        };

        // when (操作):
        let frame = encode_event(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            r#"{"event":"error","data":{"code":"not_found","message":"Request not found"}}"#
        );
    }
}
