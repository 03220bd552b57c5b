//! WebSocket event frames.
//!
//! Every frame is `{"event": <name>, "data": {...}}`. Inbound payload fields
//! are optional at the wire level so that a missing `roomId` surfaces as a
//! validation error rather than an opaque parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → server events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "join")]
    Join(RoomPayload),
    #[serde(rename = "leave")]
    Leave(RoomPayload),
    #[serde(rename = "message:send")]
    MessageSend(MessageSendPayload),
    #[serde(rename = "typing:start")]
    TypingStart(RoomPayload),
    #[serde(rename = "typing:stop")]
    TypingStop(RoomPayload),
    #[serde(rename = "webrtc:offer")]
    Offer(SessionDescriptionPayload),
    #[serde(rename = "webrtc:answer")]
    Answer(SessionDescriptionPayload),
    #[serde(rename = "webrtc:ice-candidate")]
    IceCandidate(CandidatePayload),
    #[serde(rename = "webrtc:call:hangup")]
    Hangup(RoomPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    #[serde(default)]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendPayload {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Offer or answer. Older clients send the description under `offer`/`answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptionPayload {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default, alias = "offer", alias = "answer")]
    pub sdp: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub candidate: Option<Value>,
}

/// Server → client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "joined")]
    Joined(RoomAckDto),
    #[serde(rename = "left")]
    Left(RoomAckDto),
    #[serde(rename = "message:new")]
    MessageNew(MessageDto),
    #[serde(rename = "message:sent")]
    MessageSent(MessageDto),
    #[serde(rename = "typing:user")]
    TypingUser(TypingDto),
    #[serde(rename = "typing:stop")]
    TypingStop(TypingDto),
    #[serde(rename = "webrtc:offer")]
    Offer(SignalDto),
    #[serde(rename = "webrtc:answer")]
    Answer(SignalDto),
    #[serde(rename = "webrtc:ice-candidate")]
    IceCandidate(SignalDto),
    #[serde(rename = "webrtc:call:hangup")]
    Hangup(SignalDto),
    #[serde(rename = "error")]
    Error(ErrorDto),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAckDto {
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub room_id: String,
    pub sender: SenderDto,
    pub text: String,
    /// RFC 3339, UTC
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingDto {
    pub sender_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDto {
    pub from_user_id: String,
    /// Opaque session description or candidate; `null` for hangup.
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub code: String,
    pub message: String,
}
