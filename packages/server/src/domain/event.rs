//! Events delivered from the server to connections.

use serde_json::Value;

use super::{
    entity::{DeliveredMessage, SignalKind, TypingState},
    value_object::{RoomId, UserId},
};

/// Machine-readable category attached to `error` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AuthorizationFailed,
    NotFound,
    ValidationFailed,
    PersistenceFailure,
    NotJoined,
    BadRequest,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthorizationFailed => "authorization_failed",
            ErrorCode::NotFound => "not_found",
            ErrorCode::ValidationFailed => "validation_failed",
            ErrorCode::PersistenceFailure => "persistence_failure",
            ErrorCode::NotJoined => "not_joined",
            ErrorCode::BadRequest => "bad_request",
        }
    }
}

/// Everything the relay ever sends to a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// Join acknowledgement, to the joining connection only.
    Joined { room_id: RoomId },
    /// Leave acknowledgement, to the leaving connection only.
    Left { room_id: RoomId },
    /// A persisted chat message, to the other room members.
    MessageNew(DeliveredMessage),
    /// Persistence confirmation, to the sending connection only.
    MessageSent(DeliveredMessage),
    Typing { sender: UserId, state: TypingState },
    /// Signaling payload forwarded untouched.
    Signal {
        kind: SignalKind,
        from: UserId,
        payload: Value,
    },
    Error { code: ErrorCode, message: String },
}
