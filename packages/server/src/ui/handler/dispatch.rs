//! Inbound event routing.
//!
//! Each text frame is decoded into a [`ClientEvent`] and handed to the matching
//! use case. Any failure is reported back to the originating connection as an
//! `error` event; the socket stays open.

use crate::{
    domain::{ConnectionId, MessagePusher, RoomId, SignalKind, TypingState},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::RelayError,
};

pub async fn dispatch(state: &AppState, connection_id: &ConnectionId, frame: &str) {
    let result = match serde_json::from_str::<ClientEvent>(frame) {
        Ok(event) => handle_event(state, connection_id, event).await,
        Err(e) => Err(RelayError::MalformedEvent(e.to_string())),
    };

    if let Err(error) = result {
        tracing::warn!("Rejected event from '{}': {}", connection_id, error);
        if let Err(e) = state
            .message_pusher
            .push_to(connection_id, &error.to_event())
            .await
        {
            tracing::debug!("Could not report error to '{}': {}", connection_id, e);
        }
    }
}

async fn handle_event(
    state: &AppState,
    connection_id: &ConnectionId,
    event: ClientEvent,
) -> Result<(), RelayError> {
    match event {
        ClientEvent::Join(payload) => {
            let room_id = require_room(payload.room_id)?;
            state
                .join_room_usecase
                .execute(connection_id, room_id)
                .await?;
        }
        ClientEvent::Leave(payload) => {
            let room_id = require_room(payload.room_id)?;
            state
                .leave_room_usecase
                .execute(connection_id, room_id)
                .await;
        }
        ClientEvent::MessageSend(payload) => {
            let room_id = require_room(payload.room_id)?;
            state
                .send_message_usecase
                .execute(connection_id, room_id, payload.text.unwrap_or_default())
                .await?;
        }
        ClientEvent::TypingStart(payload) => {
            let room_id = require_room(payload.room_id)?;
            state
                .typing_usecase
                .execute(connection_id, room_id, TypingState::Started)
                .await?;
        }
        ClientEvent::TypingStop(payload) => {
            let room_id = require_room(payload.room_id)?;
            state
                .typing_usecase
                .execute(connection_id, room_id, TypingState::Stopped)
                .await?;
        }
        ClientEvent::Offer(payload) => {
            relay(state, connection_id, payload.room_id, SignalKind::Offer, payload.sdp).await?;
        }
        ClientEvent::Answer(payload) => {
            relay(state, connection_id, payload.room_id, SignalKind::Answer, payload.sdp).await?;
        }
        ClientEvent::IceCandidate(payload) => {
            relay(
                state,
                connection_id,
                payload.room_id,
                SignalKind::IceCandidate,
                payload.candidate,
            )
            .await?;
        }
        ClientEvent::Hangup(payload) => {
            relay(state, connection_id, payload.room_id, SignalKind::Hangup, None).await?;
        }
    }
    Ok(())
}

async fn relay(
    state: &AppState,
    connection_id: &ConnectionId,
    room_id: Option<String>,
    kind: SignalKind,
    payload: Option<serde_json::Value>,
) -> Result<(), RelayError> {
    let room_id = require_room(room_id)?;
    state
        .relay_signal_usecase
        .execute(connection_id, room_id, kind, payload)
        .await?;
    Ok(())
}

fn require_room(room_id: Option<String>) -> Result<RoomId, RelayError> {
    room_id
        .and_then(|id| RoomId::new(id).ok())
        .ok_or_else(|| RelayError::ValidationFailed("Room ID required".to_string()))
}
