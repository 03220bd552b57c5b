//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    domain::{RoomId, UserId},
    infrastructure::dto::http::{
        ErrorResponseDto, MessageCreatedDto, MessageHistoryDto, RequestAcceptedDto,
        SendMessageRequestDto,
    },
    ui::state::AppState,
    usecase::{AcceptRequestError, RelayError},
};

use super::bearer_token;

/// HTTP 層のエラー。`{"success": false, "message": ...}` として返す
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Relay(RelayError),
    Accept(AcceptRequestError),
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        Self::Relay(error)
    }
}

impl From<AcceptRequestError> for ApiError {
    fn from(error: AcceptRequestError) -> Self {
        Self::Accept(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authorized".to_string()),
            ApiError::Relay(e) => {
                let status = match e {
                    RelayError::AuthorizationFailed => StatusCode::FORBIDDEN,
                    RelayError::NotFound => StatusCode::NOT_FOUND,
                    RelayError::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
                    RelayError::ValidationFailed(_)
                    | RelayError::NotJoined
                    | RelayError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            ApiError::Accept(e) => {
                let status = match e {
                    AcceptRequestError::NotFound => StatusCode::NOT_FOUND,
                    AcceptRequestError::NotOpen | AcceptRequestError::OwnRequest => {
                        StatusCode::BAD_REQUEST
                    }
                    AcceptRequestError::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
        };
        (status, Json(ErrorResponseDto::new(message))).into_response()
    }
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserId, ApiError> {
    state
        .connect_participant_usecase
        .authenticate(bearer_token(headers))
        .map_err(|e| {
            tracing::warn!("Rejected HTTP request: {}", e);
            ApiError::Unauthorized
        })
}

fn parse_room(room_id: String) -> Result<RoomId, ApiError> {
    RoomId::new(room_id).map_err(|_| ApiError::Relay(RelayError::NotFound))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Messages of a conversation, oldest first
pub async fn get_message_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageHistoryDto>, ApiError> {
    let user_id = authenticate(&state, &headers)?;
    let room_id = parse_room(room_id)?;

    let history = state
        .get_message_history_usecase
        .execute(&user_id, &room_id)
        .await?;

    // Domain Model から DTO への変換
    Ok(Json(MessageHistoryDto {
        success: true,
        items: history.into_iter().map(Into::into).collect(),
    }))
}

/// Send a message without a socket
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<SendMessageRequestDto>,
) -> Result<(StatusCode, Json<MessageCreatedDto>), ApiError> {
    let user_id = authenticate(&state, &headers)?;
    let room_id = parse_room(room_id)?;

    let delivered = state
        .send_message_usecase
        .execute_as(user_id, room_id, body.text.unwrap_or_default())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageCreatedDto {
            success: true,
            message: delivered.into(),
        }),
    ))
}

/// Accept an open help request as its tutor
pub async fn accept_request(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<RequestAcceptedDto>, ApiError> {
    let user_id = authenticate(&state, &headers)?;
    let room_id =
        RoomId::new(room_id).map_err(|_| ApiError::Accept(AcceptRequestError::NotFound))?;

    let conversation = state
        .accept_request_usecase
        .execute(user_id, room_id)
        .await?;
    let chat_room_id = conversation.id.as_str().to_string();

    Ok(Json(RequestAcceptedDto {
        success: true,
        request: conversation.into(),
        chat_room_id,
    }))
}
