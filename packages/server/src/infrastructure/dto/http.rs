//! HTTP API request and response bodies.

use serde::{Deserialize, Serialize};

use super::websocket::MessageDto;

/// Body of `POST /api/chat/{room_id}/messages`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SendMessageRequestDto {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response of `GET /api/chat/{room_id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHistoryDto {
    pub success: bool,
    pub items: Vec<MessageDto>,
}

/// Response of `POST /api/chat/{room_id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreatedDto {
    pub success: bool,
    pub message: MessageDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: String,
    pub owner_id: String,
    pub assignee_id: Option<String>,
    pub status: String,
}

/// Response of `POST /api/requests/{room_id}/accept`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAcceptedDto {
    pub success: bool,
    pub request: ConversationDto,
    pub chat_room_id: String,
}

/// Error body shared by every HTTP endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub success: bool,
    pub message: String,
}

impl ErrorResponseDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
