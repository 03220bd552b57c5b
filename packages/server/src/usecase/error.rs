//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{DomainError, ErrorCode, RelayEvent};

/// Per-event failures. Reported to the originating connection only, never broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Not authorized for this request")]
    AuthorizationFailed,

    #[error("Request not found")]
    NotFound,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Message could not be stored")]
    PersistenceFailure,

    #[error("Join the room before sending typing events")]
    NotJoined,

    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl RelayError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RelayError::AuthorizationFailed => ErrorCode::AuthorizationFailed,
            RelayError::NotFound => ErrorCode::NotFound,
            RelayError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            RelayError::PersistenceFailure => ErrorCode::PersistenceFailure,
            RelayError::NotJoined => ErrorCode::NotJoined,
            RelayError::MalformedEvent(_) => ErrorCode::BadRequest,
        }
    }

    pub fn to_event(&self) -> RelayEvent {
        RelayEvent::Error {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<DomainError> for RelayError {
    fn from(error: DomainError) -> Self {
        RelayError::ValidationFailed(error.to_string())
    }
}

/// リクエスト受諾の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceptRequestError {
    #[error("Request not found")]
    NotFound,

    #[error("Request is not available")]
    NotOpen,

    #[error("Cannot accept your own request")]
    OwnRequest,

    #[error("Request could not be updated")]
    PersistenceFailure,
}
