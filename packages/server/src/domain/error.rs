//! Domain-level error types.

use thiserror::Error;

/// Value-object and entity rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    #[error("message text must not be empty")]
    EmptyMessage,

    #[error("message cannot exceed {max} characters (got {actual})")]
    MessageTooLong { max: usize, actual: usize },

    #[error("request is not open")]
    RequestNotOpen,

    #[error("cannot accept your own request")]
    OwnRequest,
}

/// Failures reported by storage collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Credential verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing credential")]
    Missing,

    #[error("invalid credential")]
    Invalid,

    #[error("credential expired")]
    Expired,
}

/// Connection registry failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection not registered: {0}")]
    UnknownConnection(String),
}

/// Outbound delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}
