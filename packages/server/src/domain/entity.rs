//! Entities.

use serde::{Deserialize, Serialize};

use super::{
    error::DomainError,
    value_object::{MessageId, MessageText, RoomId, Timestamp, UserId},
};

/// Lifecycle of the help request backing a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    #[default]
    Open,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

/// Which side of the conversation an identity is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    /// The student who created the request.
    Owner,
    /// The tutor who accepted it.
    Assignee,
}

/// The help-request record a room is derived from.
///
/// Eligibility is never cached: the owner and the assignee (once set) are the
/// only identities allowed to take part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: RoomId,
    pub owner: UserId,
    pub assignee: Option<UserId>,
    pub status: RequestStatus,
}

impl Conversation {
    pub fn new(id: RoomId, owner: UserId) -> Self {
        Self {
            id,
            owner,
            assignee: None,
            status: RequestStatus::Open,
        }
    }

    /// Role of `user` in this conversation, `None` if not eligible.
    pub fn role_of(&self, user: &UserId) -> Option<ParticipantRole> {
        if &self.owner == user {
            Some(ParticipantRole::Owner)
        } else if self.assignee.as_ref() == Some(user) {
            Some(ParticipantRole::Assignee)
        } else {
            None
        }
    }

    /// Tutor takes the request. Only open requests can be accepted, and never by their owner.
    pub fn accept(&mut self, tutor: UserId) -> Result<(), DomainError> {
        if self.status != RequestStatus::Open {
            return Err(DomainError::RequestNotOpen);
        }
        if self.owner == tutor {
            return Err(DomainError::OwnRequest);
        }
        self.assignee = Some(tutor);
        self.status = RequestStatus::Accepted;
        Ok(())
    }
}

/// A validated message about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub room_id: RoomId,
    pub sender: UserId,
    pub text: MessageText,
}

/// Immutable persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender: UserId,
    pub text: MessageText,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Sender attributes resolved for display. Name and email are absent when the
/// directory has no profile for the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SenderInfo {
    pub fn resolve(id: UserId, profile: Option<UserProfile>) -> Self {
        match profile {
            Some(profile) => Self {
                id,
                name: Some(profile.name),
                email: Some(profile.email),
            },
            None => Self {
                id,
                name: None,
                email: None,
            },
        }
    }
}

/// A persisted message together with its resolved sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredMessage {
    pub message: StoredMessage,
    pub sender: SenderInfo,
}

/// Call-signaling message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
    Hangup,
}

impl SignalKind {
    /// Hangup is the only kind that carries no payload.
    pub fn requires_payload(&self) -> bool {
        !matches!(self, SignalKind::Hangup)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "ice-candidate",
            SignalKind::Hangup => "hangup",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    Started,
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn open_conversation() -> Conversation {
        Conversation::new(RoomId::new("req-42".to_string()).unwrap(), user("student"))
    }

    #[test]
    fn test_role_of_owner_without_assignee() {
        // テスト項目: 担当者未設定の場合、オーナーのみが参加資格を持つ
        // given (前提条件):
        let conversation = open_conversation();

        // when (操作):
        let owner_role = conversation.role_of(&user("student"));
        let other_role = conversation.role_of(&user("tutor"));

        // then (期待する結果):
        assert_eq!(owner_role, Some(ParticipantRole::Owner));
        assert_eq!(other_role, None);
    }

    #[test]
    fn test_accept_sets_assignee_and_status() {
        // テスト項目: 受諾すると担当者とステータスが更新され、担当者が参加資格を持つ
        // given (前提条件):
        let mut conversation = open_conversation();

        // when (操作):
        let result = conversation.accept(user("tutor"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(conversation.status, RequestStatus::Accepted);
        assert_eq!(
            conversation.role_of(&user("tutor")),
            Some(ParticipantRole::Assignee)
        );
    }

    #[test]
    fn test_accept_rejects_owner() {
        // テスト項目: オーナー自身はリクエストを受諾できない
        // given (前提条件):
        let mut conversation = open_conversation();

        // when (操作):
        let result = conversation.accept(user("student"));

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::OwnRequest));
        assert_eq!(conversation.assignee, None);
    }

    #[test]
    fn test_accept_rejects_non_open_request() {
        // テスト項目: open 以外のリクエストは受諾できない
        // given (前提条件):
        let mut conversation = open_conversation();
        conversation.accept(user("tutor")).unwrap();

        // when (操作):
        let result = conversation.accept(user("another-tutor"));

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::RequestNotOpen));
        assert_eq!(conversation.assignee, Some(user("tutor")));
    }

    #[test]
    fn test_sender_info_without_profile() {
        // テスト項目: プロフィールが無い場合は ID のみの送信者情報になる
        // given (前提条件):
        let id = user("ghost");

        // when (操作):
        let info = SenderInfo::resolve(id.clone(), None);

        // then (期待する結果):
        assert_eq!(info.id, id);
        assert_eq!(info.name, None);
        assert_eq!(info.email, None);
    }
}
