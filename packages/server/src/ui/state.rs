//! Shared application state.

use std::sync::Arc;

use tutorlink_shared::time::Clock;

use crate::{
    domain::{
        ConnectionRegistry, ConversationRepository, CredentialVerifier, MessagePusher,
        MessageRepository, UserDirectory,
    },
    usecase::{
        AcceptRequestUseCase, AuthorizeRoomUseCase, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, GetMessageHistoryUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, RelaySignalUseCase, SendMessageUseCase, TypingUseCase,
    },
};

/// UseCase の集合。ハンドラはここからユースケースを呼び出す
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub typing_usecase: Arc<TypingUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub get_message_history_usecase: Arc<GetMessageHistoryUseCase>,
    pub accept_request_usecase: Arc<AcceptRequestUseCase>,
    /// 送信元の接続へのエラー通知に使う
    pub message_pusher: Arc<dyn MessagePusher>,
}

/// Collaborators the use cases are built from.
pub struct Dependencies {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub registry: Arc<dyn ConnectionRegistry>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(deps: Dependencies) -> Self {
        let authority = Arc::new(AuthorizeRoomUseCase::new(deps.conversations.clone()));

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                deps.verifier,
                deps.registry.clone(),
                deps.message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                deps.registry.clone(),
                deps.message_pusher.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                authority.clone(),
                deps.registry.clone(),
                deps.message_pusher.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                deps.registry.clone(),
                deps.message_pusher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                authority.clone(),
                deps.messages.clone(),
                deps.users.clone(),
                deps.registry.clone(),
                deps.message_pusher.clone(),
                deps.clock,
            )),
            typing_usecase: Arc::new(TypingUseCase::new(
                deps.registry.clone(),
                deps.message_pusher.clone(),
            )),
            relay_signal_usecase: Arc::new(RelaySignalUseCase::new(
                authority.clone(),
                deps.registry,
                deps.message_pusher.clone(),
            )),
            get_message_history_usecase: Arc::new(GetMessageHistoryUseCase::new(
                authority,
                deps.messages,
                deps.users,
            )),
            accept_request_usecase: Arc::new(AcceptRequestUseCase::new(deps.conversations)),
            message_pusher: deps.message_pusher,
        }
    }
}
