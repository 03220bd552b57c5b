//! UseCase layer: one struct per relay operation.

mod accept_request;
mod authorize_room;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_message_history;
mod join_room;
mod leave_room;
mod relay_signal;
mod send_message;
mod typing;

#[cfg(test)]
pub(crate) mod test_support;

pub use accept_request::AcceptRequestUseCase;
pub use authorize_room::AuthorizeRoomUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{AcceptRequestError, RelayError};
pub use get_message_history::GetMessageHistoryUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
