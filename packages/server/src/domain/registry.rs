//! Connection Registry interface.
//!
//! The registry is the only owner of the connection ↔ room membership mapping.
//! Membership here means "has joined"; eligibility is decided elsewhere and
//! re-checked on every event that needs it.

use async_trait::async_trait;

use super::{
    error::RegistryError,
    value_object::{ConnectionId, RoomId, UserId},
};

#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Bind a freshly authenticated connection to its identity.
    async fn register(&self, connection_id: ConnectionId, user_id: UserId);

    /// Identity bound to a connection.
    async fn user_of(&self, connection_id: &ConnectionId) -> Option<UserId>;

    /// Add the connection to the room. Returns `false` when it was already a member.
    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<bool, RegistryError>;

    /// Remove the connection from one room. Always succeeds.
    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId);

    /// Drop the connection and every membership it holds. Returns the rooms it was in.
    async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    async fn is_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool;

    /// Connections in the room, minus `exclude` when given. Used for fan-out.
    async fn members_of(
        &self,
        room_id: &RoomId,
        exclude: Option<&ConnectionId>,
    ) -> Vec<ConnectionId>;
}
