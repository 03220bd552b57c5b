//! InMemory Connection Registry 実装
//!
//! 接続ハンドルをキーとした接続のアリーナと、room → 接続集合の逆引きインデックスを
//! 1 つのロックで保護します。両者は常に同じロックの中で更新されるため、
//! どちらか一方だけが更新された状態は外から観測されません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, RegistryError, RoomId, UserId};

struct ConnectionEntry {
    user_id: UserId,
    rooms: HashSet<RoomId>,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl RegistryState {
    fn detach(&mut self, connection_id: &ConnectionId, room_id: &RoomId) {
        if let Some(members) = self.rooms.get_mut(room_id) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(room_id);
            }
        }
    }
}

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続中の接続数
    pub async fn count_connections(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// メンバーが 1 人以上いる room の数
    pub async fn count_rooms(&self) -> usize {
        self.state.lock().await.rooms.len()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection_id: ConnectionId, user_id: UserId) {
        let mut state = self.state.lock().await;
        state.connections.insert(
            connection_id,
            ConnectionEntry {
                user_id,
                rooms: HashSet::new(),
            },
        );
    }

    async fn user_of(&self, connection_id: &ConnectionId) -> Option<UserId> {
        let state = self.state.lock().await;
        state
            .connections
            .get(connection_id)
            .map(|entry| entry.user_id.clone())
    }

    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<bool, RegistryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::UnknownConnection(connection_id.to_string()))?;
        let newly_joined = entry.rooms.insert(room_id.clone());
        state
            .rooms
            .entry(room_id.clone())
            .or_default()
            .insert(*connection_id);
        Ok(newly_joined)
    }

    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        let mut state = self.state.lock().await;
        if let Some(entry) = state.connections.get_mut(connection_id) {
            entry.rooms.remove(room_id);
        }
        state.detach(connection_id, room_id);
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let mut state = self.state.lock().await;
        let Some(entry) = state.connections.remove(connection_id) else {
            return Vec::new();
        };
        let rooms: Vec<RoomId> = entry.rooms.into_iter().collect();
        for room_id in &rooms {
            state.detach(connection_id, room_id);
        }
        rooms
    }

    async fn is_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .is_some_and(|members| members.contains(connection_id))
    }

    async fn members_of(
        &self,
        room_id: &RoomId,
        exclude: Option<&ConnectionId>,
    ) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|id| Some(*id) != exclude)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}
