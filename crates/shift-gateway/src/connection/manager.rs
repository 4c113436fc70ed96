//! Connection manager
//!
//! Tracks active WebSocket connections and room membership using DashMap
//! for thread-safe access.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::protocol::GatewayMessage;

use super::Connection;

/// Manages all active WebSocket connections and their room membership
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// Room name to session IDs mapping
    rooms: DashMap<String, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Arc::new(Connection::new(session_id.clone(), sender));
        self.connections.insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection and its room memberships
    pub fn remove_connection(&self, session_id: &str) {
        if let Some((_, connection)) = self.connections.remove(session_id) {
            for room in connection.rooms() {
                self.rooms.alter(&room, |_, mut sessions| {
                    sessions.remove(session_id);
                    sessions
                });
            }
            // Drop rooms with no members left
            self.rooms.retain(|_, sessions| !sessions.is_empty());

            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Join a connection to a room
    pub fn join_room(&self, session_id: &str, room: &str) -> bool {
        let Some(connection) = self.get_connection(session_id) else {
            return false;
        };

        connection.add_room(room.to_string());
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(session_id.to_string());

        tracing::trace!(session_id = %session_id, room = %room, "Joined room");
        true
    }

    /// Remove a connection from a room
    pub fn leave_room(&self, session_id: &str, room: &str) {
        if let Some(connection) = self.get_connection(session_id) {
            connection.remove_room(room);
        }
        self.rooms.alter(room, |_, mut sessions| {
            sessions.remove(session_id);
            sessions
        });
        self.rooms.retain(|_, sessions| !sessions.is_empty());

        tracing::trace!(session_id = %session_id, room = %room, "Left room");
    }

    /// Sessions currently in a room
    pub fn room_members(&self, room: &str) -> Vec<String> {
        self.rooms
            .get(room)
            .map(|sessions| sessions.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether any local connection is in the room
    pub fn room_is_active(&self, room: &str) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|sessions| !sessions.is_empty())
    }

    /// Broadcast a message to every member of a room.
    ///
    /// Returns the number of connections the message was queued for.
    pub async fn broadcast_to_room(&self, room: &str, message: &GatewayMessage) -> usize {
        let mut delivered = 0;

        for session_id in self.room_members(room) {
            if let Some(connection) = self.get_connection(&session_id) {
                if connection.send(message.clone()).await {
                    delivered += 1;
                }
            }
        }

        tracing::trace!(room = %room, delivered = delivered, "Broadcast to room");
        delivered
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_test_connection(manager: &ConnectionManager) -> (String, mpsc::Receiver<GatewayMessage>) {
        let (tx, rx) = mpsc::channel(8);
        let session_id = Connection::generate_session_id();
        manager.add_connection(session_id.clone(), tx);
        (session_id, rx)
    }

    #[tokio::test]
    async fn test_add_and_remove_connection() {
        let manager = ConnectionManager::new();
        let (session_id, _rx) = add_test_connection(&manager);

        assert_eq!(manager.connection_count(), 1);
        assert!(manager.get_connection(&session_id).is_some());

        manager.remove_connection(&session_id);
        assert_eq!(manager.connection_count(), 0);
        assert!(manager.get_connection(&session_id).is_none());
    }

    #[tokio::test]
    async fn test_room_membership() {
        let manager = ConnectionManager::new();
        let (session_id, _rx) = add_test_connection(&manager);

        assert!(manager.join_room(&session_id, "shift:1"));
        assert!(manager.room_is_active("shift:1"));
        assert_eq!(manager.room_members("shift:1"), vec![session_id.clone()]);

        manager.leave_room(&session_id, "shift:1");
        assert!(!manager.room_is_active("shift:1"));
    }

    #[tokio::test]
    async fn test_remove_connection_cleans_rooms() {
        let manager = ConnectionManager::new();
        let (session_id, _rx) = add_test_connection(&manager);

        manager.join_room(&session_id, "facility:9");
        manager.remove_connection(&session_id);

        assert!(!manager.room_is_active("facility:9"));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_room_members_only() {
        let manager = ConnectionManager::new();
        let (member, mut member_rx) = add_test_connection(&manager);
        let (outsider, mut outsider_rx) = add_test_connection(&manager);

        manager.join_room(&member, "shift:7");

        let delivered = manager
            .broadcast_to_room("shift:7", &GatewayMessage::heartbeat_ack())
            .await;
        assert_eq!(delivered, 1);

        assert!(member_rx.try_recv().is_ok());
        assert!(outsider_rx.try_recv().is_err());
        // outsider stays registered
        assert!(manager.get_connection(&outsider).is_some());
    }
}
