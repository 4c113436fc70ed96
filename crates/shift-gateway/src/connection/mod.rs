//! Connection state and registry

mod manager;

use std::collections::HashSet;
use std::time::Instant;

use parking_lot::RwLock;
use shift_core::Snowflake;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::GatewayMessage;

pub use manager::ConnectionManager;

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,
    /// Authenticated user, set by Identify
    user_id: RwLock<Option<Snowflake>>,
    /// Rooms this connection has joined
    rooms: RwLock<HashSet<String>>,
    /// Last heartbeat receipt
    last_heartbeat: RwLock<Instant>,
    /// Outgoing message channel
    sender: mpsc::Sender<GatewayMessage>,
}

impl Connection {
    /// Create a new unauthenticated connection
    pub fn new(session_id: String, sender: mpsc::Sender<GatewayMessage>) -> Self {
        Self {
            session_id,
            user_id: RwLock::new(None),
            rooms: RwLock::new(HashSet::new()),
            last_heartbeat: RwLock::new(Instant::now()),
            sender,
        }
    }

    /// Generate a fresh session ID
    pub fn generate_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the authenticated user, if identified
    pub fn user_id(&self) -> Option<Snowflake> {
        *self.user_id.read()
    }

    /// Whether Identify has completed
    pub fn is_identified(&self) -> bool {
        self.user_id.read().is_some()
    }

    /// Mark the connection authenticated
    pub fn set_user_id(&self, user_id: Snowflake) {
        *self.user_id.write() = Some(user_id);
    }

    /// Rooms this connection has joined
    pub fn rooms(&self) -> Vec<String> {
        self.rooms.read().iter().cloned().collect()
    }

    /// Whether the connection is in the given room
    pub fn in_room(&self, room: &str) -> bool {
        self.rooms.read().contains(room)
    }

    /// Track a joined room
    pub fn add_room(&self, room: String) {
        self.rooms.write().insert(room);
    }

    /// Untrack a left room
    pub fn remove_room(&self, room: &str) {
        self.rooms.write().remove(room);
    }

    /// Record a heartbeat receipt
    pub fn touch_heartbeat(&self) {
        *self.last_heartbeat.write() = Instant::now();
    }

    /// Milliseconds since the last heartbeat
    pub fn millis_since_heartbeat(&self) -> u128 {
        self.last_heartbeat.read().elapsed().as_millis()
    }

    /// Queue an outgoing message; returns false if the connection is gone
    pub async fn send(&self, message: GatewayMessage) -> bool {
        self.sender.send(message).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> Connection {
        let (tx, _rx) = mpsc::channel(8);
        Connection::new(Connection::generate_session_id(), tx)
    }

    #[test]
    fn test_new_connection_is_unidentified() {
        let conn = test_connection();
        assert!(!conn.is_identified());
        assert!(conn.user_id().is_none());
        assert!(conn.rooms().is_empty());
    }

    #[test]
    fn test_identify_sets_user() {
        let conn = test_connection();
        conn.set_user_id(Snowflake::new(7));
        assert!(conn.is_identified());
        assert_eq!(conn.user_id(), Some(Snowflake::new(7)));
    }

    #[test]
    fn test_room_tracking() {
        let conn = test_connection();
        conn.add_room("shift:1".to_string());
        assert!(conn.in_room("shift:1"));
        assert!(!conn.in_room("shift:2"));

        conn.remove_room("shift:1");
        assert!(!conn.in_room("shift:1"));
    }
}
