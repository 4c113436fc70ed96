//! Gateway message format
//!
//! All WebSocket frames are JSON envelopes with an opcode and a payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::OpCode;

/// Gateway message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event type (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Event data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(heartbeat_interval_ms: u64) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            d: serde_json::to_value(HelloPayload {
                heartbeat_interval_ms,
            })
            .ok(),
        }
    }

    /// Create a Ready dispatch after successful identify
    #[must_use]
    pub fn ready(payload: ReadyPayload) -> Self {
        Self::dispatch("READY", serde_json::to_value(payload).unwrap_or_default())
    }

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            d: Some(data),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            d: None,
        }
    }

    // === Parsing Client Messages ===

    /// Parse a frame from raw JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Try to parse the payload as an Identify (op=2)
    pub fn as_identify(&self) -> Option<IdentifyPayload> {
        self.payload_as(OpCode::Identify)
    }

    /// Try to parse the payload as a Join (op=3)
    pub fn as_join(&self) -> Option<JoinPayload> {
        self.payload_as(OpCode::Join)
    }

    /// Try to parse the payload as a Leave (op=4)
    pub fn as_leave(&self) -> Option<LeavePayload> {
        self.payload_as(OpCode::Leave)
    }

    /// Try to parse the payload as a MessageSend (op=5)
    pub fn as_send(&self) -> Option<SendPayload> {
        self.payload_as(OpCode::MessageSend)
    }

    fn payload_as<T: serde::de::DeserializeOwned>(&self, op: OpCode) -> Option<T> {
        if self.op != op {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }
}

/// Hello payload (server -> client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    pub heartbeat_interval_ms: u64,
}

/// Identify payload (client -> server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Access token issued by the API
    pub token: String,
}

/// Ready payload (server -> client, after identify)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    pub session_id: String,
    pub user_id: String,
}

/// Join payload (client -> server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinPayload {
    /// Room name, e.g. "shift:123" or "facility:45"
    pub room: String,
}

/// Leave payload (client -> server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeavePayload {
    pub room: String,
}

/// MessageSend payload (client -> server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendPayload {
    pub room: String,
    pub content: String,
}

/// Domain event payload (server -> client, inside a Dispatch)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub channel: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_roundtrip() {
        let hello = GatewayMessage::hello(45_000);
        let json = hello.to_json().unwrap();
        assert!(json.contains("\"op\":10"));

        let parsed = GatewayMessage::from_json(&json).unwrap();
        assert_eq!(parsed.op, OpCode::Hello);
    }

    #[test]
    fn test_identify_parsing() {
        let frame = GatewayMessage::from_json(r#"{"op":2,"d":{"token":"abc.def.ghi"}}"#).unwrap();
        let identify = frame.as_identify().unwrap();
        assert_eq!(identify.token, "abc.def.ghi");

        // Wrong opcode parses as None
        assert!(frame.as_join().is_none());
    }

    #[test]
    fn test_send_parsing() {
        let frame = GatewayMessage::from_json(
            r#"{"op":5,"d":{"room":"shift:42","content":"running late"}}"#,
        )
        .unwrap();
        let send = frame.as_send().unwrap();
        assert_eq!(send.room, "shift:42");
        assert_eq!(send.content, "running late");
    }

    #[test]
    fn test_unknown_opcode_fails_decode() {
        assert!(GatewayMessage::from_json(r#"{"op":99}"#).is_err());
    }

    #[test]
    fn test_dispatch_carries_event_type() {
        let msg = GatewayMessage::dispatch("MESSAGE_BROADCAST", serde_json::json!({"x": 1}));
        let json = msg.to_json().unwrap();
        assert!(json.contains("\"t\":\"MESSAGE_BROADCAST\""));
    }
}
