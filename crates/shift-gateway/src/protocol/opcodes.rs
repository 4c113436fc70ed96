//! Gateway operation codes and close codes

use serde::{Deserialize, Serialize};

/// Operation codes for gateway messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OpCode {
    /// Server -> client: event delivery (chat broadcast, domain events)
    Dispatch = 0,
    /// Client -> server: keepalive ping
    Heartbeat = 1,
    /// Client -> server: authenticate with an access token
    Identify = 2,
    /// Client -> server: join a room
    Join = 3,
    /// Client -> server: leave a room
    Leave = 4,
    /// Client -> server: send a chat message to a room
    MessageSend = 5,
    /// Server -> client: sent immediately after connect
    Hello = 10,
    /// Server -> client: heartbeat acknowledgement
    HeartbeatAck = 11,
}

impl TryFrom<u8> for OpCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Dispatch),
            1 => Ok(Self::Heartbeat),
            2 => Ok(Self::Identify),
            3 => Ok(Self::Join),
            4 => Ok(Self::Leave),
            5 => Ok(Self::MessageSend),
            10 => Ok(Self::Hello),
            11 => Ok(Self::HeartbeatAck),
            other => Err(format!("unknown opcode: {other}")),
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

/// WebSocket close codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCode {
    UnknownError = 4000,
    UnknownOpCode = 4001,
    DecodeError = 4002,
    NotAuthenticated = 4003,
    AuthenticationFailed = 4004,
    AlreadyAuthenticated = 4005,
    HeartbeatTimeout = 4009,
}

impl CloseCode {
    /// Numeric close code for the WebSocket close frame
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Human-readable reason for the close frame
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::UnknownError => "Unknown error",
            Self::UnknownOpCode => "Unknown opcode",
            Self::DecodeError => "Decode error",
            Self::NotAuthenticated => "Not authenticated",
            Self::AuthenticationFailed => "Authentication failed",
            Self::AlreadyAuthenticated => "Already authenticated",
            Self::HeartbeatTimeout => "Heartbeat timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for op in [
            OpCode::Dispatch,
            OpCode::Heartbeat,
            OpCode::Identify,
            OpCode::Join,
            OpCode::Leave,
            OpCode::MessageSend,
            OpCode::Hello,
            OpCode::HeartbeatAck,
        ] {
            assert_eq!(OpCode::try_from(u8::from(op)).unwrap(), op);
        }
        assert!(OpCode::try_from(99).is_err());
    }

    #[test]
    fn test_opcode_serde_as_number() {
        let json = serde_json::to_string(&OpCode::Identify).unwrap();
        assert_eq!(json, "2");

        let op: OpCode = serde_json::from_str("10").unwrap();
        assert_eq!(op, OpCode::Hello);
    }

    #[test]
    fn test_close_codes() {
        assert_eq!(CloseCode::NotAuthenticated.code(), 4003);
        assert_eq!(CloseCode::HeartbeatTimeout.reason(), "Heartbeat timeout");
    }
}
