//! Gateway wire protocol

mod messages;
mod opcodes;

pub use messages::{
    EventPayload, GatewayMessage, HelloPayload, IdentifyPayload, JoinPayload, LeavePayload,
    ReadyPayload, SendPayload,
};
pub use opcodes::{CloseCode, OpCode};
