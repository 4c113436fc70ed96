//! # shift-gateway
//!
//! WebSocket gateway providing room-based chat broadcast and delivery of
//! domain events received over Redis pub/sub.

pub mod connection;
pub mod events;
pub mod protocol;
pub mod server;

pub use server::{gateway_router, GatewayState};
