//! Pub/Sub messaging over Redis
//!
//! The API publishes domain events here; the gateway subscribes and fans
//! them out to connected WebSocket clients.

mod channels;
mod publisher;
mod subscriber;

pub use channels::{
    PubSubChannel, BROADCAST_CHANNEL, FACILITY_CHANNEL_PREFIX, NURSE_CHANNEL_PREFIX,
    SHIFT_CHANNEL_PREFIX,
};
pub use publisher::{PubSubEvent, Publisher};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
