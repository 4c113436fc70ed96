//! # shift-cache
//!
//! Redis caching layer for auth sessions and pub/sub messaging.
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Server-side refresh token records with TTL
//! - **Pub/Sub**: Domain event distribution to the WebSocket gateway

pub mod pool;
pub mod pubsub;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberBuilder,
    SubscriberConfig, SubscriberError, SubscriberResult, BROADCAST_CHANNEL,
    FACILITY_CHANNEL_PREFIX, NURSE_CHANNEL_PREFIX, SHIFT_CHANNEL_PREFIX,
};
