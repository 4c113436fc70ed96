//! Pub/Sub channel definitions.
//!
//! Defines the channel naming conventions for Redis Pub/Sub.

use shift_core::Snowflake;

/// Channel prefix for facility events
pub const FACILITY_CHANNEL_PREFIX: &str = "facility:";
/// Channel prefix for nurse-specific events
pub const NURSE_CHANNEL_PREFIX: &str = "nurse:";
/// Channel prefix for shift-specific events (shift chat rooms included)
pub const SHIFT_CHANNEL_PREFIX: &str = "shift:";
/// Channel for broadcast events (all connected clients)
pub const BROADCAST_CHANNEL: &str = "broadcast";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events for a specific facility (admins watching its board)
    Facility(Snowflake),
    /// Events for a specific nurse (all their sessions)
    Nurse(Snowflake),
    /// Events for a specific shift (chat room + lifecycle updates)
    Shift(Snowflake),
    /// Broadcast to all connected clients
    Broadcast,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create a facility channel
    #[must_use]
    pub fn facility(facility_id: Snowflake) -> Self {
        Self::Facility(facility_id)
    }

    /// Create a nurse channel
    #[must_use]
    pub fn nurse(nurse_id: Snowflake) -> Self {
        Self::Nurse(nurse_id)
    }

    /// Create a shift channel
    #[must_use]
    pub fn shift(shift_id: Snowflake) -> Self {
        Self::Shift(shift_id)
    }

    /// Create a broadcast channel
    #[must_use]
    pub fn broadcast() -> Self {
        Self::Broadcast
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Facility(id) => format!("{FACILITY_CHANNEL_PREFIX}{id}"),
            Self::Nurse(id) => format!("{NURSE_CHANNEL_PREFIX}{id}"),
            Self::Shift(id) => format!("{SHIFT_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        if let Some(id_str) = name.strip_prefix(FACILITY_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Facility(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(NURSE_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Nurse(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(SHIFT_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Shift(Snowflake::from(id));
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let facility_id = Snowflake::from(12345i64);
        let nurse_id = Snowflake::from(67890i64);
        let shift_id = Snowflake::from(11111i64);

        assert_eq!(
            PubSubChannel::facility(facility_id).name(),
            "facility:12345"
        );
        assert_eq!(PubSubChannel::nurse(nurse_id).name(), "nurse:67890");
        assert_eq!(PubSubChannel::shift(shift_id).name(), "shift:11111");
        assert_eq!(PubSubChannel::broadcast().name(), "broadcast");
        assert_eq!(PubSubChannel::custom("test").name(), "test");
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(
            PubSubChannel::parse("facility:12345"),
            PubSubChannel::Facility(Snowflake::from(12345i64))
        );
        assert_eq!(
            PubSubChannel::parse("nurse:67890"),
            PubSubChannel::Nurse(Snowflake::from(67890i64))
        );
        assert_eq!(
            PubSubChannel::parse("shift:11111"),
            PubSubChannel::Shift(Snowflake::from(11111i64))
        );
        assert_eq!(PubSubChannel::parse("broadcast"), PubSubChannel::Broadcast);
        assert_eq!(
            PubSubChannel::parse("unknown:123"),
            PubSubChannel::Custom("unknown:123".to_string())
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let channels = [
            PubSubChannel::facility(Snowflake::from(1i64)),
            PubSubChannel::nurse(Snowflake::from(2i64)),
            PubSubChannel::shift(Snowflake::from(3i64)),
            PubSubChannel::broadcast(),
        ];
        for channel in channels {
            assert_eq!(PubSubChannel::parse(&channel.name()), channel);
        }
    }
}
