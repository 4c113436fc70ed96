//! Redis Pub/Sub publisher.
//!
//! Publishes domain events to Redis channels for distribution to
//! WebSocket clients via the gateway.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use shift_core::DomainEvent;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "SHIFT_POSTED", "APPLICATION_DECIDED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a domain event
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            data: serde_json::to_value(event)?,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish to multiple channels
    pub async fn publish_many(
        &self,
        channels: &[PubSubChannel],
        event: &PubSubEvent,
    ) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut total_receivers = 0;
        let mut conn = self.pool.get().await?;

        for channel in channels {
            let receivers: u32 = conn.publish(&channel.name(), &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            channels = channels.len(),
            event_type = %event.event_type,
            total_receivers = total_receivers,
            "Published event to multiple channels"
        );

        Ok(total_receivers)
    }

    /// Publish a domain event to every channel it concerns.
    ///
    /// Routing: shift lifecycle events reach the facility board and the
    /// shift room (plus the open-shift broadcast for new postings and the
    /// nurse channel once a nurse is involved); application and time
    /// record events reach the shift room and the nurse; payment
    /// settlements go to the broadcast channel; chat messages reach their
    /// room only.
    pub async fn publish_domain_event(&self, event: &DomainEvent) -> RedisResult<u32> {
        let wrapped = PubSubEvent::from_domain(event)?;
        let channels = Self::channels_for(event);
        self.publish_many(&channels, &wrapped).await
    }

    /// Determine the channels a domain event should be delivered to
    pub fn channels_for(event: &DomainEvent) -> Vec<PubSubChannel> {
        match event {
            DomainEvent::ShiftPosted { facility_id, .. } => vec![
                PubSubChannel::broadcast(),
                PubSubChannel::facility(*facility_id),
            ],
            DomainEvent::ShiftAssigned {
                shift_id,
                facility_id,
                nurse_id,
                ..
            } => vec![
                PubSubChannel::facility(*facility_id),
                PubSubChannel::nurse(*nurse_id),
                PubSubChannel::shift(*shift_id),
            ],
            DomainEvent::ShiftCompleted {
                shift_id,
                facility_id,
                ..
            }
            | DomainEvent::ShiftCancelled {
                shift_id,
                facility_id,
                ..
            } => vec![
                PubSubChannel::facility(*facility_id),
                PubSubChannel::shift(*shift_id),
            ],
            DomainEvent::ApplicationSubmitted {
                shift_id, nurse_id, ..
            } => vec![
                PubSubChannel::shift(*shift_id),
                PubSubChannel::nurse(*nurse_id),
            ],
            DomainEvent::ApplicationDecided {
                shift_id, nurse_id, ..
            } => vec![
                PubSubChannel::shift(*shift_id),
                PubSubChannel::nurse(*nurse_id),
            ],
            DomainEvent::TimeRecordOpened {
                shift_id, nurse_id, ..
            }
            | DomainEvent::TimeRecordClosed {
                shift_id, nurse_id, ..
            } => vec![
                PubSubChannel::shift(*shift_id),
                PubSubChannel::nurse(*nurse_id),
            ],
            DomainEvent::PaymentSettled { .. } => vec![PubSubChannel::broadcast()],
            DomainEvent::ChatMessage { room, .. } => vec![PubSubChannel::custom(room.clone())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shift_core::Snowflake;

    #[test]
    fn test_pubsub_event_creation() {
        let data = serde_json::json!({
            "shift_id": "12345",
            "specialty": "ICU"
        });

        let event = PubSubEvent::new("SHIFT_POSTED", data.clone());
        assert_eq!(event.event_type, "SHIFT_POSTED");
        assert_eq!(event.data, data);
    }

    #[test]
    fn test_from_domain_event() {
        let domain = DomainEvent::ShiftAssigned {
            shift_id: Snowflake::new(1),
            facility_id: Snowflake::new(2),
            nurse_id: Snowflake::new(3),
            at: Utc::now(),
        };

        let event = PubSubEvent::from_domain(&domain).unwrap();
        assert_eq!(event.event_type, "SHIFT_ASSIGNED");

        let json = event.to_json().unwrap();
        assert!(json.contains("SHIFT_ASSIGNED"));
    }

    #[test]
    fn test_channel_routing_for_posted_shift() {
        let event = DomainEvent::ShiftPosted {
            shift_id: Snowflake::new(1),
            facility_id: Snowflake::new(2),
            specialty: "ER".into(),
            starts_at: Utc::now(),
            at: Utc::now(),
        };

        let channels = Publisher::channels_for(&event);
        assert!(channels.contains(&PubSubChannel::Broadcast));
        assert!(channels.contains(&PubSubChannel::Facility(Snowflake::new(2))));
    }

    #[test]
    fn test_channel_routing_for_chat_message() {
        let event = DomainEvent::ChatMessage {
            room: "shift:42".into(),
            sender_id: Snowflake::new(5),
            content: "running late".into(),
            at: Utc::now(),
        };

        let channels = Publisher::channels_for(&event);
        assert_eq!(channels, vec![PubSubChannel::Custom("shift:42".into())]);
    }
}
