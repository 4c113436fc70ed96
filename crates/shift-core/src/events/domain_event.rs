//! Domain events - events emitted when domain state changes
//!
//! These events are published to Redis pub/sub and fanned out to
//! WebSocket clients by the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ApplicationStatus, PaymentStatus};
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Shift Events
    // =========================================================================
    ShiftPosted {
        shift_id: Snowflake,
        facility_id: Snowflake,
        specialty: String,
        starts_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    ShiftAssigned {
        shift_id: Snowflake,
        facility_id: Snowflake,
        nurse_id: Snowflake,
        at: DateTime<Utc>,
    },
    ShiftCompleted {
        shift_id: Snowflake,
        facility_id: Snowflake,
        at: DateTime<Utc>,
    },
    ShiftCancelled {
        shift_id: Snowflake,
        facility_id: Snowflake,
        at: DateTime<Utc>,
    },

    // =========================================================================
    // Application Events
    // =========================================================================
    ApplicationSubmitted {
        application_id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
        at: DateTime<Utc>,
    },
    ApplicationDecided {
        application_id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    },

    // =========================================================================
    // Time Tracking Events
    // =========================================================================
    TimeRecordOpened {
        time_record_id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
        at: DateTime<Utc>,
    },
    TimeRecordClosed {
        time_record_id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
        worked_minutes: i32,
        at: DateTime<Utc>,
    },

    // =========================================================================
    // Payment Events
    // =========================================================================
    PaymentSettled {
        payment_id: Snowflake,
        time_record_id: Snowflake,
        status: PaymentStatus,
        at: DateTime<Utc>,
    },

    // =========================================================================
    // Messaging Events
    // =========================================================================
    ChatMessage {
        room: String,
        sender_id: Snowflake,
        content: String,
        at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ShiftPosted { .. } => "SHIFT_POSTED",
            Self::ShiftAssigned { .. } => "SHIFT_ASSIGNED",
            Self::ShiftCompleted { .. } => "SHIFT_COMPLETED",
            Self::ShiftCancelled { .. } => "SHIFT_CANCELLED",
            Self::ApplicationSubmitted { .. } => "APPLICATION_SUBMITTED",
            Self::ApplicationDecided { .. } => "APPLICATION_DECIDED",
            Self::TimeRecordOpened { .. } => "TIME_RECORD_OPENED",
            Self::TimeRecordClosed { .. } => "TIME_RECORD_CLOSED",
            Self::PaymentSettled { .. } => "PAYMENT_SETTLED",
            Self::ChatMessage { .. } => "CHAT_MESSAGE",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ShiftPosted { at, .. }
            | Self::ShiftAssigned { at, .. }
            | Self::ShiftCompleted { at, .. }
            | Self::ShiftCancelled { at, .. }
            | Self::ApplicationSubmitted { at, .. }
            | Self::ApplicationDecided { at, .. }
            | Self::TimeRecordOpened { at, .. }
            | Self::TimeRecordClosed { at, .. }
            | Self::PaymentSettled { at, .. }
            | Self::ChatMessage { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = DomainEvent::ShiftPosted {
            shift_id: Snowflake::new(1),
            facility_id: Snowflake::new(2),
            specialty: "ICU".into(),
            starts_at: Utc::now(),
            at: Utc::now(),
        };
        assert_eq!(event.event_type(), "SHIFT_POSTED");
    }

    #[test]
    fn test_event_serialization_tags_type() {
        let event = DomainEvent::ApplicationDecided {
            application_id: Snowflake::new(7),
            shift_id: Snowflake::new(1),
            nurse_id: Snowflake::new(5),
            status: ApplicationStatus::Accepted,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"APPLICATION_DECIDED\""));
        assert!(json.contains("\"status\":\"accepted\""));

        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type(), "APPLICATION_DECIDED");
    }
}
