//! ShiftApplication entity - a nurse's request to work a Shift

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Application lifecycle status.
///
/// `Pending -> Accepted | Rejected`; both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Database/string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether the application has been decided
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Whether `self -> to` is a legal transition
    pub fn can_transition(&self, to: ApplicationStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ShiftApplication entity. At most one application exists per
/// (shift, nurse) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftApplication {
    pub id: Snowflake,
    pub shift_id: Snowflake,
    pub nurse_id: Snowflake,
    pub note: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShiftApplication {
    /// Create a new pending application
    pub fn new(id: Snowflake, shift_id: Snowflake, nurse_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            shift_id,
            nurse_id,
            note: None,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a cover note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Apply a guarded status transition
    pub fn decide(&mut self, to: ApplicationStatus) -> Result<(), DomainError> {
        if !self.status.can_transition(to) {
            return Err(DomainError::InvalidApplicationTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_application() -> ShiftApplication {
        ShiftApplication::new(Snowflake::new(1), Snowflake::new(100), Snowflake::new(5))
    }

    #[test]
    fn test_new_application_is_pending() {
        assert_eq!(sample_application().status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_accept_and_reject() {
        let mut app = sample_application();
        app.decide(ApplicationStatus::Accepted).unwrap();
        assert_eq!(app.status, ApplicationStatus::Accepted);

        let mut app = sample_application();
        app.decide(ApplicationStatus::Rejected).unwrap();
        assert_eq!(app.status, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_decided_application_is_frozen() {
        let mut app = sample_application();
        app.decide(ApplicationStatus::Accepted).unwrap();

        for to in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert!(matches!(
                app.decide(to),
                Err(DomainError::InvalidApplicationTransition { .. })
            ));
        }
    }

    #[test]
    fn test_pending_to_pending_rejected() {
        let mut app = sample_application();
        assert!(app.decide(ApplicationStatus::Pending).is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("approved"), None);
    }
}
