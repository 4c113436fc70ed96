//! Shift entity - a facility-posted work slot with time window and pay rate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Shift lifecycle status.
///
/// Transitions are guarded: `Open -> Assigned | Cancelled`,
/// `Assigned -> Completed | Cancelled`. `Completed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Open,
    Assigned,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    /// Database/string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "assigned" => Some(Self::Assigned),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether no further transitions are possible
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `self -> to` is a legal transition
    pub fn can_transition(&self, to: ShiftStatus) -> bool {
        matches!(
            (self, to),
            (Self::Open, Self::Assigned)
                | (Self::Open, Self::Cancelled)
                | (Self::Assigned, Self::Completed)
                | (Self::Assigned, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: Snowflake,
    pub facility_id: Snowflake,
    pub specialty: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Hourly pay rate in integer cents
    pub hourly_rate_cents: i64,
    pub requirements: Vec<String>,
    pub notes: Option<String>,
    pub status: ShiftStatus,
    /// The nurse profile assigned to work this shift, once accepted
    pub assigned_nurse_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    /// Create a new open Shift
    pub fn new(
        id: Snowflake,
        facility_id: Snowflake,
        specialty: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        hourly_rate_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            facility_id,
            specialty,
            starts_at,
            ends_at,
            hourly_rate_cents,
            requirements: Vec::new(),
            notes: None,
            status: ShiftStatus::Open,
            assigned_nurse_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach requirements
    pub fn with_requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = requirements;
        self
    }

    /// Attach free-form notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether the time window is ordered (end strictly after start)
    pub fn has_valid_window(&self) -> bool {
        self.ends_at > self.starts_at
    }

    /// Scheduled length of the shift in whole minutes
    pub fn scheduled_minutes(&self) -> i64 {
        (self.ends_at - self.starts_at).num_minutes()
    }

    /// Whether the shift may be deleted (only while open)
    #[inline]
    pub fn is_deletable(&self) -> bool {
        self.status == ShiftStatus::Open
    }

    /// Apply a guarded status transition
    pub fn transition(&mut self, to: ShiftStatus) -> Result<(), DomainError> {
        if !self.status.can_transition(to) {
            return Err(DomainError::InvalidShiftTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assign the shift to a nurse (only while open)
    pub fn assign(&mut self, nurse_id: Snowflake) -> Result<(), DomainError> {
        if self.status != ShiftStatus::Open {
            return Err(DomainError::ShiftNotOpen);
        }
        self.assigned_nurse_id = Some(nurse_id);
        self.transition(ShiftStatus::Assigned)
    }

    /// Whether the given nurse is assigned to work this shift
    pub fn is_assigned_to(&self, nurse_id: Snowflake) -> bool {
        self.status == ShiftStatus::Assigned && self.assigned_nurse_id == Some(nurse_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_shift() -> Shift {
        let starts = Utc::now() + Duration::days(1);
        Shift::new(
            Snowflake::new(100),
            Snowflake::new(10),
            "ICU".into(),
            starts,
            starts + Duration::hours(8),
            6200,
        )
    }

    #[test]
    fn test_new_shift_is_open() {
        let shift = sample_shift();
        assert_eq!(shift.status, ShiftStatus::Open);
        assert!(shift.is_deletable());
        assert!(shift.assigned_nurse_id.is_none());
    }

    #[test]
    fn test_window_validation() {
        let mut shift = sample_shift();
        assert!(shift.has_valid_window());
        assert_eq!(shift.scheduled_minutes(), 480);

        shift.ends_at = shift.starts_at;
        assert!(!shift.has_valid_window());
    }

    #[test]
    fn test_assign_open_shift() {
        let mut shift = sample_shift();
        shift.assign(Snowflake::new(5)).unwrap();
        assert_eq!(shift.status, ShiftStatus::Assigned);
        assert!(shift.is_assigned_to(Snowflake::new(5)));
        assert!(!shift.is_deletable());
    }

    #[test]
    fn test_assign_rejected_when_not_open() {
        let mut shift = sample_shift();
        shift.assign(Snowflake::new(5)).unwrap();
        let err = shift.assign(Snowflake::new(6)).unwrap_err();
        assert!(matches!(err, DomainError::ShiftNotOpen));
    }

    #[test]
    fn test_legal_transitions() {
        let mut shift = sample_shift();
        shift.transition(ShiftStatus::Cancelled).unwrap();
        assert!(shift.status.is_terminal());

        let mut shift = sample_shift();
        shift.assign(Snowflake::new(5)).unwrap();
        shift.transition(ShiftStatus::Completed).unwrap();
        assert_eq!(shift.status, ShiftStatus::Completed);
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        let mut shift = sample_shift();
        shift.transition(ShiftStatus::Cancelled).unwrap();

        for to in [
            ShiftStatus::Open,
            ShiftStatus::Assigned,
            ShiftStatus::Completed,
            ShiftStatus::Cancelled,
        ] {
            assert!(matches!(
                shift.transition(to),
                Err(DomainError::InvalidShiftTransition { .. })
            ));
        }
    }

    #[test]
    fn test_open_cannot_jump_to_completed() {
        let mut shift = sample_shift();
        assert!(shift.transition(ShiftStatus::Completed).is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ShiftStatus::Open,
            ShiftStatus::Assigned,
            ShiftStatus::Completed,
            ShiftStatus::Cancelled,
        ] {
            assert_eq!(ShiftStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ShiftStatus::parse("reopened"), None);
    }
}
