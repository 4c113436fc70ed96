//! TimeRecord entity - clock-in/out record tied to a Shift and nurse

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Clock-in/out record for a nurse working a shift. The basis for Payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRecord {
    pub id: Snowflake,
    pub shift_id: Snowflake,
    pub nurse_id: Snowflake,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,
    /// Whole minutes worked, computed at clock-out
    pub worked_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeRecord {
    /// Create a new open TimeRecord at clock-in
    pub fn new(
        id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
        clock_in_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            shift_id,
            nurse_id,
            clock_in_at,
            clock_out_at: None,
            worked_minutes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record has not been clocked out yet
    #[inline]
    pub fn is_open(&self) -> bool {
        self.clock_out_at.is_none()
    }

    /// Clock out and compute worked minutes.
    ///
    /// Clock-out must be strictly after clock-in; a record can only be
    /// closed once.
    pub fn close(&mut self, clock_out_at: DateTime<Utc>) -> Result<i32, DomainError> {
        if !self.is_open() {
            return Err(DomainError::TimeRecordAlreadyClosed);
        }
        if clock_out_at <= self.clock_in_at {
            return Err(DomainError::ClockOutBeforeClockIn);
        }

        let minutes = (clock_out_at - self.clock_in_at).num_minutes() as i32;
        self.clock_out_at = Some(clock_out_at);
        self.worked_minutes = Some(minutes);
        self.updated_at = Utc::now();
        Ok(minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn open_record() -> TimeRecord {
        TimeRecord::new(
            Snowflake::new(1),
            Snowflake::new(100),
            Snowflake::new(5),
            Utc::now() - Duration::hours(8),
        )
    }

    #[test]
    fn test_new_record_is_open() {
        let record = open_record();
        assert!(record.is_open());
        assert!(record.worked_minutes.is_none());
    }

    #[test]
    fn test_close_computes_minutes() {
        let mut record = open_record();
        let out = record.clock_in_at + Duration::hours(7) + Duration::minutes(30);
        let minutes = record.close(out).unwrap();
        assert_eq!(minutes, 450);
        assert!(!record.is_open());
        assert_eq!(record.worked_minutes, Some(450));
    }

    #[test]
    fn test_close_twice_rejected() {
        let mut record = open_record();
        record.close(record.clock_in_at + Duration::hours(8)).unwrap();
        let err = record
            .close(record.clock_in_at + Duration::hours(9))
            .unwrap_err();
        assert!(matches!(err, DomainError::TimeRecordAlreadyClosed));
    }

    #[test]
    fn test_clock_out_before_clock_in_rejected() {
        let mut record = open_record();
        let err = record
            .close(record.clock_in_at - Duration::minutes(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::ClockOutBeforeClockIn));

        // Equal timestamps are also invalid
        let err = record.close(record.clock_in_at).unwrap_err();
        assert!(matches!(err, DomainError::ClockOutBeforeClockIn));
    }
}
