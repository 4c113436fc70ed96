//! TimeRecord database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the time_records table
#[derive(Debug, Clone, FromRow)]
pub struct TimeRecordModel {
    pub id: i64,
    pub shift_id: i64,
    pub nurse_id: i64,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,
    pub worked_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
