//! Shift database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the shifts table
#[derive(Debug, Clone, FromRow)]
pub struct ShiftModel {
    pub id: i64,
    pub facility_id: i64,
    pub specialty: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub hourly_rate_cents: i64,
    pub requirements: Vec<String>,
    pub notes: Option<String>,
    pub status: String,
    pub assigned_nurse_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
