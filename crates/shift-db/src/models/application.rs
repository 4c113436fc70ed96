//! ShiftApplication database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the shift_applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub shift_id: i64,
    pub nurse_id: i64,
    pub note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
