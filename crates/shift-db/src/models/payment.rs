//! Payment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the payments table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentModel {
    pub id: i64,
    pub time_record_id: i64,
    pub amount_cents: i64,
    pub reference: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
