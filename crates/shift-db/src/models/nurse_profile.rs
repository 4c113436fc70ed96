//! NurseProfile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the nurse_profiles table
#[derive(Debug, Clone, FromRow)]
pub struct NurseProfileModel {
    pub id: i64,
    pub user_id: i64,
    pub specialty: String,
    pub years_experience: i32,
    pub desired_hourly_rate_cents: i64,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
