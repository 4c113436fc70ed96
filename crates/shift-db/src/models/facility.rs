//! Facility database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the facilities table
#[derive(Debug, Clone, FromRow)]
pub struct FacilityModel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
