//! License and Certification database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the licenses table
#[derive(Debug, Clone, FromRow)]
pub struct LicenseModel {
    pub id: i64,
    pub nurse_id: i64,
    pub license_number: String,
    pub state: String,
    pub kind: String,
    pub expires_at: DateTime<Utc>,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the certifications table
#[derive(Debug, Clone, FromRow)]
pub struct CertificationModel {
    pub id: i64,
    pub nurse_id: i64,
    pub name: String,
    pub issuing_body: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
