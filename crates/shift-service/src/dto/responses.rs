//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shift_core::{ApplicationStatus, PaymentStatus, ShiftStatus, UserRole};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Nurse Profile Responses
// ============================================================================

/// Nurse profile response
#[derive(Debug, Clone, Serialize)]
pub struct NurseProfileResponse {
    pub id: String,
    pub user_id: String,
    pub specialty: String,
    pub years_experience: i32,
    pub desired_hourly_rate_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Facility Responses
// ============================================================================

/// Facility response
#[derive(Debug, Clone, Serialize)]
pub struct FacilityResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Shift Responses
// ============================================================================

/// Shift response
#[derive(Debug, Clone, Serialize)]
pub struct ShiftResponse {
    pub id: String,
    pub facility_id: String,
    pub specialty: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub hourly_rate_cents: i64,
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ShiftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_nurse_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Application Responses
// ============================================================================

/// Shift application response
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub shift_id: String,
    pub nurse_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Credential Responses
// ============================================================================

/// License response
#[derive(Debug, Clone, Serialize)]
pub struct LicenseResponse {
    pub id: String,
    pub nurse_id: String,
    pub license_number: String,
    pub state: String,
    pub kind: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub expired: bool,
    pub created_at: DateTime<Utc>,
}

/// Certification response
#[derive(Debug, Clone, Serialize)]
pub struct CertificationResponse {
    pub id: String,
    pub nurse_id: String,
    pub name: String,
    pub issuing_body: String,
    pub issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub expired: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Time Record Responses
// ============================================================================

/// Time record response
#[derive(Debug, Clone, Serialize)]
pub struct TimeRecordResponse {
    pub id: String,
    pub shift_id: String,
    pub nurse_id: String,
    pub clock_in_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_minutes: Option<i32>,
}

/// Clock-out response, pairing the closed record with the computed minutes
#[derive(Debug, Serialize)]
pub struct ClockOutResponse {
    pub record: TimeRecordResponse,
    pub worked_minutes: i32,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, redis: bool) -> Self {
        Self {
            status: if database && redis { "ready" } else { "degraded" },
            database,
            redis,
        }
    }
}

// ============================================================================
// Payment Responses
// ============================================================================

/// Payment response
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub time_record_id: String,
    pub amount_cents: i64,
    pub reference: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
