//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Request structs
//! here are plain serializable mirrors of the API contract so the tests
//! exercise the real wire format.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn unique_nurse() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("nurse{suffix}@example.com"),
            password: "TestPass123".to_string(),
            role: "nurse".to_string(),
            first_name: "Test".to_string(),
            last_name: format!("Nurse{suffix}"),
        }
    }

    pub fn unique_admin() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("admin{suffix}@example.com"),
            password: "TestPass123".to_string(),
            role: "admin".to_string(),
            first_name: "Test".to_string(),
            last_name: format!("Admin{suffix}"),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

// ============================================================================
// Nurse Profiles
// ============================================================================

/// Create nurse profile request
#[derive(Debug, Serialize)]
pub struct CreateNurseProfileRequest {
    pub specialty: String,
    pub years_experience: i32,
    pub desired_hourly_rate_cents: i64,
}

impl CreateNurseProfileRequest {
    pub fn icu() -> Self {
        Self {
            specialty: "ICU".to_string(),
            years_experience: 5,
            desired_hourly_rate_cents: 5500,
        }
    }
}

/// Nurse profile response
#[derive(Debug, Deserialize)]
pub struct NurseProfileResponse {
    pub id: String,
    pub user_id: String,
    pub specialty: String,
    pub years_experience: i32,
    pub desired_hourly_rate_cents: i64,
}

// ============================================================================
// Facilities
// ============================================================================

/// Create facility request
#[derive(Debug, Serialize)]
pub struct CreateFacilityRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl CreateFacilityRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Medical Center {suffix}"),
            address: "400 Oak St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            postal_code: "80203".to_string(),
        }
    }
}

/// Facility response
#[derive(Debug, Deserialize)]
pub struct FacilityResponse {
    pub id: String,
    pub name: String,
    pub city: String,
}

// ============================================================================
// Shifts
// ============================================================================

/// Create shift request
#[derive(Debug, Serialize)]
pub struct CreateShiftRequest {
    pub specialty: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub hourly_rate_cents: i64,
    pub requirements: Vec<String>,
    pub notes: Option<String>,
}

impl CreateShiftRequest {
    /// An 8-hour ICU shift starting tomorrow
    pub fn icu_tomorrow() -> Self {
        let starts = Utc::now() + Duration::days(1);
        Self {
            specialty: "ICU".to_string(),
            starts_at: starts,
            ends_at: starts + Duration::hours(8),
            hourly_rate_cents: 6200,
            requirements: vec!["BLS".to_string(), "ACLS".to_string()],
            notes: Some("Night shift".to_string()),
        }
    }
}

/// Shift response
#[derive(Debug, Deserialize)]
pub struct ShiftResponse {
    pub id: String,
    pub facility_id: String,
    pub specialty: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub hourly_rate_cents: i64,
    pub requirements: Vec<String>,
    pub notes: Option<String>,
    pub status: String,
    pub assigned_nurse_id: Option<String>,
}

// ============================================================================
// Applications
// ============================================================================

/// Apply to shift request
#[derive(Debug, Serialize)]
pub struct ApplyToShiftRequest {
    pub note: Option<String>,
}

/// Application response
#[derive(Debug, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub shift_id: String,
    pub nurse_id: String,
    pub status: String,
}

// ============================================================================
// Time Records & Payments
// ============================================================================

/// Time record response
#[derive(Debug, Deserialize)]
pub struct TimeRecordResponse {
    pub id: String,
    pub shift_id: String,
    pub nurse_id: String,
    pub worked_minutes: Option<i32>,
}

/// Clock-out response
#[derive(Debug, Deserialize)]
pub struct ClockOutResponse {
    pub record: TimeRecordResponse,
    pub worked_minutes: i32,
}

/// Create payment request
#[derive(Debug, Serialize)]
pub struct CreatePaymentRequest {
    pub time_record_id: String,
}

/// Payment response
#[derive(Debug, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub time_record_id: String,
    pub amount_cents: i64,
    pub reference: String,
    pub status: String,
}
