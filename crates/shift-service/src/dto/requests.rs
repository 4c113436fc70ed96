//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies with field constraints
//! also implement `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shift_core::{PaymentStatus, UserRole};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    pub role: UserRole,

    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

// ============================================================================
// Nurse Profile Requests
// ============================================================================

/// Create nurse profile request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNurseProfileRequest {
    #[validate(length(min = 1, max = 64, message = "Specialty must be 1-64 characters"))]
    pub specialty: String,

    #[validate(range(min = 0, max = 60, message = "Experience must be 0-60 years"))]
    pub years_experience: i32,

    #[validate(range(min = 1, message = "Desired rate must be positive"))]
    pub desired_hourly_rate_cents: i64,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 64, message = "City must be at most 64 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 32, message = "State must be at most 32 characters"))]
    pub state: Option<String>,
}

/// Update nurse profile request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNurseProfileRequest {
    #[validate(length(min = 1, max = 64, message = "Specialty must be 1-64 characters"))]
    pub specialty: Option<String>,

    #[validate(range(min = 0, max = 60, message = "Experience must be 0-60 years"))]
    pub years_experience: Option<i32>,

    #[validate(range(min = 1, message = "Desired rate must be positive"))]
    pub desired_hourly_rate_cents: Option<i64>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 64, message = "City must be at most 64 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 32, message = "State must be at most 32 characters"))]
    pub state: Option<String>,
}

// ============================================================================
// Facility Requests
// ============================================================================

/// Create facility request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFacilityRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 256, message = "Address must be 1-256 characters"))]
    pub address: String,

    #[validate(length(min = 1, max = 64, message = "City must be 1-64 characters"))]
    pub city: String,

    #[validate(length(min = 1, max = 32, message = "State must be 1-32 characters"))]
    pub state: String,

    #[validate(length(min = 1, max = 16, message = "Postal code must be 1-16 characters"))]
    pub postal_code: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Update facility request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFacilityRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 256, message = "Address must be 1-256 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 64, message = "City must be 1-64 characters"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 32, message = "State must be 1-32 characters"))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 16, message = "Postal code must be 1-16 characters"))]
    pub postal_code: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

// ============================================================================
// Shift Requests
// ============================================================================

/// Create shift request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShiftRequest {
    #[validate(length(min = 1, max = 64, message = "Specialty must be 1-64 characters"))]
    pub specialty: String,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,

    #[validate(range(min = 1, message = "Hourly rate must be positive"))]
    pub hourly_rate_cents: i64,

    /// Requirement tags, e.g. ["BLS", "ACLS"]
    #[serde(default)]
    pub requirements: Vec<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Update shift request (only while the shift is still open)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateShiftRequest {
    #[validate(length(min = 1, max = 64, message = "Specialty must be 1-64 characters"))]
    pub specialty: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Hourly rate must be positive"))]
    pub hourly_rate_cents: Option<i64>,

    pub requirements: Option<Vec<String>>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Application Requests
// ============================================================================

/// Apply to shift request
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct ApplyToShiftRequest {
    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

// ============================================================================
// Credential Requests
// ============================================================================

/// Create license request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLicenseRequest {
    #[validate(length(min = 1, max = 64, message = "License number must be 1-64 characters"))]
    pub license_number: String,

    #[validate(length(min = 1, max = 32, message = "State must be 1-32 characters"))]
    pub state: String,

    /// License kind, e.g. "RN", "LPN"
    #[validate(length(min = 1, max = 32, message = "Kind must be 1-32 characters"))]
    pub kind: String,

    pub expires_at: DateTime<Utc>,

    #[validate(url(message = "Invalid document URL"))]
    pub document_url: Option<String>,
}

/// Update license request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLicenseRequest {
    #[validate(length(min = 1, max = 64, message = "License number must be 1-64 characters"))]
    pub license_number: Option<String>,

    #[validate(length(min = 1, max = 32, message = "State must be 1-32 characters"))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Kind must be 1-32 characters"))]
    pub kind: Option<String>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(url(message = "Invalid document URL"))]
    pub document_url: Option<String>,
}

/// Create certification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCertificationRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 128, message = "Issuing body must be 1-128 characters"))]
    pub issuing_body: String,

    pub issued_at: DateTime<Utc>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(url(message = "Invalid document URL"))]
    pub document_url: Option<String>,
}

/// Update certification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCertificationRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 128, message = "Issuing body must be 1-128 characters"))]
    pub issuing_body: Option<String>,

    pub issued_at: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(url(message = "Invalid document URL"))]
    pub document_url: Option<String>,
}

// ============================================================================
// Payment Requests
// ============================================================================

/// Create payment request
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    /// Time record to settle (Snowflake as string)
    pub time_record_id: String,
}

/// Update payment status request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentRequest {
    /// Target status (guarded by the payment state machine)
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "nora@example.com".to_string(),
            password: "NightShift42".to_string(),
            role: UserRole::Nurse,
            first_name: "Nora".to_string(),
            last_name: "Reyes".to_string(),
            phone: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let empty_name = RegisterRequest {
            first_name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_create_shift_validation() {
        let valid = CreateShiftRequest {
            specialty: "ICU".to_string(),
            starts_at: Utc::now(),
            ends_at: Utc::now(),
            hourly_rate_cents: 6200,
            requirements: vec![],
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let zero_rate = CreateShiftRequest {
            hourly_rate_cents: 0,
            ..valid.clone()
        };
        assert!(zero_rate.validate().is_err());

        let empty_specialty = CreateShiftRequest {
            specialty: String::new(),
            ..valid
        };
        assert!(empty_specialty.validate().is_err());
    }

    #[test]
    fn test_create_nurse_profile_validation() {
        let valid = CreateNurseProfileRequest {
            specialty: "ER".to_string(),
            years_experience: 4,
            desired_hourly_rate_cents: 5200,
            bio: None,
            city: None,
            state: None,
        };
        assert!(valid.validate().is_ok());

        let negative_experience = CreateNurseProfileRequest {
            years_experience: -1,
            ..valid
        };
        assert!(negative_experience.validate().is_err());
    }

    #[test]
    fn test_apply_note_length() {
        let valid = ApplyToShiftRequest {
            note: Some("available all week".to_string()),
        };
        assert!(valid.validate().is_ok());

        let too_long = ApplyToShiftRequest {
            note: Some("a".repeat(1001)),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{
                "email": "a@b.com",
                "password": "NightShift42",
                "role": "admin",
                "first_name": "Ada",
                "last_name": "Park"
            }"#,
        )
        .unwrap();
        assert_eq!(request.role, UserRole::Admin);
    }
}
