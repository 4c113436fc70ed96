//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::{ApplicationStatus, PaymentStatus, ShiftStatus};
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Nurse profile not found: {0}")]
    NurseProfileNotFound(Snowflake),

    #[error("Facility not found: {0}")]
    FacilityNotFound(Snowflake),

    #[error("Shift not found: {0}")]
    ShiftNotFound(Snowflake),

    #[error("Application not found: {0}")]
    ApplicationNotFound(Snowflake),

    #[error("License not found: {0}")]
    LicenseNotFound(Snowflake),

    #[error("Certification not found: {0}")]
    CertificationNotFound(Snowflake),

    #[error("Time record not found: {0}")]
    TimeRecordNotFound(Snowflake),

    #[error("Payment not found: {0}")]
    PaymentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Shift must end after it starts")]
    InvalidTimeWindow,

    #[error("Hourly rate must be positive")]
    InvalidRate,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Requires the {0} role")]
    RoleRequired(&'static str),

    #[error("Not the owner of this nurse profile")]
    NotProfileOwner,

    #[error("Not the nurse assigned to this shift")]
    NotAssignedNurse,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Nurse profile already exists for this user")]
    NurseProfileAlreadyExists,

    #[error("Already applied to this shift")]
    DuplicateApplication,

    #[error("Already clocked in for this shift")]
    AlreadyClockedIn,

    #[error("Payment already exists for this time record")]
    PaymentAlreadyExists,

    // =========================================================================
    // State Machine Violations
    // =========================================================================
    #[error("Illegal shift transition: {from} -> {to}")]
    InvalidShiftTransition { from: ShiftStatus, to: ShiftStatus },

    #[error("Illegal application transition: {from} -> {to}")]
    InvalidApplicationTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Illegal payment transition: {from} -> {to}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Shift is no longer open")]
    ShiftNotOpen,

    #[error("Shift is not assigned")]
    ShiftNotAssigned,

    #[error("Only open shifts can be deleted")]
    ShiftNotDeletable,

    #[error("Time record already clocked out")]
    TimeRecordAlreadyClosed,

    #[error("Time record is still open")]
    TimeRecordStillOpen,

    #[error("Clock-out must be after clock-in")]
    ClockOutBeforeClockIn,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NurseProfileNotFound(_) => "UNKNOWN_NURSE_PROFILE",
            Self::FacilityNotFound(_) => "UNKNOWN_FACILITY",
            Self::ShiftNotFound(_) => "UNKNOWN_SHIFT",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::LicenseNotFound(_) => "UNKNOWN_LICENSE",
            Self::CertificationNotFound(_) => "UNKNOWN_CERTIFICATION",
            Self::TimeRecordNotFound(_) => "UNKNOWN_TIME_RECORD",
            Self::PaymentNotFound(_) => "UNKNOWN_PAYMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidTimeWindow => "INVALID_TIME_WINDOW",
            Self::InvalidRate => "INVALID_RATE",

            // Authorization
            Self::RoleRequired(_) => "ROLE_REQUIRED",
            Self::NotProfileOwner => "NOT_PROFILE_OWNER",
            Self::NotAssignedNurse => "NOT_ASSIGNED_NURSE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NurseProfileAlreadyExists => "NURSE_PROFILE_EXISTS",
            Self::DuplicateApplication => "DUPLICATE_APPLICATION",
            Self::AlreadyClockedIn => "ALREADY_CLOCKED_IN",
            Self::PaymentAlreadyExists => "PAYMENT_ALREADY_EXISTS",

            // State machine
            Self::InvalidShiftTransition { .. } => "INVALID_SHIFT_TRANSITION",
            Self::InvalidApplicationTransition { .. } => "INVALID_APPLICATION_TRANSITION",
            Self::InvalidPaymentTransition { .. } => "INVALID_PAYMENT_TRANSITION",
            Self::ShiftNotOpen => "SHIFT_NOT_OPEN",
            Self::ShiftNotAssigned => "SHIFT_NOT_ASSIGNED",
            Self::ShiftNotDeletable => "SHIFT_NOT_DELETABLE",
            Self::TimeRecordAlreadyClosed => "TIME_RECORD_CLOSED",
            Self::TimeRecordStillOpen => "TIME_RECORD_OPEN",
            Self::ClockOutBeforeClockIn => "CLOCK_OUT_BEFORE_CLOCK_IN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::NurseProfileNotFound(_)
                | Self::FacilityNotFound(_)
                | Self::ShiftNotFound(_)
                | Self::ApplicationNotFound(_)
                | Self::LicenseNotFound(_)
                | Self::CertificationNotFound(_)
                | Self::TimeRecordNotFound(_)
                | Self::PaymentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidTimeWindow
                | Self::InvalidRate
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::RoleRequired(_) | Self::NotProfileOwner | Self::NotAssignedNurse
        )
    }

    /// Check if this is a conflict error.
    ///
    /// State machine violations are conflicts: the request was well-formed
    /// but the resource is in a state that forbids it (HTTP 409).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::NurseProfileAlreadyExists
                | Self::DuplicateApplication
                | Self::AlreadyClockedIn
                | Self::PaymentAlreadyExists
                | Self::InvalidShiftTransition { .. }
                | Self::InvalidApplicationTransition { .. }
                | Self::InvalidPaymentTransition { .. }
                | Self::ShiftNotOpen
                | Self::ShiftNotAssigned
                | Self::ShiftNotDeletable
                | Self::TimeRecordAlreadyClosed
                | Self::TimeRecordStillOpen
                | Self::ClockOutBeforeClockIn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ShiftNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_SHIFT");

        let err = DomainError::DuplicateApplication;
        assert_eq!(err.code(), "DUPLICATE_APPLICATION");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::PaymentNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_transitions_are_conflicts() {
        let err = DomainError::InvalidShiftTransition {
            from: ShiftStatus::Completed,
            to: ShiftStatus::Open,
        };
        assert!(err.is_conflict());
        assert!(!err.is_validation());

        assert!(DomainError::ShiftNotDeletable.is_conflict());
        assert!(DomainError::ClockOutBeforeClockIn.is_conflict());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::NotProfileOwner.is_authorization());
        assert!(DomainError::RoleRequired("admin").is_authorization());
        assert!(!DomainError::InvalidEmail.is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ShiftNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Shift not found: 123");

        let err = DomainError::InvalidShiftTransition {
            from: ShiftStatus::Open,
            to: ShiftStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Illegal shift transition: open -> completed"
        );
    }
}
