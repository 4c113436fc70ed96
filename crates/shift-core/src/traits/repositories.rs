//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ApplicationStatus, Certification, Facility, License, NurseProfile, Payment, PaymentStatus,
    Shift, ShiftApplication, ShiftStatus, TimeRecord, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Nurse Profile Repository
// ============================================================================

#[async_trait]
pub trait NurseProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<NurseProfile>>;

    /// Find the profile belonging to a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<NurseProfile>>;

    /// Create a new profile (at most one per user)
    async fn create(&self, profile: &NurseProfile) -> RepoResult<()>;

    /// Update an existing profile
    async fn update(&self, profile: &NurseProfile) -> RepoResult<()>;

    /// Soft delete a profile
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Facility Repository
// ============================================================================

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    /// Find facility by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Facility>>;

    /// List facilities with cursor pagination
    async fn list(&self, limit: i64, after: Option<Snowflake>) -> RepoResult<Vec<Facility>>;

    /// Create a new facility
    async fn create(&self, facility: &Facility) -> RepoResult<()>;

    /// Update an existing facility
    async fn update(&self, facility: &Facility) -> RepoResult<()>;

    /// Soft delete a facility
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Shift Repository
// ============================================================================

/// Search filters for browsing shifts
#[derive(Debug, Clone, Default)]
pub struct ShiftQuery {
    pub status: Option<ShiftStatus>,
    pub facility_id: Option<Snowflake>,
    pub specialty: Option<String>,
    pub starts_after: Option<DateTime<Utc>>,
    pub starts_before: Option<DateTime<Utc>>,
    pub min_hourly_rate_cents: Option<i64>,
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Find shift by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Shift>>;

    /// List shifts posted by a facility
    async fn find_by_facility(
        &self,
        facility_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Shift>>;

    /// Search shifts with filters and cursor pagination
    async fn search(&self, query: &ShiftQuery) -> RepoResult<Vec<Shift>>;

    /// Create a new shift
    async fn create(&self, shift: &Shift) -> RepoResult<()>;

    /// Update mutable shift fields (window, rate, requirements, notes),
    /// only while the shift is still open
    async fn update(&self, shift: &Shift) -> RepoResult<()>;

    /// Conditionally move a shift between statuses.
    ///
    /// The update is guarded by the expected current status so concurrent
    /// transitions cannot both win; returns the error if the guard misses.
    async fn transition_status(
        &self,
        id: Snowflake,
        from: ShiftStatus,
        to: ShiftStatus,
    ) -> RepoResult<()>;

    /// Delete a shift, only while it is still open
    async fn delete_open(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ShiftApplication>>;

    /// List applications for a shift
    async fn find_by_shift(&self, shift_id: Snowflake) -> RepoResult<Vec<ShiftApplication>>;

    /// List applications submitted by a nurse
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<ShiftApplication>>;

    /// Find the application for a (shift, nurse) pair
    async fn find_by_shift_and_nurse(
        &self,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<Option<ShiftApplication>>;

    /// Create a new application (unique per (shift, nurse))
    async fn create(&self, application: &ShiftApplication) -> RepoResult<()>;

    /// Conditionally decide a pending application
    async fn decide(&self, id: Snowflake, to: ApplicationStatus) -> RepoResult<()>;

    /// Accept an application atomically.
    ///
    /// In one transaction: lock the shift row, assign the shift to the
    /// nurse while it is still open, accept the application while it is
    /// still pending, and reject every sibling pending application. Only
    /// one of two concurrent approvals can succeed.
    async fn approve(
        &self,
        id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<()>;
}

// ============================================================================
// Credential Repository (licenses + certifications)
// ============================================================================

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find license by ID
    async fn find_license(&self, id: Snowflake) -> RepoResult<Option<License>>;

    /// List licenses held by a nurse
    async fn find_licenses_by_nurse(&self, nurse_id: Snowflake) -> RepoResult<Vec<License>>;

    /// Create a new license
    async fn create_license(&self, license: &License) -> RepoResult<()>;

    /// Update an existing license
    async fn update_license(&self, license: &License) -> RepoResult<()>;

    /// Delete a license
    async fn delete_license(&self, id: Snowflake) -> RepoResult<()>;

    /// Find certification by ID
    async fn find_certification(&self, id: Snowflake) -> RepoResult<Option<Certification>>;

    /// List certifications held by a nurse
    async fn find_certifications_by_nurse(
        &self,
        nurse_id: Snowflake,
    ) -> RepoResult<Vec<Certification>>;

    /// Create a new certification
    async fn create_certification(&self, certification: &Certification) -> RepoResult<()>;

    /// Update an existing certification
    async fn update_certification(&self, certification: &Certification) -> RepoResult<()>;

    /// Delete a certification
    async fn delete_certification(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Time Record Repository
// ============================================================================

#[async_trait]
pub trait TimeRecordRepository: Send + Sync {
    /// Find time record by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TimeRecord>>;

    /// Find the open (not clocked out) record for a (shift, nurse) pair
    async fn find_open(
        &self,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<Option<TimeRecord>>;

    /// List time records for a shift
    async fn find_by_shift(&self, shift_id: Snowflake) -> RepoResult<Vec<TimeRecord>>;

    /// List time records for a nurse
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<TimeRecord>>;

    /// Create a new open record (clock-in)
    async fn create(&self, record: &TimeRecord) -> RepoResult<()>;

    /// Close a record (clock-out), conditional on it still being open
    async fn close(
        &self,
        id: Snowflake,
        clock_out_at: DateTime<Utc>,
        worked_minutes: i32,
    ) -> RepoResult<()>;
}

// ============================================================================
// Payment Repository
// ============================================================================

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find payment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Payment>>;

    /// Find the payment for a time record
    async fn find_by_time_record(&self, time_record_id: Snowflake)
        -> RepoResult<Option<Payment>>;

    /// List payments earned by a nurse (joined through time records)
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Payment>>;

    /// Create a new payment (unique per time record)
    async fn create(&self, payment: &Payment) -> RepoResult<()>;

    /// Conditionally move a payment between statuses
    async fn transition_status(
        &self,
        id: Snowflake,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> RepoResult<()>;
}
