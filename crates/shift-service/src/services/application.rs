//! Shift application service
//!
//! Nurses apply to open shifts; facility admins accept or reject.
//! Acceptance is atomic: the shift is assigned and sibling applications
//! are rejected in one transaction.

use chrono::Utc;
use shift_core::entities::{ApplicationStatus, ShiftApplication, ShiftStatus};
use shift_core::{DomainError, DomainEvent, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{ApplicationResponse, ApplyToShiftRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::facility::require_admin;
use super::nurse::NurseService;

/// Shift application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply to an open shift as the calling nurse
    #[instrument(skip(self, request))]
    pub async fn apply(
        &self,
        shift_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: ApplyToShiftRequest,
    ) -> ServiceResult<ApplicationResponse> {
        if caller_role != UserRole::Nurse {
            return Err(DomainError::RoleRequired("nurse").into());
        }

        let profile = self
            .ctx
            .nurse_repo()
            .find_by_user(caller_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", caller_id.to_string()))?;

        let shift = self
            .ctx
            .shift_repo()
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shift", shift_id.to_string()))?;

        if shift.status != ShiftStatus::Open {
            return Err(DomainError::ShiftNotOpen.into());
        }

        // Pre-check for a friendlier error; the unique index is the backstop
        if self
            .ctx
            .application_repo()
            .find_by_shift_and_nurse(shift_id, profile.id)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateApplication.into());
        }

        let mut application = ShiftApplication::new(self.ctx.generate_id(), shift_id, profile.id);
        application.note = request.note;

        self.ctx.application_repo().create(&application).await?;

        info!(
            application_id = %application.id,
            shift_id = %shift_id,
            nurse_id = %profile.id,
            "Application submitted"
        );

        self.ctx
            .publish_event(&DomainEvent::ApplicationSubmitted {
                application_id: application.id,
                shift_id,
                nurse_id: profile.id,
                at: Utc::now(),
            })
            .await;

        Ok(ApplicationResponse::from(&application))
    }

    /// Get an application (admin, or the nurse who submitted it)
    #[instrument(skip(self))]
    pub async fn get_application(
        &self,
        application_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ApplicationResponse> {
        let application = self.load(application_id).await?;
        self.authorize_application_access(&application, caller_id, caller_role)
            .await?;
        Ok(ApplicationResponse::from(&application))
    }

    /// List applications for a shift (admin only)
    #[instrument(skip(self))]
    pub async fn list_for_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<Vec<ApplicationResponse>> {
        require_admin(caller_role)?;

        self.ctx
            .shift_repo()
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shift", shift_id.to_string()))?;

        let applications = self.ctx.application_repo().find_by_shift(shift_id).await?;
        Ok(applications.iter().map(ApplicationResponse::from).collect())
    }

    /// List applications submitted by a nurse (owner or admin)
    #[instrument(skip(self))]
    pub async fn list_for_nurse(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<ApplicationResponse>> {
        NurseService::new(self.ctx)
            .authorize_profile_access(nurse_id, caller_id, caller_role)
            .await?;

        let applications = self
            .ctx
            .application_repo()
            .find_by_nurse(nurse_id, limit, after)
            .await?;
        Ok(applications.iter().map(ApplicationResponse::from).collect())
    }

    /// Accept a pending application (admin only).
    ///
    /// Runs the transactional approval: assigns the shift while it is
    /// still open and rejects every sibling pending application. Two
    /// concurrent accepts for one shift cannot both succeed.
    #[instrument(skip(self))]
    pub async fn accept(
        &self,
        application_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ApplicationResponse> {
        require_admin(caller_role)?;

        let application = self.load(application_id).await?;

        self.ctx
            .application_repo()
            .approve(application.id, application.shift_id, application.nurse_id)
            .await?;

        info!(
            application_id = %application.id,
            shift_id = %application.shift_id,
            "Application accepted"
        );

        let now = Utc::now();
        self.ctx
            .publish_event(&DomainEvent::ApplicationDecided {
                application_id: application.id,
                shift_id: application.shift_id,
                nurse_id: application.nurse_id,
                status: ApplicationStatus::Accepted,
                at: now,
            })
            .await;

        // The approval assigned the shift; surface that to watchers too
        if let Some(shift) = self.ctx.shift_repo().find_by_id(application.shift_id).await? {
            self.ctx
                .publish_event(&DomainEvent::ShiftAssigned {
                    shift_id: shift.id,
                    facility_id: shift.facility_id,
                    nurse_id: application.nurse_id,
                    at: now,
                })
                .await;
        }

        // Re-read for the decided status and timestamps
        let decided = self.load(application_id).await?;
        Ok(ApplicationResponse::from(&decided))
    }

    /// Reject a pending application (admin only)
    #[instrument(skip(self))]
    pub async fn reject(
        &self,
        application_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ApplicationResponse> {
        require_admin(caller_role)?;

        let application = self.load(application_id).await?;

        self.ctx
            .application_repo()
            .decide(application.id, ApplicationStatus::Rejected)
            .await?;

        info!(application_id = %application.id, "Application rejected");

        self.ctx
            .publish_event(&DomainEvent::ApplicationDecided {
                application_id: application.id,
                shift_id: application.shift_id,
                nurse_id: application.nurse_id,
                status: ApplicationStatus::Rejected,
                at: Utc::now(),
            })
            .await;

        let decided = self.load(application_id).await?;
        Ok(ApplicationResponse::from(&decided))
    }

    async fn load(&self, application_id: Snowflake) -> ServiceResult<ShiftApplication> {
        self.ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", application_id.to_string()))
    }

    async fn authorize_application_access(
        &self,
        application: &ShiftApplication,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        if caller_role == UserRole::Admin {
            return Ok(());
        }

        let profile = self
            .ctx
            .nurse_repo()
            .find_by_id(application.nurse_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Nurse profile", application.nurse_id.to_string())
            })?;

        if profile.user_id == caller_id {
            Ok(())
        } else {
            Err(DomainError::NotProfileOwner.into())
        }
    }
}
