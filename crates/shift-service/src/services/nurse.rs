//! Nurse profile service
//!
//! Profile creation and maintenance for users with the nurse role.

use shift_core::entities::NurseProfile;
use shift_core::{DomainError, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{CreateNurseProfileRequest, NurseProfileResponse, UpdateNurseProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Nurse profile service
pub struct NurseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NurseService<'a> {
    /// Create a new NurseService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a nurse profile for the calling user
    #[instrument(skip(self, request))]
    pub async fn create_profile(
        &self,
        user_id: Snowflake,
        role: UserRole,
        request: CreateNurseProfileRequest,
    ) -> ServiceResult<NurseProfileResponse> {
        if role != UserRole::Nurse {
            return Err(DomainError::RoleRequired("nurse").into());
        }

        if self.ctx.nurse_repo().find_by_user(user_id).await?.is_some() {
            return Err(DomainError::NurseProfileAlreadyExists.into());
        }

        let mut profile = NurseProfile::new(
            self.ctx.generate_id(),
            user_id,
            request.specialty,
            request.years_experience,
            request.desired_hourly_rate_cents,
        );
        profile.bio = request.bio;
        profile.city = request.city;
        profile.state = request.state;

        self.ctx.nurse_repo().create(&profile).await?;

        info!(nurse_id = %profile.id, user_id = %user_id, "Nurse profile created");

        Ok(NurseProfileResponse::from(&profile))
    }

    /// Get a nurse profile by ID
    #[instrument(skip(self))]
    pub async fn get_profile(&self, nurse_id: Snowflake) -> ServiceResult<NurseProfileResponse> {
        let profile = self
            .ctx
            .nurse_repo()
            .find_by_id(nurse_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", nurse_id.to_string()))?;

        Ok(NurseProfileResponse::from(&profile))
    }

    /// Get the calling user's nurse profile
    #[instrument(skip(self))]
    pub async fn get_own_profile(&self, user_id: Snowflake) -> ServiceResult<NurseProfileResponse> {
        let profile = self
            .ctx
            .nurse_repo()
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", user_id.to_string()))?;

        Ok(NurseProfileResponse::from(&profile))
    }

    /// Update a nurse profile (owner or admin)
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: UpdateNurseProfileRequest,
    ) -> ServiceResult<NurseProfileResponse> {
        let mut profile = self
            .ctx
            .nurse_repo()
            .find_by_id(nurse_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", nurse_id.to_string()))?;

        self.require_owner_or_admin(&profile, caller_id, caller_role)?;

        if let Some(specialty) = request.specialty {
            profile.specialty = specialty;
        }
        if let Some(years) = request.years_experience {
            profile.years_experience = years;
        }
        if let Some(rate) = request.desired_hourly_rate_cents {
            profile.desired_hourly_rate_cents = rate;
        }
        if let Some(bio) = request.bio {
            profile.bio = Some(bio);
        }
        if let Some(city) = request.city {
            profile.city = Some(city);
        }
        if let Some(state) = request.state {
            profile.state = Some(state);
        }

        self.ctx.nurse_repo().update(&profile).await?;

        Ok(NurseProfileResponse::from(&profile))
    }

    /// Look up a profile and verify the caller may act for it
    pub(crate) async fn authorize_profile_access(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<NurseProfile> {
        let profile = self
            .ctx
            .nurse_repo()
            .find_by_id(nurse_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", nurse_id.to_string()))?;

        self.require_owner_or_admin(&profile, caller_id, caller_role)?;
        Ok(profile)
    }

    fn require_owner_or_admin(
        &self,
        profile: &NurseProfile,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        if caller_role == UserRole::Admin || profile.user_id == caller_id {
            Ok(())
        } else {
            Err(DomainError::NotProfileOwner.into())
        }
    }
}
