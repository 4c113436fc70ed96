//! Facility service
//!
//! Facility CRUD; mutations are admin-only.

use shift_core::entities::Facility;
use shift_core::{DomainError, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{CreateFacilityRequest, FacilityResponse, UpdateFacilityRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Facility service
pub struct FacilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FacilityService<'a> {
    /// Create a new FacilityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new facility (admin only)
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_facility(
        &self,
        caller_role: UserRole,
        request: CreateFacilityRequest,
    ) -> ServiceResult<FacilityResponse> {
        require_admin(caller_role)?;

        let facility = Facility::new(
            self.ctx.generate_id(),
            request.name,
            request.address,
            request.city,
            request.state,
            request.postal_code,
        )
        .with_contact(request.phone, request.email);

        self.ctx.facility_repo().create(&facility).await?;

        info!(facility_id = %facility.id, "Facility created");

        Ok(FacilityResponse::from(&facility))
    }

    /// Get a facility by ID
    #[instrument(skip(self))]
    pub async fn get_facility(&self, facility_id: Snowflake) -> ServiceResult<FacilityResponse> {
        let facility = self
            .ctx
            .facility_repo()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Facility", facility_id.to_string()))?;

        Ok(FacilityResponse::from(&facility))
    }

    /// List facilities with cursor pagination
    #[instrument(skip(self))]
    pub async fn list_facilities(
        &self,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<FacilityResponse>> {
        let facilities = self.ctx.facility_repo().list(limit, after).await?;
        Ok(facilities.iter().map(FacilityResponse::from).collect())
    }

    /// Update a facility (admin only)
    #[instrument(skip(self, request))]
    pub async fn update_facility(
        &self,
        facility_id: Snowflake,
        caller_role: UserRole,
        request: UpdateFacilityRequest,
    ) -> ServiceResult<FacilityResponse> {
        require_admin(caller_role)?;

        let mut facility = self
            .ctx
            .facility_repo()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Facility", facility_id.to_string()))?;

        if let Some(name) = request.name {
            facility.name = name;
        }
        if let Some(address) = request.address {
            facility.address = address;
        }
        if let Some(city) = request.city {
            facility.city = city;
        }
        if let Some(state) = request.state {
            facility.state = state;
        }
        if let Some(postal_code) = request.postal_code {
            facility.postal_code = postal_code;
        }
        if let Some(phone) = request.phone {
            facility.phone = Some(phone);
        }
        if let Some(email) = request.email {
            facility.email = Some(email);
        }

        self.ctx.facility_repo().update(&facility).await?;

        Ok(FacilityResponse::from(&facility))
    }

    /// Delete a facility (admin only)
    #[instrument(skip(self))]
    pub async fn delete_facility(
        &self,
        facility_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        require_admin(caller_role)?;
        self.ctx.facility_repo().delete(facility_id).await?;
        info!(facility_id = %facility_id, "Facility deleted");
        Ok(())
    }
}

/// Guard helper shared by the admin-only services
pub(crate) fn require_admin(role: UserRole) -> ServiceResult<()> {
    if role == UserRole::Admin {
        Ok(())
    } else {
        Err(DomainError::RoleRequired("admin").into())
    }
}
