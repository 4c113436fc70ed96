//! Shift service
//!
//! Shift posting, browsing, and the guarded lifecycle transitions
//! (open -> assigned -> completed/cancelled).

use chrono::Utc;
use shift_core::entities::{Shift, ShiftStatus};
use shift_core::{DomainError, DomainEvent, ShiftQuery, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{CreateShiftRequest, ShiftResponse, UpdateShiftRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::facility::require_admin;

/// Shift service
pub struct ShiftService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShiftService<'a> {
    /// Create a new ShiftService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new shift for a facility (admin only)
    #[instrument(skip(self, request), fields(specialty = %request.specialty))]
    pub async fn create_shift(
        &self,
        facility_id: Snowflake,
        caller_role: UserRole,
        request: CreateShiftRequest,
    ) -> ServiceResult<ShiftResponse> {
        require_admin(caller_role)?;

        // Parent must exist
        self.ctx
            .facility_repo()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Facility", facility_id.to_string()))?;

        let mut shift = Shift::new(
            self.ctx.generate_id(),
            facility_id,
            request.specialty,
            request.starts_at,
            request.ends_at,
            request.hourly_rate_cents,
        )
        .with_requirements(request.requirements);
        if let Some(notes) = request.notes {
            shift = shift.with_notes(notes);
        }

        if !shift.has_valid_window() {
            return Err(DomainError::InvalidTimeWindow.into());
        }

        self.ctx.shift_repo().create(&shift).await?;

        info!(shift_id = %shift.id, facility_id = %facility_id, "Shift posted");

        self.ctx
            .publish_event(&DomainEvent::ShiftPosted {
                shift_id: shift.id,
                facility_id,
                specialty: shift.specialty.clone(),
                starts_at: shift.starts_at,
                at: Utc::now(),
            })
            .await;

        Ok(ShiftResponse::from(&shift))
    }

    /// Get a shift by ID
    #[instrument(skip(self))]
    pub async fn get_shift(&self, shift_id: Snowflake) -> ServiceResult<ShiftResponse> {
        let shift = self.load(shift_id).await?;
        Ok(ShiftResponse::from(&shift))
    }

    /// Search shifts with filters and cursor pagination
    #[instrument(skip(self, query))]
    pub async fn search_shifts(&self, query: ShiftQuery) -> ServiceResult<Vec<ShiftResponse>> {
        let shifts = self.ctx.shift_repo().search(&query).await?;
        Ok(shifts.iter().map(ShiftResponse::from).collect())
    }

    /// List shifts posted by a facility
    #[instrument(skip(self))]
    pub async fn list_facility_shifts(
        &self,
        facility_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<ShiftResponse>> {
        self.ctx
            .facility_repo()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Facility", facility_id.to_string()))?;

        let shifts = self
            .ctx
            .shift_repo()
            .find_by_facility(facility_id, limit, after)
            .await?;
        Ok(shifts.iter().map(ShiftResponse::from).collect())
    }

    /// Update an open shift's fields (admin only)
    #[instrument(skip(self, request))]
    pub async fn update_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
        request: UpdateShiftRequest,
    ) -> ServiceResult<ShiftResponse> {
        require_admin(caller_role)?;

        let mut shift = self.load(shift_id).await?;

        // Once a nurse is assigned the posting terms are locked in
        if shift.status != ShiftStatus::Open {
            return Err(DomainError::ShiftNotOpen.into());
        }

        if let Some(specialty) = request.specialty {
            shift.specialty = specialty;
        }
        if let Some(starts_at) = request.starts_at {
            shift.starts_at = starts_at;
        }
        if let Some(ends_at) = request.ends_at {
            shift.ends_at = ends_at;
        }
        if let Some(rate) = request.hourly_rate_cents {
            shift.hourly_rate_cents = rate;
        }
        if let Some(requirements) = request.requirements {
            shift.requirements = requirements;
        }
        if let Some(notes) = request.notes {
            shift.notes = Some(notes);
        }

        if !shift.has_valid_window() {
            return Err(DomainError::InvalidTimeWindow.into());
        }

        self.ctx.shift_repo().update(&shift).await?;

        Ok(ShiftResponse::from(&shift))
    }

    /// Cancel a shift (admin only; open or assigned)
    #[instrument(skip(self))]
    pub async fn cancel_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ShiftResponse> {
        require_admin(caller_role)?;

        let shift = self.load(shift_id).await?;
        self.transition(shift, ShiftStatus::Cancelled).await
    }

    /// Mark an assigned shift completed (admin only)
    #[instrument(skip(self))]
    pub async fn complete_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ShiftResponse> {
        require_admin(caller_role)?;

        let shift = self.load(shift_id).await?;
        self.transition(shift, ShiftStatus::Completed).await
    }

    /// Delete a shift (admin only; only while open)
    #[instrument(skip(self))]
    pub async fn delete_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        require_admin(caller_role)?;
        self.ctx.shift_repo().delete_open(shift_id).await?;
        info!(shift_id = %shift_id, "Shift deleted");
        Ok(())
    }

    async fn load(&self, shift_id: Snowflake) -> ServiceResult<Shift> {
        self.ctx
            .shift_repo()
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shift", shift_id.to_string()))
            .map_err(Into::into)
    }

    /// Apply a guarded transition: legality is checked against the loaded
    /// entity, then enforced again by the conditional update so a
    /// concurrent transition cannot slip through.
    async fn transition(&self, mut shift: Shift, to: ShiftStatus) -> ServiceResult<ShiftResponse> {
        let from = shift.status;
        shift.transition(to)?;

        self.ctx
            .shift_repo()
            .transition_status(shift.id, from, to)
            .await?;

        info!(shift_id = %shift.id, from = %from, to = %to, "Shift transitioned");

        let event = match to {
            ShiftStatus::Cancelled => Some(DomainEvent::ShiftCancelled {
                shift_id: shift.id,
                facility_id: shift.facility_id,
                at: Utc::now(),
            }),
            ShiftStatus::Completed => Some(DomainEvent::ShiftCompleted {
                shift_id: shift.id,
                facility_id: shift.facility_id,
                at: Utc::now(),
            }),
            _ => None,
        };
        if let Some(event) = event {
            self.ctx.publish_event(&event).await;
        }

        Ok(ShiftResponse::from(&shift))
    }
}
