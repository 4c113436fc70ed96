//! Time record service
//!
//! Clock-in/out flow for assigned shifts. Worked minutes are computed at
//! clock-out and become the basis for payment.

use chrono::Utc;
use shift_core::entities::TimeRecord;
use shift_core::{DomainError, DomainEvent, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{ClockOutResponse, TimeRecordResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::facility::require_admin;
use super::nurse::NurseService;

/// Time record service
pub struct TimeRecordService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimeRecordService<'a> {
    /// Create a new TimeRecordService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Clock in on a shift as the calling nurse
    #[instrument(skip(self))]
    pub async fn clock_in(
        &self,
        shift_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<TimeRecordResponse> {
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

        if !shift.is_assigned_to(profile.id) {
            return Err(DomainError::NotAssignedNurse.into());
        }

        // Pre-check for a friendlier error; the partial unique index is the backstop
        if self
            .ctx
            .time_record_repo()
            .find_open(shift_id, profile.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyClockedIn.into());
        }

        let record = TimeRecord::new(self.ctx.generate_id(), shift_id, profile.id, Utc::now());
        self.ctx.time_record_repo().create(&record).await?;

        info!(
            time_record_id = %record.id,
            shift_id = %shift_id,
            nurse_id = %profile.id,
            "Clocked in"
        );

        self.ctx
            .publish_event(&DomainEvent::TimeRecordOpened {
                time_record_id: record.id,
                shift_id,
                nurse_id: profile.id,
                at: record.clock_in_at,
            })
            .await;

        Ok(TimeRecordResponse::from(&record))
    }

    /// Clock out of an open time record as the calling nurse
    #[instrument(skip(self))]
    pub async fn clock_out(
        &self,
        time_record_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<ClockOutResponse> {
        if caller_role != UserRole::Nurse {
            return Err(DomainError::RoleRequired("nurse").into());
        }

        let mut record = self
            .ctx
            .time_record_repo()
            .find_by_id(time_record_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Time record", time_record_id.to_string()))?;

        let profile = self
            .ctx
            .nurse_repo()
            .find_by_id(record.nurse_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", record.nurse_id.to_string()))?;

        if profile.user_id != caller_id {
            return Err(DomainError::NotAssignedNurse.into());
        }

        // Entity guard computes the minutes; the conditional update enforces
        // single-close against concurrent requests
        let clock_out_at = Utc::now();
        let worked_minutes = record.close(clock_out_at)?;
        self.ctx
            .time_record_repo()
            .close(record.id, clock_out_at, worked_minutes)
            .await?;

        info!(
            time_record_id = %record.id,
            worked_minutes = worked_minutes,
            "Clocked out"
        );

        self.ctx
            .publish_event(&DomainEvent::TimeRecordClosed {
                time_record_id: record.id,
                shift_id: record.shift_id,
                nurse_id: record.nurse_id,
                worked_minutes,
                at: Utc::now(),
            })
            .await;

        Ok(ClockOutResponse {
            record: TimeRecordResponse::from(&record),
            worked_minutes,
        })
    }

    /// List time records for a shift (admin only)
    #[instrument(skip(self))]
    pub async fn list_for_shift(
        &self,
        shift_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<Vec<TimeRecordResponse>> {
        require_admin(caller_role)?;

        self.ctx
            .shift_repo()
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shift", shift_id.to_string()))?;

        let records = self.ctx.time_record_repo().find_by_shift(shift_id).await?;
        Ok(records.iter().map(TimeRecordResponse::from).collect())
    }

    /// List time records for a nurse (owner or admin)
    #[instrument(skip(self))]
    pub async fn list_for_nurse(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<TimeRecordResponse>> {
        NurseService::new(self.ctx)
            .authorize_profile_access(nurse_id, caller_id, caller_role)
            .await?;

        let records = self
            .ctx
            .time_record_repo()
            .find_by_nurse(nurse_id, limit, after)
            .await?;
        Ok(records.iter().map(TimeRecordResponse::from).collect())
    }
}
