//! Payment service
//!
//! Creates payments from closed time records and drives the payment
//! status state machine.

use chrono::Utc;
use shift_core::entities::{generate_payment_reference, Payment, PaymentStatus};
use shift_core::{DomainError, DomainEvent, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::PaymentResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::facility::require_admin;
use super::nurse::NurseService;

/// Payment service
pub struct PaymentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PaymentService<'a> {
    /// Create a new PaymentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a payment for a closed time record (admin only).
    ///
    /// Amount = worked minutes x the shift's hourly rate, floored to
    /// whole cents.
    #[instrument(skip(self))]
    pub async fn create_payment(
        &self,
        time_record_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<PaymentResponse> {
        require_admin(caller_role)?;

        let record = self
            .ctx
            .time_record_repo()
            .find_by_id(time_record_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Time record", time_record_id.to_string()))?;

        let worked_minutes = record
            .worked_minutes
            .ok_or(DomainError::TimeRecordStillOpen)?;

        // Pre-check for a friendlier error; the unique constraint is the backstop
        if self
            .ctx
            .payment_repo()
            .find_by_time_record(time_record_id)
            .await?
            .is_some()
        {
            return Err(DomainError::PaymentAlreadyExists.into());
        }

        let shift = self
            .ctx
            .shift_repo()
            .find_by_id(record.shift_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shift", record.shift_id.to_string()))?;

        let payment = Payment::new(
            self.ctx.generate_id(),
            time_record_id,
            Payment::amount_for(worked_minutes, shift.hourly_rate_cents),
            generate_payment_reference(),
        );

        self.ctx.payment_repo().create(&payment).await?;

        info!(
            payment_id = %payment.id,
            time_record_id = %time_record_id,
            amount_cents = payment.amount_cents,
            reference = %payment.reference,
            "Payment created"
        );

        Ok(PaymentResponse::from(&payment))
    }

    /// Get a payment (admin, or the nurse who earned it)
    #[instrument(skip(self))]
    pub async fn get_payment(
        &self,
        payment_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<PaymentResponse> {
        let payment = self.load(payment_id).await?;
        self.authorize_payment_access(&payment, caller_id, caller_role)
            .await?;
        Ok(PaymentResponse::from(&payment))
    }

    /// List payments earned by a nurse (owner or admin)
    #[instrument(skip(self))]
    pub async fn list_for_nurse(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<PaymentResponse>> {
        NurseService::new(self.ctx)
            .authorize_profile_access(nurse_id, caller_id, caller_role)
            .await?;

        let payments = self
            .ctx
            .payment_repo()
            .find_by_nurse(nurse_id, limit, after)
            .await?;
        Ok(payments.iter().map(PaymentResponse::from).collect())
    }

    /// Move a payment between statuses (admin only)
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        payment_id: Snowflake,
        to: PaymentStatus,
        caller_role: UserRole,
    ) -> ServiceResult<PaymentResponse> {
        require_admin(caller_role)?;

        let mut payment = self.load(payment_id).await?;
        let from = payment.status;

        // Legality checked on the entity, enforced again by the conditional update
        payment.transition(to)?;
        self.ctx
            .payment_repo()
            .transition_status(payment_id, from, to)
            .await?;

        info!(payment_id = %payment_id, from = %from, to = %to, "Payment transitioned");

        if matches!(to, PaymentStatus::Paid | PaymentStatus::Failed) {
            self.ctx
                .publish_event(&DomainEvent::PaymentSettled {
                    payment_id,
                    time_record_id: payment.time_record_id,
                    status: to,
                    at: Utc::now(),
                })
                .await;
        }

        Ok(PaymentResponse::from(&payment))
    }

    async fn load(&self, payment_id: Snowflake) -> ServiceResult<Payment> {
        self.ctx
            .payment_repo()
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Payment", payment_id.to_string()))
    }

    async fn authorize_payment_access(
        &self,
        payment: &Payment,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        if caller_role == UserRole::Admin {
            return Ok(());
        }

        let record = self
            .ctx
            .time_record_repo()
            .find_by_id(payment.time_record_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Time record", payment.time_record_id.to_string())
            })?;

        let profile = self
            .ctx
            .nurse_repo()
            .find_by_id(record.nurse_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Nurse profile", record.nurse_id.to_string()))?;

        if profile.user_id == caller_id {
            Ok(())
        } else {
            Err(DomainError::NotProfileOwner.into())
        }
    }
}
