//! Payment entity <-> model mapper

use shift_core::entities::{Payment, PaymentStatus};
use shift_core::error::DomainError;
use shift_core::value_objects::Snowflake;

use crate::models::PaymentModel;

impl TryFrom<PaymentModel> for Payment {
    type Error = DomainError;

    fn try_from(model: PaymentModel) -> Result<Self, Self::Error> {
        let status = PaymentStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "unknown payment status in database: {}",
                model.status
            ))
        })?;

        Ok(Payment {
            id: Snowflake::new(model.id),
            time_record_id: Snowflake::new(model.time_record_id),
            amount_cents: model.amount_cents,
            reference: model.reference,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
