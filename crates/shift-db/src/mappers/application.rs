//! ShiftApplication entity <-> model mapper

use shift_core::entities::{ApplicationStatus, ShiftApplication};
use shift_core::error::DomainError;
use shift_core::value_objects::Snowflake;

use crate::models::ApplicationModel;

impl TryFrom<ApplicationModel> for ShiftApplication {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        let status = ApplicationStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "unknown application status in database: {}",
                model.status
            ))
        })?;

        Ok(ShiftApplication {
            id: Snowflake::new(model.id),
            shift_id: Snowflake::new(model.shift_id),
            nurse_id: Snowflake::new(model.nurse_id),
            note: model.note,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
