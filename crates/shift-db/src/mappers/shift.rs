//! Shift entity <-> model mapper

use shift_core::entities::{Shift, ShiftStatus};
use shift_core::error::DomainError;
use shift_core::value_objects::Snowflake;

use crate::models::ShiftModel;

impl TryFrom<ShiftModel> for Shift {
    type Error = DomainError;

    fn try_from(model: ShiftModel) -> Result<Self, Self::Error> {
        let status = ShiftStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!("unknown shift status in database: {}", model.status))
        })?;

        Ok(Shift {
            id: Snowflake::new(model.id),
            facility_id: Snowflake::new(model.facility_id),
            specialty: model.specialty,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            hourly_rate_cents: model.hourly_rate_cents,
            requirements: model.requirements,
            notes: model.notes,
            status,
            assigned_nurse_id: model.assigned_nurse_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_model(status: &str) -> ShiftModel {
        let starts = Utc::now();
        ShiftModel {
            id: 100,
            facility_id: 10,
            specialty: "ICU".into(),
            starts_at: starts,
            ends_at: starts + Duration::hours(8),
            hourly_rate_cents: 6200,
            requirements: vec!["BLS".into()],
            notes: None,
            status: status.into(),
            assigned_nurse_id: None,
            created_at: starts,
            updated_at: starts,
            deleted_at: None,
        }
    }

    #[test]
    fn test_model_to_entity() {
        let shift = Shift::try_from(sample_model("open")).unwrap();
        assert_eq!(shift.status, ShiftStatus::Open);
        assert_eq!(shift.requirements, vec!["BLS".to_string()]);
    }

    #[test]
    fn test_unknown_status_is_error() {
        assert!(Shift::try_from(sample_model("scheduled")).is_err());
    }
}
