//! NurseProfile entity <-> model mapper

use shift_core::entities::NurseProfile;
use shift_core::value_objects::Snowflake;

use crate::models::NurseProfileModel;

impl From<NurseProfileModel> for NurseProfile {
    fn from(model: NurseProfileModel) -> Self {
        NurseProfile {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            specialty: model.specialty,
            years_experience: model.years_experience,
            desired_hourly_rate_cents: model.desired_hourly_rate_cents,
            bio: model.bio,
            city: model.city,
            state: model.state,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
