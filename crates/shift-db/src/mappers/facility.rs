//! Facility entity <-> model mapper

use shift_core::entities::Facility;
use shift_core::value_objects::Snowflake;

use crate::models::FacilityModel;

impl From<FacilityModel> for Facility {
    fn from(model: FacilityModel) -> Self {
        Facility {
            id: Snowflake::new(model.id),
            name: model.name,
            address: model.address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            phone: model.phone,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
