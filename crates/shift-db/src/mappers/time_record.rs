//! TimeRecord entity <-> model mapper

use shift_core::entities::TimeRecord;
use shift_core::value_objects::Snowflake;

use crate::models::TimeRecordModel;

impl From<TimeRecordModel> for TimeRecord {
    fn from(model: TimeRecordModel) -> Self {
        TimeRecord {
            id: Snowflake::new(model.id),
            shift_id: Snowflake::new(model.shift_id),
            nurse_id: Snowflake::new(model.nurse_id),
            clock_in_at: model.clock_in_at,
            clock_out_at: model.clock_out_at,
            worked_minutes: model.worked_minutes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
