//! Time record handlers
//!
//! Clock-in/out endpoints and time record listings.

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{ClockOutResponse, TimeRecordResponse, TimeRecordService};

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// Clock in on an assigned shift
///
/// POST /shifts/{shift_id}/clock-in
pub async fn clock_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Created<Json<TimeRecordResponse>>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = TimeRecordService::new(state.service_context());
    let response = service.clock_in(shift_id, auth.user_id, auth.role).await?;
    Ok(Created(Json(response)))
}

/// Clock out of an open time record
///
/// POST /time-records/{time_record_id}/clock-out
pub async fn clock_out(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(time_record_id): Path<String>,
) -> ApiResult<Json<ClockOutResponse>> {
    let time_record_id = parse_id(&time_record_id, "time_record_id")?;

    let service = TimeRecordService::new(state.service_context());
    let response = service
        .clock_out(time_record_id, auth.user_id, auth.role)
        .await?;
    Ok(Json(response))
}

/// List time records for a shift
///
/// GET /shifts/{shift_id}/time-records
pub async fn list_shift_time_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Json<Vec<TimeRecordResponse>>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = TimeRecordService::new(state.service_context());
    let response = service.list_for_shift(shift_id, auth.role).await?;
    Ok(Json(response))
}

/// List time records for a nurse
///
/// GET /nurses/{nurse_id}/time-records
pub async fn list_nurse_time_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<TimeRecordResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = TimeRecordService::new(state.service_context());
    let response = service
        .list_for_nurse(
            nurse_id,
            auth.user_id,
            auth.role,
            i64::from(pagination.limit),
            pagination.after,
        )
        .await?;
    Ok(Json(response))
}
