//! Shift handlers
//!
//! Posting, browsing, and lifecycle transitions.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shift_core::{ShiftQuery, ShiftStatus};
use shift_service::{CreateShiftRequest, ShiftResponse, ShiftService, UpdateShiftRequest};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Query filters for browsing shifts
#[derive(Debug, Deserialize)]
pub struct ShiftFilterParams {
    /// Status filter; defaults to open so the public board shows
    /// available work
    pub status: Option<String>,
    pub facility_id: Option<String>,
    pub specialty: Option<String>,
    pub starts_after: Option<DateTime<Utc>>,
    pub starts_before: Option<DateTime<Utc>>,
    pub min_hourly_rate_cents: Option<i64>,
}

impl ShiftFilterParams {
    fn into_query(self, pagination: &Pagination) -> Result<ShiftQuery, ApiError> {
        let status = match self.status.as_deref() {
            None => Some(ShiftStatus::Open),
            Some("any") => None,
            Some(raw) => Some(
                ShiftStatus::parse(raw)
                    .ok_or_else(|| ApiError::invalid_query("Invalid 'status' filter"))?,
            ),
        };

        let facility_id = self
            .facility_id
            .as_deref()
            .map(|raw| parse_id(raw, "facility_id"))
            .transpose()?;

        Ok(ShiftQuery {
            status,
            facility_id,
            specialty: self.specialty,
            starts_after: self.starts_after,
            starts_before: self.starts_before,
            min_hourly_rate_cents: self.min_hourly_rate_cents,
            before: pagination.before,
            after: pagination.after,
            limit: i64::from(pagination.limit),
        })
    }
}

/// Browse shifts
///
/// GET /shifts
pub async fn search_shifts(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
    Query(filters): Query<ShiftFilterParams>,
) -> ApiResult<Json<Vec<ShiftResponse>>> {
    let query = filters.into_query(&pagination)?;

    let service = ShiftService::new(state.service_context());
    let response = service.search_shifts(query).await?;
    Ok(Json(response))
}

/// Post a shift for a facility
///
/// POST /facilities/{facility_id}/shifts
pub async fn create_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(facility_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateShiftRequest>,
) -> ApiResult<Created<Json<ShiftResponse>>> {
    let facility_id = parse_id(&facility_id, "facility_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service.create_shift(facility_id, auth.role, request).await?;
    Ok(Created(Json(response)))
}

/// List shifts posted by a facility
///
/// GET /facilities/{facility_id}/shifts
pub async fn list_facility_shifts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(facility_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ShiftResponse>>> {
    let facility_id = parse_id(&facility_id, "facility_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service
        .list_facility_shifts(facility_id, i64::from(pagination.limit), pagination.after)
        .await?;
    Ok(Json(response))
}

/// Get a shift by ID
///
/// GET /shifts/{shift_id}
pub async fn get_shift(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Json<ShiftResponse>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service.get_shift(shift_id).await?;
    Ok(Json(response))
}

/// Update an open shift
///
/// PATCH /shifts/{shift_id}
pub async fn update_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateShiftRequest>,
) -> ApiResult<Json<ShiftResponse>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service.update_shift(shift_id, auth.role, request).await?;
    Ok(Json(response))
}

/// Cancel a shift
///
/// POST /shifts/{shift_id}/cancel
pub async fn cancel_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Json<ShiftResponse>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service.cancel_shift(shift_id, auth.role).await?;
    Ok(Json(response))
}

/// Complete an assigned shift
///
/// POST /shifts/{shift_id}/complete
pub async fn complete_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Json<ShiftResponse>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ShiftService::new(state.service_context());
    let response = service.complete_shift(shift_id, auth.role).await?;
    Ok(Json(response))
}

/// Delete an open shift
///
/// DELETE /shifts/{shift_id}
pub async fn delete_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<NoContent> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ShiftService::new(state.service_context());
    service.delete_shift(shift_id, auth.role).await?;
    Ok(NoContent)
}
