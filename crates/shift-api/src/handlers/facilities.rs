//! Facility handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{
    CreateFacilityRequest, FacilityResponse, FacilityService, UpdateFacilityRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Create a facility
///
/// POST /facilities
pub async fn create_facility(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateFacilityRequest>,
) -> ApiResult<Created<Json<FacilityResponse>>> {
    let service = FacilityService::new(state.service_context());
    let response = service.create_facility(auth.role, request).await?;
    Ok(Created(Json(response)))
}

/// List facilities
///
/// GET /facilities
pub async fn list_facilities(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<FacilityResponse>>> {
    let service = FacilityService::new(state.service_context());
    let response = service
        .list_facilities(i64::from(pagination.limit), pagination.after)
        .await?;
    Ok(Json(response))
}

/// Get a facility by ID
///
/// GET /facilities/{facility_id}
pub async fn get_facility(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(facility_id): Path<String>,
) -> ApiResult<Json<FacilityResponse>> {
    let facility_id = parse_id(&facility_id, "facility_id")?;

    let service = FacilityService::new(state.service_context());
    let response = service.get_facility(facility_id).await?;
    Ok(Json(response))
}

/// Update a facility
///
/// PATCH /facilities/{facility_id}
pub async fn update_facility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(facility_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateFacilityRequest>,
) -> ApiResult<Json<FacilityResponse>> {
    let facility_id = parse_id(&facility_id, "facility_id")?;

    let service = FacilityService::new(state.service_context());
    let response = service
        .update_facility(facility_id, auth.role, request)
        .await?;
    Ok(Json(response))
}

/// Delete a facility
///
/// DELETE /facilities/{facility_id}
pub async fn delete_facility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(facility_id): Path<String>,
) -> ApiResult<NoContent> {
    let facility_id = parse_id(&facility_id, "facility_id")?;

    let service = FacilityService::new(state.service_context());
    service.delete_facility(facility_id, auth.role).await?;
    Ok(NoContent)
}
