//! Shift application handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{ApplicationResponse, ApplicationService, ApplyToShiftRequest};

use crate::extractors::{AuthUser, OptionalValidatedJson, Pagination};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// Apply to an open shift
///
/// POST /shifts/{shift_id}/applications
pub async fn apply_to_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
    OptionalValidatedJson(request): OptionalValidatedJson<ApplyToShiftRequest>,
) -> ApiResult<Created<Json<ApplicationResponse>>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ApplicationService::new(state.service_context());
    let response = service
        .apply(
            shift_id,
            auth.user_id,
            auth.role,
            request.unwrap_or_default(),
        )
        .await?;
    Ok(Created(Json(response)))
}

/// List applications for a shift
///
/// GET /shifts/{shift_id}/applications
pub async fn list_shift_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shift_id): Path<String>,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let shift_id = parse_id(&shift_id, "shift_id")?;

    let service = ApplicationService::new(state.service_context());
    let response = service.list_for_shift(shift_id, auth.role).await?;
    Ok(Json(response))
}

/// List applications submitted by a nurse
///
/// GET /nurses/{nurse_id}/applications
pub async fn list_nurse_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = ApplicationService::new(state.service_context());
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

/// Get an application by ID
///
/// GET /applications/{application_id}
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<String>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application_id = parse_id(&application_id, "application_id")?;

    let service = ApplicationService::new(state.service_context());
    let response = service
        .get_application(application_id, auth.user_id, auth.role)
        .await?;
    Ok(Json(response))
}

/// Accept a pending application
///
/// POST /applications/{application_id}/accept
pub async fn accept_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<String>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application_id = parse_id(&application_id, "application_id")?;

    let service = ApplicationService::new(state.service_context());
    let response = service.accept(application_id, auth.role).await?;
    Ok(Json(response))
}

/// Reject a pending application
///
/// POST /applications/{application_id}/reject
pub async fn reject_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<String>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application_id = parse_id(&application_id, "application_id")?;

    let service = ApplicationService::new(state.service_context());
    let response = service.reject(application_id, auth.role).await?;
    Ok(Json(response))
}
