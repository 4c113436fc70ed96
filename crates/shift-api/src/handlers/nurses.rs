//! Nurse profile handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{
    CreateNurseProfileRequest, NurseProfileResponse, NurseService, UpdateNurseProfileRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// Create the calling user's nurse profile
///
/// POST /nurses
pub async fn create_nurse_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateNurseProfileRequest>,
) -> ApiResult<Created<Json<NurseProfileResponse>>> {
    let service = NurseService::new(state.service_context());
    let response = service
        .create_profile(auth.user_id, auth.role, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Get the calling user's nurse profile
///
/// GET /nurses/@me
pub async fn get_own_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NurseProfileResponse>> {
    let service = NurseService::new(state.service_context());
    let response = service.get_own_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a nurse profile by ID
///
/// GET /nurses/{nurse_id}
pub async fn get_nurse_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(nurse_id): Path<String>,
) -> ApiResult<Json<NurseProfileResponse>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = NurseService::new(state.service_context());
    let response = service.get_profile(nurse_id).await?;
    Ok(Json(response))
}

/// Update a nurse profile (owner or admin)
///
/// PATCH /nurses/{nurse_id}
pub async fn update_nurse_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateNurseProfileRequest>,
) -> ApiResult<Json<NurseProfileResponse>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = NurseService::new(state.service_context());
    let response = service
        .update_profile(nurse_id, auth.user_id, auth.role, request)
        .await?;
    Ok(Json(response))
}
