//! Credential handlers
//!
//! License and certification endpoints nested under nurse profiles.

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{
    CertificationResponse, CreateCertificationRequest, CreateLicenseRequest, CredentialService,
    LicenseResponse, UpdateCertificationRequest, UpdateLicenseRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

// ============================================================================
// Licenses
// ============================================================================

/// List a nurse's licenses
///
/// GET /nurses/{nurse_id}/licenses
pub async fn list_licenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
) -> ApiResult<Json<Vec<LicenseResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .list_licenses(nurse_id, auth.user_id, auth.role)
        .await?;
    Ok(Json(response))
}

/// Add a license
///
/// POST /nurses/{nurse_id}/licenses
pub async fn create_license(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateLicenseRequest>,
) -> ApiResult<Created<Json<LicenseResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .create_license(nurse_id, auth.user_id, auth.role, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Update a license
///
/// PATCH /nurses/{nurse_id}/licenses/{license_id}
pub async fn update_license(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((nurse_id, license_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateLicenseRequest>,
) -> ApiResult<Json<LicenseResponse>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;
    let license_id = parse_id(&license_id, "license_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .update_license(nurse_id, license_id, auth.user_id, auth.role, request)
        .await?;
    Ok(Json(response))
}

/// Delete a license
///
/// DELETE /nurses/{nurse_id}/licenses/{license_id}
pub async fn delete_license(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((nurse_id, license_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;
    let license_id = parse_id(&license_id, "license_id")?;

    let service = CredentialService::new(state.service_context());
    service
        .delete_license(nurse_id, license_id, auth.user_id, auth.role)
        .await?;
    Ok(NoContent)
}

// ============================================================================
// Certifications
// ============================================================================

/// List a nurse's certifications
///
/// GET /nurses/{nurse_id}/certifications
pub async fn list_certifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
) -> ApiResult<Json<Vec<CertificationResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .list_certifications(nurse_id, auth.user_id, auth.role)
        .await?;
    Ok(Json(response))
}

/// Add a certification
///
/// POST /nurses/{nurse_id}/certifications
pub async fn create_certification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCertificationRequest>,
) -> ApiResult<Created<Json<CertificationResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .create_certification(nurse_id, auth.user_id, auth.role, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Update a certification
///
/// PATCH /nurses/{nurse_id}/certifications/{certification_id}
pub async fn update_certification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((nurse_id, certification_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateCertificationRequest>,
) -> ApiResult<Json<CertificationResponse>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;
    let certification_id = parse_id(&certification_id, "certification_id")?;

    let service = CredentialService::new(state.service_context());
    let response = service
        .update_certification(nurse_id, certification_id, auth.user_id, auth.role, request)
        .await?;
    Ok(Json(response))
}

/// Delete a certification
///
/// DELETE /nurses/{nurse_id}/certifications/{certification_id}
pub async fn delete_certification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((nurse_id, certification_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;
    let certification_id = parse_id(&certification_id, "certification_id")?;

    let service = CredentialService::new(state.service_context());
    service
        .delete_certification(nurse_id, certification_id, auth.user_id, auth.role)
        .await?;
    Ok(NoContent)
}
