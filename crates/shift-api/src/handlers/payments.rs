//! Payment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shift_service::{CreatePaymentRequest, PaymentResponse, PaymentService, UpdatePaymentRequest};

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// Create a payment for a closed time record
///
/// POST /payments
pub async fn create_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreatePaymentRequest>,
) -> ApiResult<Created<Json<PaymentResponse>>> {
    let time_record_id = parse_id(&request.time_record_id, "time_record_id")?;

    let service = PaymentService::new(state.service_context());
    let response = service.create_payment(time_record_id, auth.role).await?;
    Ok(Created(Json(response)))
}

/// Get a payment by ID
///
/// GET /payments/{payment_id}
pub async fn get_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<String>,
) -> ApiResult<Json<PaymentResponse>> {
    let payment_id = parse_id(&payment_id, "payment_id")?;

    let service = PaymentService::new(state.service_context());
    let response = service
        .get_payment(payment_id, auth.user_id, auth.role)
        .await?;
    Ok(Json(response))
}

/// Move a payment between statuses
///
/// PATCH /payments/{payment_id}
pub async fn update_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let payment_id = parse_id(&payment_id, "payment_id")?;

    let service = PaymentService::new(state.service_context());
    let response = service
        .update_status(payment_id, request.status, auth.role)
        .await?;
    Ok(Json(response))
}

/// List payments earned by a nurse
///
/// GET /nurses/{nurse_id}/payments
pub async fn list_nurse_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nurse_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let nurse_id = parse_id(&nurse_id, "nurse_id")?;

    let service = PaymentService::new(state.service_context());
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
