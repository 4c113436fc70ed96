//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    applications, auth, credentials, facilities, health, nurses, payments, shifts, time_records,
    users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(nurse_routes())
        .merge(facility_routes())
        .merge(shift_routes())
        .merge(application_routes())
        .merge(time_record_routes())
        .merge(payment_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
}

/// Nurse profile routes
fn nurse_routes() -> Router<AppState> {
    Router::new()
        // Profile CRUD
        .route("/nurses", post(nurses::create_nurse_profile))
        .route("/nurses/@me", get(nurses::get_own_profile))
        .route("/nurses/:nurse_id", get(nurses::get_nurse_profile))
        .route("/nurses/:nurse_id", patch(nurses::update_nurse_profile))
        // Credentials
        .route("/nurses/:nurse_id/licenses", get(credentials::list_licenses))
        .route("/nurses/:nurse_id/licenses", post(credentials::create_license))
        .route(
            "/nurses/:nurse_id/licenses/:license_id",
            patch(credentials::update_license),
        )
        .route(
            "/nurses/:nurse_id/licenses/:license_id",
            delete(credentials::delete_license),
        )
        .route(
            "/nurses/:nurse_id/certifications",
            get(credentials::list_certifications),
        )
        .route(
            "/nurses/:nurse_id/certifications",
            post(credentials::create_certification),
        )
        .route(
            "/nurses/:nurse_id/certifications/:certification_id",
            patch(credentials::update_certification),
        )
        .route(
            "/nurses/:nurse_id/certifications/:certification_id",
            delete(credentials::delete_certification),
        )
        // Nurse activity
        .route(
            "/nurses/:nurse_id/applications",
            get(applications::list_nurse_applications),
        )
        .route(
            "/nurses/:nurse_id/time-records",
            get(time_records::list_nurse_time_records),
        )
        .route(
            "/nurses/:nurse_id/payments",
            get(payments::list_nurse_payments),
        )
}

/// Facility routes
fn facility_routes() -> Router<AppState> {
    Router::new()
        .route("/facilities", post(facilities::create_facility))
        .route("/facilities", get(facilities::list_facilities))
        .route("/facilities/:facility_id", get(facilities::get_facility))
        .route("/facilities/:facility_id", patch(facilities::update_facility))
        .route("/facilities/:facility_id", delete(facilities::delete_facility))
        // Facility shifts
        .route("/facilities/:facility_id/shifts", get(shifts::list_facility_shifts))
        .route("/facilities/:facility_id/shifts", post(shifts::create_shift))
}

/// Shift routes
fn shift_routes() -> Router<AppState> {
    Router::new()
        .route("/shifts", get(shifts::search_shifts))
        .route("/shifts/:shift_id", get(shifts::get_shift))
        .route("/shifts/:shift_id", patch(shifts::update_shift))
        .route("/shifts/:shift_id", delete(shifts::delete_shift))
        .route("/shifts/:shift_id/cancel", post(shifts::cancel_shift))
        .route("/shifts/:shift_id/complete", post(shifts::complete_shift))
        // Applications on a shift
        .route(
            "/shifts/:shift_id/applications",
            get(applications::list_shift_applications),
        )
        .route(
            "/shifts/:shift_id/applications",
            post(applications::apply_to_shift),
        )
        // Time tracking on a shift
        .route("/shifts/:shift_id/clock-in", post(time_records::clock_in))
        .route(
            "/shifts/:shift_id/time-records",
            get(time_records::list_shift_time_records),
        )
}

/// Application routes
fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications/:application_id",
            get(applications::get_application),
        )
        .route(
            "/applications/:application_id/accept",
            post(applications::accept_application),
        )
        .route(
            "/applications/:application_id/reject",
            post(applications::reject_application),
        )
}

/// Time record routes
fn time_record_routes() -> Router<AppState> {
    Router::new().route(
        "/time-records/:time_record_id/clock-out",
        post(time_records::clock_out),
    )
}

/// Payment routes
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(payments::create_payment))
        .route("/payments/:payment_id", get(payments::get_payment))
        .route("/payments/:payment_id", patch(payments::update_payment))
}
