//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrated with migrations/)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET,
//!   API_PORT, GATEWAY_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Setup helpers
// ============================================================================

/// Register a fresh account and return (access_token, user)
async fn register(server: &TestServer, request: &RegisterRequest) -> (String, UserResponse) {
    let response = server.post("/api/v1/auth/register", request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth.access_token, auth.user)
}

/// Register a nurse account with a profile; returns (token, profile)
async fn register_nurse_with_profile(server: &TestServer) -> (String, NurseProfileResponse) {
    let (token, _user) = register(server, &RegisterRequest::unique_nurse()).await;

    let response = server
        .post_auth("/api/v1/nurses", &token, &CreateNurseProfileRequest::icu())
        .await
        .unwrap();
    let profile: NurseProfileResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    (token, profile)
}

/// Register an admin, create a facility, and post a shift on it
async fn post_shift(server: &TestServer) -> (String, FacilityResponse, ShiftResponse) {
    let (admin_token, _) = register(server, &RegisterRequest::unique_admin()).await;

    let response = server
        .post_auth(
            "/api/v1/facilities",
            &admin_token,
            &CreateFacilityRequest::unique(),
        )
        .await
        .unwrap();
    let facility: FacilityResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/facilities/{}/shifts", facility.id),
            &admin_token,
            &CreateShiftRequest::icu_tomorrow(),
        )
        .await
        .unwrap();
    let shift: ShiftResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    (admin_token, facility, shift)
}

/// Drive a shift to assigned: nurse applies, admin accepts
async fn assign_shift(
    server: &TestServer,
    admin_token: &str,
    shift_id: &str,
    nurse_token: &str,
) -> ApplicationResponse {
    let response = server
        .post_auth(
            &format!("/api/v1/shifts/{shift_id}/applications"),
            nurse_token,
            &ApplyToShiftRequest { note: None },
        )
        .await
        .unwrap();
    let application: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/applications/{}/accept", application.id),
            admin_token,
        )
        .await
        .unwrap();
    assert_json::<ApplicationResponse>(response, StatusCode::OK)
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_nurse() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique_nurse();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.role, "nurse");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique_nurse();

    server.post("/api/v1/auth/register", &request).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique_admin();
    server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, register_req.email);
    assert_eq!(auth.user.role, "admin");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass1".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/auth/register", &RegisterRequest::unique_nurse())
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server
        .post("/api/v1/auth/refresh", &refresh_req)
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!refreshed.access_token.is_empty());

    // Rotation: the old refresh token is no longer valid
    let response = server
        .post("/api/v1/auth/refresh", &refresh_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Missing token
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Garbage token
    let response = server
        .get_auth("/api/v1/users/@me", "not.a.token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_update_user_persists() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register(&server, &RegisterRequest::unique_nurse()).await;

    let update = serde_json::json!({
        "first_name": "Renamed",
        "phone": "+1-555-0100"
    });
    let response = server
        .patch_auth("/api/v1/users/@me", &token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Fetch again and verify the fields stuck
    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.first_name, "Renamed");
    assert_eq!(user.phone.as_deref(), Some("+1-555-0100"));
}

// ============================================================================
// Facility Tests
// ============================================================================

#[tokio::test]
async fn test_facility_creation_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (nurse_token, _) = register(&server, &RegisterRequest::unique_nurse()).await;

    let response = server
        .post_auth(
            "/api/v1/facilities",
            &nurse_token,
            &CreateFacilityRequest::unique(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Shift Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_shift_roundtrip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, facility, shift) = post_shift(&server).await;

    let response = server
        .get_auth(&format!("/api/v1/shifts/{}", shift.id), &admin_token)
        .await
        .unwrap();
    let fetched: ShiftResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(fetched.id, shift.id);
    assert_eq!(fetched.facility_id, facility.id);
    assert_eq!(fetched.specialty, shift.specialty);
    assert_eq!(fetched.hourly_rate_cents, shift.hourly_rate_cents);
    assert_eq!(fetched.requirements, shift.requirements);
    assert_eq!(fetched.notes, shift.notes);
    assert_eq!(fetched.status, "open");
    assert!(fetched.assigned_nurse_id.is_none());
}

#[tokio::test]
async fn test_delete_open_shift() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;

    let response = server
        .delete_auth(&format!("/api/v1/shifts/{}", shift.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/shifts/{}", shift.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_non_open_shift_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;
    let (nurse_token, _) = register_nurse_with_profile(&server).await;

    assign_shift(&server, &admin_token, &shift.id, &nurse_token).await;

    let response = server
        .delete_auth(&format!("/api/v1/shifts/{}", shift.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_cancel_completed_shift_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;
    let (nurse_token, _) = register_nurse_with_profile(&server).await;

    assign_shift(&server, &admin_token, &shift.id, &nurse_token).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/complete", shift.id), &admin_token)
        .await
        .unwrap();
    let completed: ShiftResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(completed.status, "completed");

    // Terminal state: cancel must be rejected
    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/cancel", shift.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_open_shift_cannot_be_completed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/complete", shift.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_shift_search_defaults_to_open() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, facility, shift) = post_shift(&server).await;

    let response = server
        .get_auth(
            &format!("/api/v1/shifts?facility_id={}", facility.id),
            &admin_token,
        )
        .await
        .unwrap();
    let shifts: Vec<ShiftResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(shifts.iter().any(|s| s.id == shift.id));
    assert!(shifts.iter().all(|s| s.status == "open"));
}

// ============================================================================
// Application Tests
// ============================================================================

#[tokio::test]
async fn test_duplicate_application_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_admin_token, _, shift) = post_shift(&server).await;
    let (nurse_token, _) = register_nurse_with_profile(&server).await;

    let path = format!("/api/v1/shifts/{}/applications", shift.id);
    let request = ApplyToShiftRequest { note: None };

    let response = server.post_auth(&path, &nurse_token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same (shift, nurse) pair again
    let response = server.post_auth(&path, &nurse_token, &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_admin_cannot_apply() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;

    let response = server
        .post_auth(
            &format!("/api/v1/shifts/{}/applications", shift.id),
            &admin_token,
            &ApplyToShiftRequest { note: None },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_accept_assigns_shift_and_rejects_siblings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;
    let (nurse_a_token, nurse_a) = register_nurse_with_profile(&server).await;
    let (nurse_b_token, nurse_b) = register_nurse_with_profile(&server).await;

    let path = format!("/api/v1/shifts/{}/applications", shift.id);
    let request = ApplyToShiftRequest { note: None };

    let response = server.post_auth(&path, &nurse_a_token, &request).await.unwrap();
    let app_a: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth(&path, &nurse_b_token, &request).await.unwrap();
    let app_b: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Accept nurse A
    let response = server
        .post_auth_empty(&format!("/api/v1/applications/{}/accept", app_a.id), &admin_token)
        .await
        .unwrap();
    let accepted: ApplicationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");
    assert_eq!(accepted.nurse_id, nurse_a.id);

    // Shift is now assigned to nurse A
    let response = server
        .get_auth(&format!("/api/v1/shifts/{}", shift.id), &admin_token)
        .await
        .unwrap();
    let assigned: ShiftResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(assigned.status, "assigned");
    assert_eq!(assigned.assigned_nurse_id.as_deref(), Some(nurse_a.id.as_str()));

    // Nurse B's application was auto-rejected in the same transaction
    let response = server
        .get_auth(&format!("/api/v1/applications/{}", app_b.id), &admin_token)
        .await
        .unwrap();
    let rejected: ApplicationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.nurse_id, nurse_b.id);

    // Accepting the already-rejected sibling now conflicts
    let response = server
        .post_auth_empty(&format!("/api/v1/applications/{}/accept", app_b.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_accepts_have_single_winner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;
    let (nurse_a_token, _) = register_nurse_with_profile(&server).await;
    let (nurse_b_token, _) = register_nurse_with_profile(&server).await;

    let path = format!("/api/v1/shifts/{}/applications", shift.id);
    let request = ApplyToShiftRequest { note: None };

    let response = server.post_auth(&path, &nurse_a_token, &request).await.unwrap();
    let app_a: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth(&path, &nurse_b_token, &request).await.unwrap();
    let app_b: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Fire both accepts at once; the row lock makes exactly one win
    let path_a = format!("/api/v1/applications/{}/accept", app_a.id);
    let path_b = format!("/api/v1/applications/{}/accept", app_b.id);
    let accept_a = server.post_auth_empty(&path_a, &admin_token);
    let accept_b = server.post_auth_empty(&path_b, &admin_token);

    let (result_a, result_b) = tokio::join!(accept_a, accept_b);
    let statuses = [result_a.unwrap().status(), result_b.unwrap().status()];

    let winners = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let losers = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();

    assert_eq!(winners, 1, "exactly one accept should succeed: {statuses:?}");
    assert_eq!(losers, 1, "the other accept should conflict: {statuses:?}");
}

// ============================================================================
// Time Tracking & Payment Tests
// ============================================================================

#[tokio::test]
async fn test_clock_in_requires_assignment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_admin_token, _, shift) = post_shift(&server).await;
    let (nurse_token, _) = register_nurse_with_profile(&server).await;

    // Not assigned yet
    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/clock-in", shift.id), &nurse_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_full_time_tracking_and_payment_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin_token, _, shift) = post_shift(&server).await;
    let (nurse_token, _) = register_nurse_with_profile(&server).await;

    assign_shift(&server, &admin_token, &shift.id, &nurse_token).await;

    // Clock in
    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/clock-in", shift.id), &nurse_token)
        .await
        .unwrap();
    let record: TimeRecordResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(record.worked_minutes.is_none());

    // Double clock-in conflicts
    let response = server
        .post_auth_empty(&format!("/api/v1/shifts/{}/clock-in", shift.id), &nurse_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Payment before clock-out conflicts
    let response = server
        .post_auth(
            "/api/v1/payments",
            &admin_token,
            &CreatePaymentRequest {
                time_record_id: record.id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Clock out
    let response = server
        .post_auth_empty(
            &format!("/api/v1/time-records/{}/clock-out", record.id),
            &nurse_token,
        )
        .await
        .unwrap();
    let closed: ClockOutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(closed.worked_minutes >= 0);

    // Second clock-out conflicts
    let response = server
        .post_auth_empty(
            &format!("/api/v1/time-records/{}/clock-out", record.id),
            &nurse_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Create payment
    let response = server
        .post_auth(
            "/api/v1/payments",
            &admin_token,
            &CreatePaymentRequest {
                time_record_id: record.id.clone(),
            },
        )
        .await
        .unwrap();
    let payment: PaymentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(payment.status, "pending");
    assert!(payment.reference.starts_with("PAY-"));
    // Amount follows worked minutes at the shift rate (floored to cents)
    let expected = i64::from(closed.worked_minutes) * 6200 / 60;
    assert_eq!(payment.amount_cents, expected);

    // Duplicate payment conflicts
    let response = server
        .post_auth(
            "/api/v1/payments",
            &admin_token,
            &CreatePaymentRequest {
                time_record_id: record.id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Settle the payment
    let response = server
        .patch_auth(
            &format!("/api/v1/payments/{}", payment.id),
            &admin_token,
            &serde_json::json!({ "status": "paid" }),
        )
        .await
        .unwrap();
    let paid: PaymentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid.status, "paid");

    // Paid is terminal
    let response = server
        .patch_auth(
            &format!("/api/v1/payments/{}", payment.id),
            &admin_token,
            &serde_json::json!({ "status": "pending" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}
