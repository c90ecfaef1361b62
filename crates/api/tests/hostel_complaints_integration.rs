//! Integration tests for the hostel complaint workflow.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_pool, get_request_with_auth,
    json_request_with_auth, parse_response_body, run_migrations, test_config, AuthenticatedUser,
    TestUser,
};
use serde_json::json;
use tower::ServiceExt;

async fn file_complaint(app: &Router, student: &AuthenticatedUser) -> String {
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/hostel-complaints",
        json!({
            "hostelBlock": "Block A",
            "roomNumber": "A-214",
            "issueType": "Electrical",
            "description": "The ceiling fan stopped working."
        }),
        &student.access_token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "file_complaint failed: {}", body);
    assert_eq!(body["status"], "Pending");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_student_files_and_lists_own_complaints() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let other_student = create_authenticated_user(&app, &TestUser::new()).await;

    file_complaint(&app, &student).await;

    let request = get_request_with_auth("/api/v1/hostel-complaints", &student.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);

    // Other students see only their own complaints
    let request = get_request_with_auth("/api/v1/hostel-complaints", &other_student.access_token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_warden_updates_complaint_status() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let warden =
        create_authenticated_user(&app, &TestUser::new().with_role("Hostel Warden")).await;

    let complaint_id = file_complaint(&app, &student).await;

    let request = json_request_with_auth(
        Method::PATCH,
        &format!("/api/v1/hostel-complaints/{}/status", complaint_id),
        json!({
            "status": "In Progress",
            "wardenRemarks": "Electrician scheduled for tomorrow."
        }),
        &warden.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "In Progress");
    assert_eq!(body["wardenRemarks"], "Electrician scheduled for tomorrow.");

    // The student sees the updated status
    let request = get_request_with_auth("/api/v1/hostel-complaints", &student.access_token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["complaints"][0]["status"], "In Progress");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_warden_sees_all_complaints_with_status_filter() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student_a = create_authenticated_user(&app, &TestUser::new()).await;
    let student_b = create_authenticated_user(&app, &TestUser::new()).await;
    let warden =
        create_authenticated_user(&app, &TestUser::new().with_role("Hostel Warden")).await;

    file_complaint(&app, &student_a).await;
    let resolved_id = file_complaint(&app, &student_b).await;

    let request = json_request_with_auth(
        Method::PATCH,
        &format!("/api/v1/hostel-complaints/{}/status", resolved_id),
        json!({ "status": "Resolved" }),
        &warden.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = get_request_with_auth("/api/v1/hostel-complaints", &warden.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 2);

    let request = get_request_with_auth(
        "/api/v1/hostel-complaints?status=Pending",
        &warden.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["complaints"][0]["status"], "Pending");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_student_cannot_update_status() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let complaint_id = file_complaint(&app, &student).await;

    let request = json_request_with_auth(
        Method::PATCH,
        &format!("/api/v1/hostel-complaints/{}/status", complaint_id),
        json!({ "status": "Resolved" }),
        &student.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_faculty_cannot_file_complaints() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/hostel-complaints",
        json!({
            "hostelBlock": "Block A",
            "roomNumber": "A-214",
            "issueType": "Electrical",
            "description": "Faculty do not live here."
        }),
        &faculty.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}
