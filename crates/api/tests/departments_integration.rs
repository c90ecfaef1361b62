//! Integration tests for department and batch management.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_pool, delete_request_with_auth,
    get_request_with_auth, json_request_with_auth, parse_response_body, run_migrations,
    test_config, unique_department_code, TestUser,
};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Department Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_and_list_departments() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;

    let code = unique_department_code();
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/departments",
        json!({
            "name": "Computer Science and Engineering",
            "code": code,
            "departmentType": "academic"
        }),
        &admin.access_token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["code"], code);
    assert_eq!(body["departmentType"], "academic");

    // Any authenticated user can browse departments
    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let request = get_request_with_auth("/api/v1/departments", &student.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let departments = body.as_array().unwrap();
    assert!(departments.iter().any(|d| d["code"] == code));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_student_cannot_create_department() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/departments",
        json!({
            "name": "Rogue Department",
            "code": unique_department_code(),
            "departmentType": "academic"
        }),
        &student.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "access_denied");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_department_code_conflicts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;
    let code = unique_department_code();

    let body = json!({
        "name": "Electronics",
        "code": code,
        "departmentType": "academic"
    });

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/departments",
        body.clone(),
        &admin.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request =
        json_request_with_auth(Method::POST, "/api/v1/departments", body, &admin.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_department() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;
    let id = common::create_test_department(&app, &admin.access_token, &unique_department_code())
        .await;

    let request =
        delete_request_with_auth(&format!("/api/v1/departments/{}", id), &admin.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again reports not found
    let request =
        delete_request_with_auth(&format!("/api/v1/departments/{}", id), &admin.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Batch and Section Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_batch_with_sections() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;
    let department_id =
        common::create_test_department(&app, &admin.access_token, &unique_department_code()).await;

    // Create a batch
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/batches",
        json!({
            "name": "CSE 2026",
            "year": 2026,
            "departmentId": department_id
        }),
        &admin.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let batch = parse_response_body(response).await;
    let batch_id = batch["id"].as_str().unwrap().to_string();

    // Add a section to it
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/sections",
        json!({
            "batchId": batch_id,
            "name": "A"
        }),
        &admin.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Listing batches includes the section
    let request = get_request_with_auth("/api/v1/batches", &admin.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == batch_id.as_str())
        .expect("batch missing from listing");
    assert_eq!(listed["sections"].as_array().unwrap().len(), 1);
    assert_eq!(listed["sections"][0]["name"], "A");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_section_for_missing_batch_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/sections",
        json!({
            "batchId": uuid::Uuid::new_v4(),
            "name": "A"
        }),
        &admin.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}
