//! Integration tests for academic query threads.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_pool, get_request_with_auth,
    json_request_with_auth, parse_response_body, run_migrations, test_config, AuthenticatedUser,
    TestUser,
};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

/// Open a query thread as the student, addressed to the given faculty.
async fn open_query(app: &Router, student: &AuthenticatedUser, faculty_id: &str) -> String {
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/academic-queries",
        json!({
            "subject": "Doubt about grading",
            "message": "How is the internal assessment weighted?",
            "facultyId": faculty_id
        }),
        &student.access_token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "open_query failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_query_assigns_code_and_open_status() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/academic-queries",
        json!({
            "subject": "Doubt about grading",
            "message": "How is the internal assessment weighted?",
            "facultyId": faculty.user_id
        }),
        &student.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "Open");
    let code = body["queryId"].as_str().unwrap();
    assert!(code.starts_with("AQ"), "unexpected query code: {}", code);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_only_students_can_open_queries() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/academic-queries",
        json!({
            "subject": "Not allowed",
            "message": "Faculty cannot open queries"
        }),
        &faculty.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_faculty_reply_moves_status_to_responded() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let query_id = open_query(&app, &student, &faculty.user_id).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/academic-queries/{}/replies", query_id),
        json!({ "message": "Internals count for 30 percent." }),
        &faculty.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = get_request_with_auth(
        &format!("/api/v1/academic-queries/{}", query_id),
        &student.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let thread = parse_response_body(response).await;
    assert_eq!(thread["status"], "Responded");
    assert_eq!(thread["replies"].as_array().unwrap().len(), 1);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_student_reply_moves_status_to_replied() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let query_id = open_query(&app, &student, &faculty.user_id).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/academic-queries/{}/replies", query_id),
        json!({ "message": "Adding some more context." }),
        &student.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = get_request_with_auth(
        &format!("/api/v1/academic-queries/{}", query_id),
        &student.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let thread = parse_response_body(response).await;
    assert_eq!(thread["status"], "Replied");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_resolved_thread_rejects_replies() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let query_id = open_query(&app, &student, &faculty.user_id).await;

    // Student closes the thread
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/academic-queries/{}/resolve", query_id),
        json!({}),
        &student.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Replies bounce off a resolved thread
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/academic-queries/{}/replies", query_id),
        json!({ "message": "Too late?" }),
        &faculty.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_only_thread_owner_can_resolve() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let other_student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let query_id = open_query(&app, &student, &faculty.user_id).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/academic-queries/{}/resolve", query_id),
        json!({}),
        &other_student.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_other_students_cannot_read_thread() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let other_student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    let query_id = open_query(&app, &student, &faculty.user_id).await;

    let request = get_request_with_auth(
        &format!("/api/v1/academic-queries/{}", query_id),
        &other_student.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_listing_is_scoped_by_role() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let other_student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty =
        create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;
    let admin = create_authenticated_user(&app, &TestUser::new().with_role("Admin")).await;

    open_query(&app, &student, &faculty.user_id).await;

    // The author sees their thread
    let request = get_request_with_auth("/api/v1/academic-queries", &student.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);

    // An unrelated student sees nothing
    let request = get_request_with_auth("/api/v1/academic-queries", &other_student.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 0);

    // The addressed faculty sees it
    let request = get_request_with_auth("/api/v1/academic-queries", &faculty.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);

    // Admin sees everything
    let request = get_request_with_auth("/api/v1/academic-queries", &admin.access_token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_query_skips_codes_already_in_use() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = common::create_test_app(config, pool.clone());

    let student = create_authenticated_user(&app, &TestUser::new()).await;
    let faculty = create_authenticated_user(&app, &TestUser::new().with_role("Faculty")).await;

    open_query(&app, &student, &faculty.user_id).await;

    // Occupy the code the next create would compute (count 2 + 1 = 3),
    // as a concurrent create racing ahead would.
    let year = chrono::Utc::now().format("%Y").to_string();
    let clashing_code = format!("AQ{}-000003", year);
    let student_id = uuid::Uuid::parse_str(&student.user_id).unwrap();
    sqlx::query(
        "INSERT INTO academic_queries (query_id, subject, message, status, student_id, author_id) \
         VALUES ($1, 'Occupied', 'Placeholder', 'Open', $2, $2)",
    )
    .bind(&clashing_code)
    .bind(student_id)
    .execute(&pool)
    .await
    .unwrap();

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/academic-queries",
        json!({
            "subject": "Another doubt",
            "message": "Is the midterm syllabus final?",
            "facultyId": faculty.user_id
        }),
        &student.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    assert_ne!(body["queryId"], clashing_code);
    assert!(body["queryId"].as_str().unwrap().starts_with("AQ"));

    cleanup_all_test_data(&pool).await;
}
