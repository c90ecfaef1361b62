//! Application state and router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::{
    self, metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes;
use crate::services::activity::ActivityService;
use crate::services::storage::StorageService;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub storage: StorageService,
    pub activity: ActivityService,
}

/// Builds the full application router.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        storage: StorageService::new(&config.storage),
        activity: ActivityService::new(pool.clone()),
        pool,
        rate_limiter,
        config: Arc::new(config),
    };

    let cors = build_cors(&state.config);
    // Leave headroom over the per-file limit for multipart framing.
    let body_limit = (state.config.max_upload_bytes() as usize) + 1024 * 1024;

    let public = Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/health/ready", get(routes::health::ready))
        .route("/api/health/live", get(routes::health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(routes::auth::register))
        .route("/api/v1/auth/login", post(routes::auth::login))
        .route("/api/v1/auth/refresh", post(routes::auth::refresh))
        .route("/api/v1/files/download", get(routes::files::download_signed));

    let protected = Router::new()
        .route("/api/v1/auth/me", get(routes::auth::me))
        .route("/api/v1/auth/logout", post(routes::auth::logout))
        .route(
            "/api/v1/profiles/me",
            get(routes::profiles::me).patch(routes::profiles::update_me),
        )
        .route(
            "/api/v1/profiles/me/capabilities",
            get(routes::profiles::my_capabilities),
        )
        .route(
            "/api/v1/profiles/:user_id",
            get(routes::profiles::get_profile),
        )
        .route(
            "/api/v1/admin/users",
            get(routes::admin_users::list_users).post(routes::admin_users::create_user),
        )
        .route(
            "/api/v1/admin/users/:user_id/role",
            patch(routes::admin_users::update_role),
        )
        .route(
            "/api/v1/admin/activity-logs",
            get(routes::activity_logs::list_logs),
        )
        .route(
            "/api/v1/admin/backend-health",
            get(routes::health::backend_health),
        )
        .route(
            "/api/v1/departments",
            get(routes::departments::list_departments).post(routes::departments::create_department),
        )
        .route(
            "/api/v1/departments/:id",
            patch(routes::departments::update_department)
                .delete(routes::departments::delete_department),
        )
        .route(
            "/api/v1/batches",
            get(routes::batches::list_batches).post(routes::batches::create_batch),
        )
        .route(
            "/api/v1/batches/:id",
            patch(routes::batches::update_batch).delete(routes::batches::delete_batch),
        )
        .route("/api/v1/sections", post(routes::batches::create_section))
        .route(
            "/api/v1/sections/:id",
            axum::routing::delete(routes::batches::delete_section),
        )
        .route(
            "/api/v1/courses",
            get(routes::courses::list_courses).post(routes::courses::create_course),
        )
        .route(
            "/api/v1/courses/:id",
            axum::routing::delete(routes::courses::delete_course),
        )
        .route(
            "/api/v1/course-assignments",
            get(routes::courses::list_assignments).post(routes::courses::create_assignment),
        )
        .route(
            "/api/v1/course-assignments/:id",
            axum::routing::delete(routes::courses::delete_assignment),
        )
        .route(
            "/api/v1/academic-queries",
            get(routes::academic_queries::list_queries).post(routes::academic_queries::create_query),
        )
        .route(
            "/api/v1/academic-queries/:id",
            get(routes::academic_queries::get_thread),
        )
        .route(
            "/api/v1/academic-queries/:id/replies",
            post(routes::academic_queries::add_reply),
        )
        .route(
            "/api/v1/academic-queries/:id/resolve",
            post(routes::academic_queries::resolve_query),
        )
        .route(
            "/api/v1/hostel-complaints",
            get(routes::hostel_complaints::list_complaints)
                .post(routes::hostel_complaints::create_complaint),
        )
        .route(
            "/api/v1/hostel-complaints/:id/status",
            patch(routes::hostel_complaints::update_status),
        )
        .route(
            "/api/v1/mess-menus",
            get(routes::mess_menus::list_menus).post(routes::mess_menus::upsert_menu),
        )
        .route(
            "/api/v1/mess-menus/:id",
            patch(routes::mess_menus::update_menu).delete(routes::mess_menus::delete_menu),
        )
        .route(
            "/api/v1/timetable",
            get(routes::timetables::list_for_batch).post(routes::timetables::create_entry),
        )
        .route("/api/v1/timetable/my", get(routes::timetables::list_my_slots))
        .route(
            "/api/v1/timetable/:id",
            patch(routes::timetables::update_entry).delete(routes::timetables::delete_entry),
        )
        .route(
            "/api/v1/announcements",
            get(routes::announcements::list_announcements)
                .post(routes::announcements::create_announcement),
        )
        .route(
            "/api/v1/announcements/:id",
            axum::routing::delete(routes::announcements::delete_announcement),
        )
        .route("/api/v1/files", get(routes::files::list_files))
        .route("/api/v1/files/upload/:bucket", post(routes::files::upload))
        .route("/api/v1/files/:id/url", get(routes::files::file_url))
        .route("/api/v1/files/:id/content", get(routes::files::download_by_id))
        .route(
            "/api/v1/files/:id",
            axum::routing::delete(routes::files::delete_file),
        )
        .route("/api/v1/reports/summary", get(routes::reports::summary))
        .route(
            "/api/v1/reports/configs",
            get(routes::reports::list_configs).post(routes::reports::create_config),
        )
        .route(
            "/api/v1/reports/configs/:id",
            get(routes::reports::get_config)
                .patch(routes::reports::update_config)
                .delete(routes::reports::delete_config),
        )
        .route(
            "/api/v1/reports/configs/:id/generate",
            post(routes::reports::generate),
        )
        .route(
            "/api/v1/reports/configs/:id/data",
            get(routes::reports::latest_data),
        )
        .route(
            "/api/v1/reports/configs/:id/views",
            post(routes::reports::record_view),
        )
        .route(
            "/api/v1/holidays",
            get(routes::holidays::list_holidays).post(routes::holidays::create_holiday),
        )
        .route(
            "/api/v1/holidays/:id",
            axum::routing::delete(routes::holidays::delete_holiday),
        )
        .route(
            "/api/v1/notifications/preferences",
            get(routes::notifications::get_preferences)
                .put(routes::notifications::update_preferences),
        )
        // Innermost first: role resolution needs the JWT identity, which
        // needs authentication to have run.
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::load_current_user,
        ))
        .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .route_layer(from_fn_with_state(state.clone(), require_user_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_secs,
        )))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

/// Open CORS when no origins are configured, an explicit allow-list
/// otherwise.
fn build_cors(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
