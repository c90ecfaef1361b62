//! Academic query threads: create, list, read, reply, resolve.
//!
//! Students open threads, optionally addressed to a faculty member.
//! Replies flip the root status between Replied and Responded depending
//! on who wrote last; only the opening student may resolve, and resolved
//! threads are frozen.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use domain::access::{Resource, Role};
use domain::models::academic_query::{
    format_query_code, status_after_reply, AcademicQuery, CreateQueryRequest,
    ListQueriesResponse, QueryLifecycleError, QueryStatus, QueryThread, ReplyRequest,
};
use persistence::entities::AcademicQueryEntity;
use persistence::repositories::AcademicQueryRepository;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_query_created;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// POST /api/v1/academic-queries
///
/// Students only. Assigns the next query code for the current year.
pub async fn create_query(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateQueryRequest>,
) -> Result<(StatusCode, Json<AcademicQuery>), ApiError> {
    ensure_access(&user, Resource::AcademicQueries)?;
    if user.role != Role::Student {
        return Err(ApiError::AccessDenied);
    }
    request.validate()?;

    let repo = AcademicQueryRepository::new(state.pool.clone());

    let year = Utc::now().year();
    // Serial assignment races under concurrent creates, and deleted rows
    // can leave the count behind the highest code in use. The unique
    // constraint on query_id catches both; bump past the collision and
    // retry.
    let mut attempt: i64 = 0;
    let (query, code): (AcademicQuery, String) = loop {
        let serial = repo.count_roots_for_year(year).await? + 1 + attempt;
        let code = format_query_code(year, serial as u32);
        match repo
            .create_root(
                &code,
                &request.subject,
                &request.message,
                user.user_id,
                request.faculty_id,
            )
            .await
        {
            Ok(entity) => break (entity.into(), code),
            Err(e) if attempt < 5 && is_unique_violation(&e) => {
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    record_query_created();
    state.activity.log(
        user.user_id,
        "query.created",
        Some("academic_query"),
        Some(query.id.to_string()),
        Some(serde_json::json!({ "queryId": code })),
    );

    Ok((StatusCode::CREATED, Json(query)))
}

/// GET /api/v1/academic-queries
///
/// Students see their own threads, faculty the ones addressed to them,
/// admins everything.
pub async fn list_queries(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListQueriesResponse>, ApiError> {
    ensure_access(&user, Resource::AcademicQueries)?;

    let repo = AcademicQueryRepository::new(state.pool.clone());
    let entities = match user.role {
        Role::Student => {
            repo.list_roots_for_student(user.user_id, page.limit(), page.offset())
                .await?
        }
        Role::Faculty => {
            repo.list_roots_for_faculty(user.user_id, page.limit(), page.offset())
                .await?
        }
        _ => repo.list_all_roots(page.limit(), page.offset()).await?,
    };

    let root_ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
    let mut replies_by_root = repo.find_replies_for_roots(&root_ids).await?;

    let queries: Vec<QueryThread> = entities
        .into_iter()
        .map(|entity| {
            let replies = replies_by_root
                .remove(&entity.id)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect();
            QueryThread {
                root: entity.into(),
                replies,
            }
        })
        .collect();
    let total = queries.len();

    Ok(Json(ListQueriesResponse { queries, total }))
}

/// GET /api/v1/academic-queries/:id
///
/// The full thread: root plus replies in chronological order.
pub async fn get_thread(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QueryThread>, ApiError> {
    ensure_access(&user, Resource::AcademicQueries)?;

    let repo = AcademicQueryRepository::new(state.pool.clone());
    let root = load_root(&repo, id).await?;
    ensure_thread_participant(&user, &root)?;

    let mut replies_by_root = repo.find_replies_for_roots(&[root.id]).await?;
    let replies = replies_by_root
        .remove(&root.id)
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(QueryThread {
        root: root.into(),
        replies,
    }))
}

/// POST /api/v1/academic-queries/:id/replies
pub async fn add_reply(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<AcademicQuery>), ApiError> {
    ensure_access(&user, Resource::AcademicQueries)?;
    request.validate()?;

    let repo = AcademicQueryRepository::new(state.pool.clone());
    let root = load_root(&repo, id).await?;
    ensure_thread_participant(&user, &root)?;

    let current = QueryStatus::parse(&root.status)
        .ok_or_else(|| ApiError::Internal(format!("Unknown query status '{}'", root.status)))?;
    let new_status = status_after_reply(current, user.role).map_err(|e| match e {
        QueryLifecycleError::AlreadyResolved => {
            ApiError::Conflict("Query is resolved and no longer accepts replies".into())
        }
        QueryLifecycleError::NotThreadOwner => ApiError::AccessDenied,
    })?;

    let reply: AcademicQuery = repo
        .add_reply(
            root.id,
            &request.message,
            user.user_id,
            root.student_id,
            root.faculty_id,
            new_status.as_str(),
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "query.replied",
        Some("academic_query"),
        Some(root.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(reply)))
}

/// POST /api/v1/academic-queries/:id/resolve
///
/// Only the student who opened the thread may resolve it.
pub async fn resolve_query(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicQuery>, ApiError> {
    ensure_access(&user, Resource::AcademicQueries)?;
    if user.role != Role::Student {
        return Err(ApiError::AccessDenied);
    }

    let repo = AcademicQueryRepository::new(state.pool.clone());
    let root = load_root(&repo, id).await?;
    if root.student_id != user.user_id {
        return Err(ApiError::Forbidden(
            QueryLifecycleError::NotThreadOwner.to_string(),
        ));
    }
    if root.status == QueryStatus::Resolved.as_str() {
        return Err(ApiError::Conflict("Query is already resolved".into()));
    }

    let resolved: AcademicQuery = repo
        .resolve(root.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Query not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "query.resolved",
        Some("academic_query"),
        Some(root.id.to_string()),
        None,
    );

    Ok(Json(resolved))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Loads a thread root; replies are not addressable directly.
async fn load_root(
    repo: &AcademicQueryRepository,
    id: Uuid,
) -> Result<AcademicQueryEntity, ApiError> {
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Query not found".into()))?;
    if entity.parent_id.is_some() {
        return Err(ApiError::NotFound("Query not found".into()));
    }
    Ok(entity)
}

/// Thread reads and replies are limited to the opening student, the
/// addressed faculty member, and admins.
fn ensure_thread_participant(
    user: &CurrentUser,
    root: &AcademicQueryEntity,
) -> Result<(), ApiError> {
    let allowed = match user.role {
        Role::Admin => true,
        Role::Student => root.student_id == user.user_id,
        Role::Faculty => root.faculty_id == Some(user.user_id),
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(ApiError::AccessDenied)
    }
}
